use async_trait::async_trait;
use log::{ debug, info };
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };
use std::time::Duration;

use super::ChatClient;
use crate::error::{ ConfigurationError, GatewayError };
use crate::llm::{ LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL };
use crate::llm::projection::ApiMessage;

const COMPLETIONS_ROUTE: &str = "/v1/chat/completions";

pub struct OpenAIChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: &'a [ApiMessage],
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

impl OpenAIChatClient {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>
    ) -> Result<Self, ConfigurationError> {
        if api_key.trim().is_empty() {
            return Err(ConfigurationError::MissingApiKey);
        }
        let chat_model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|e| ConfigurationError::InvalidApiKey(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let mut builder = HttpClient::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ConfigurationError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            model: chat_model,
            base_url: api_url,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, ConfigurationError> {
        let api_key = config.api_key.clone().ok_or(ConfigurationError::MissingApiKey)?;
        Self::new(
            api_key,
            config.completion_model.clone(),
            config.base_url.clone(),
            config.timeout
        )
    }

    fn completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with(COMPLETIONS_ROUTE) {
            base.to_string()
        } else {
            format!("{}{}", base, COMPLETIONS_ROUTE)
        }
    }
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn infer(&self, messages: &[ApiMessage]) -> Result<String, GatewayError> {
        if messages.is_empty() {
            return Err(GatewayError::EmptyRequest);
        }
        let url = self.completions_url();
        info!("Calling {} with {} message(s)", self.model, messages.len());

        let req = OpenAIChatRequest {
            model: &self.model,
            messages,
        };

        let resp = self.http.post(&url).json(&req).send().await.map_err(GatewayError::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(GatewayError::Transport)?;
        if !status.is_success() {
            return Err(GatewayError::Status { status: status.as_u16(), body });
        }
        debug!("OpenAI raw response: {}", body);

        let parsed: OpenAIResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;

        let content = parsed.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(GatewayError::EmptyResponse)?;

        Ok(content)
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> String {
        self.base_url.clone()
    }
}
