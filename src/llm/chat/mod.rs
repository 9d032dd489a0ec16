pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;

use self::openai::OpenAIChatClient;
use super::LlmConfig;
use super::projection::ApiMessage;
use crate::error::{ ConfigurationError, GatewayError };

/// The network-facing side of a conversation: one call in, one reply out.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Sends the whole message list and returns the trimmed text of the first choice.
    async fn infer(&self, messages: &[ApiMessage]) -> Result<String, GatewayError>;

    fn get_model(&self) -> String;
    fn get_base_url(&self) -> String;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, ConfigurationError> {
    let client = OpenAIChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
