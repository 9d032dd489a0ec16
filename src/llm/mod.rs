pub mod chat;
pub mod projection;

use std::time::Duration;
use crate::cli::Args;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub completion_model: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl LlmConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            api_key: args.api_key.clone().filter(|k| !k.trim().is_empty()),
            completion_model: args.model.clone().filter(|m| !m.trim().is_empty()),
            base_url: args.base_url.clone().filter(|u| !u.trim().is_empty()),
            timeout: args.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn blank_values_are_treated_as_unset() {
        let args = Args::try_parse_from([
            "vision-chat",
            "--api-key",
            " ",
            "--model",
            "",
            "--timeout-secs",
            "30",
        ]).unwrap();
        let config = LlmConfig::from_args(&args);
        assert!(config.api_key.is_none());
        assert!(config.completion_model.is_none());
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }
}
