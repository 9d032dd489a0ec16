use clap::builder::BoolishValueParser;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Picture description chatbox backed by a hosted vision model", long_about = None)]
pub struct Args {
    // --- Chat LLM Provider Args ---
    /// API key for the OpenAI-compatible chat completions endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name for chat completion (e.g., gpt-4o-mini, gpt-4o)
    #[arg(long, env = "CHAT_MODEL")] // No default, rely on adapter default if None
    pub model: Option<String>,

    /// Base URL for the chat provider API (e.g., https://api.openai.com)
    #[arg(long, env = "CHAT_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds. Unset means the HTTP client's default.
    #[arg(long, env = "CHAT_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    // --- One-shot Args ---
    /// Text to send in a single non-interactive exchange
    #[arg(long)]
    pub prompt: Option<String>,

    /// JPEG or PNG image to send in a single non-interactive exchange
    #[arg(long)]
    pub image: Option<PathBuf>,

    // --- General App Args ---
    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", value_parser = BoolishValueParser::new())]
    pub debug: bool,
}

impl Args {
    /// One-shot mode runs a single interaction instead of the REPL.
    pub fn is_one_shot(&self) -> bool {
        self.prompt.is_some() || self.image.is_some()
    }
}
