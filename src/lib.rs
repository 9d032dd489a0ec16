pub mod cli;
pub mod console;
pub mod error;
pub mod history;
pub mod image;
pub mod llm;
pub mod models;
pub mod session;

use cli::Args;
use console::ConsoleRenderer;
use llm::chat::new_client;
use llm::LlmConfig;
use log::{ debug, info };
use session::Session;
use std::error::Error;
use std::io;
use std::process::ExitCode;

/// Interaction failures are rendered for the user and turned into a failing
/// exit code; only process-level I/O errors come back as `Err`.
pub async fn run(args: Args) -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    let config = LlmConfig::from_args(&args);

    debug!("--- Core Configuration ---");
    debug!("Model: {}", config.completion_model.as_deref().unwrap_or(llm::DEFAULT_MODEL));
    debug!("Base URL: {}", config.base_url.as_deref().unwrap_or(llm::DEFAULT_BASE_URL));
    debug!("API Key Present: {}", config.api_key.is_some());
    debug!("Timeout: {:?}", config.timeout);
    debug!("Mode: {}", if args.is_one_shot() { "one-shot" } else { "interactive" });
    debug!("-------------------------");

    let gateway = new_client(&config);
    if let Ok(client) = &gateway {
        info!("Chat client configured: Model={}, BaseURL={}", client.get_model(), client.get_base_url());
    }
    let mut session = Session::new(gateway);

    if args.is_one_shot() {
        let mut renderer = ConsoleRenderer::replies_only(io::stdout());
        let mut errors = ConsoleRenderer::new(io::stderr());
        let result = console::run_once(
            &mut session,
            args.prompt,
            args.image,
            &mut renderer,
            &mut errors
        ).await;
        return Ok(if result.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let mut renderer = ConsoleRenderer::new(io::stdout());
    console::run_repl(&mut session, io::stdin().lock(), &mut renderer).await?;
    Ok(ExitCode::SUCCESS)
}
