use clap::Parser;
use dotenv::dotenv;
use std::error::Error;
use std::process::ExitCode;
use vision_chat::cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    let args = Args::parse();
    let default_filter = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    vision_chat::run(args).await
}
