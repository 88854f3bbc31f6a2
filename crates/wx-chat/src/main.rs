//! wx-chat: Weather Chat Main Binary
//!
//! Main entry point for the weather chat demo.
//!
//! Usage:
//!   wx-chat                   - Start the weather Tool Endpoint server
//!   wx-chat --chat            - Start the interactive chat client
//!   wx-chat --execute <text>  - Run one prompt and exit
//!   wx-chat --help            - Show help

mod cli;

use tracing_subscriber::EnvFilter;

use wx_core::{ClaudeClient, Config};

/// Run mode
enum RunMode {
    /// Tool Endpoint server mode
    Server,
    /// Interactive chat mode
    Chat,
    /// One-shot execute mode
    Execute(String),
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let mode = parse_args();

    match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("wx-chat {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    match mode {
        RunMode::Server => {
            tracing::info!("Starting weather endpoint on port {}", config.weather.port);
            wx_api::start_server(config.weather.port)
                .await
                .map_err(|e| anyhow::anyhow!("Server error: {}", e))
        }
        RunMode::Chat => {
            config
                .require_api_key()
                .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

            let client = ClaudeClient::new(&config)
                .map_err(|e| anyhow::anyhow!("Failed to create LLM client: {}", e))?;

            tracing::info!("Running in chat mode, model: {}", client.model());
            cli::run_chat(client, &config).await
        }
        RunMode::Execute(prompt) => {
            config
                .require_api_key()
                .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

            let client = ClaudeClient::new(&config)
                .map_err(|e| anyhow::anyhow!("Failed to create LLM client: {}", e))?;

            cli::run_execute(client, &config, &prompt).await
        }
        _ => Ok(()),
    }
}

/// Parse command line arguments
fn parse_args() -> RunMode {
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--chat" | "-c" => return RunMode::Chat,
            "--execute" | "-e" => {
                let prompt = args.next().unwrap_or_default();
                return RunMode::Execute(prompt);
            }
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Server
}

/// Print help message
fn print_help() {
    println!("wx-chat - Weather Chat Demo");
    println!();
    println!("Usage:");
    println!("  wx-chat                   Start the weather Tool Endpoint server");
    println!("  wx-chat --chat            Start the interactive chat client");
    println!("  wx-chat --execute <text>  Run one prompt and exit");
    println!("  wx-chat --help            Show this help message");
    println!("  wx-chat --version         Show version");
    println!();
    println!("Environment Variables:");
    println!("  ANTHROPIC_API_KEY     API key (required for chat mode)");
    println!("  LLM_MODEL             Model name (default: claude-sonnet-4-20250514)");
    println!("  LLM_BASE_URL          Custom model API endpoint");
    println!("  WEATHER_PORT          Endpoint server port (default: 8000)");
    println!("  WEATHER_ENDPOINT_URL  Endpoint URL the chat client calls");
    println!("                        (default: http://localhost:8000)");
}
