mod commands;

use clap::Parser;
use commands::{execute_command, Commands};
use spotify_app_client::{AppClient, ClientConfig};

/// Browse the music catalog through the backend API
#[derive(Parser)]
#[command(
    name = "spotify-app",
    about = "Browse your music catalog from the terminal",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    /// Backend origin, overrides SPOTIFY_APP_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }

    let http_client = http_client::native::NativeClient::new();
    let app = match AppClient::from_config(Box::new(http_client), config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("❌ Failed to create client: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = execute_command(args.command, &app).await {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }

    Ok(())
}
