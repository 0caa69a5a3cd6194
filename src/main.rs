mod api;
mod clock;
mod config;
mod error;
mod provider;
mod record;
mod script;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "cloudflare-dns-generator")]
#[command(about = "Validates Cloudflare credentials and generates dynamic DNS update scripts")]
struct Args {
    /// Path to the configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration first (before logger init)
    let config = match &args.config {
        Some(path) => config::Config::load(path)?,
        None => config::Config::default(),
    };

    // Initialize logger with config log level (env var takes precedence)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.server.log_level)
    ).init();

    match &args.config {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No configuration file given, using defaults"),
    }
    info!("Validating against Cloudflare API at {}", config.cloudflare.api_base);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = api::create_router(config, Arc::new(clock::SystemClock))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Validation endpoint: POST /validate");
    info!("Script endpoint: POST /scripts/{{sh|bat|ps1}}");

    axum::serve(listener, app).await?;

    Ok(())
}
