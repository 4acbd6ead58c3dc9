use clap::Parser;
use exprun::SystemConfig;
use exprun_http::server::{ServerConfig, start_server};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// exprun HTTP API Server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "EXPRUN_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "EXPRUN_PORT", default_value_t = 3000)]
    port: u16,

    /// Path to an interpreter configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let system_config = match &cli.config {
        Some(path) => SystemConfig::from_file(path)?,
        None => SystemConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&system_config.log_level)),
        )
        .init();

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        system_config: Some(system_config),
    };

    println!(
        "Starting exprun HTTP server on {}:{}",
        config.host, config.port
    );
    start_server(config).await
}
