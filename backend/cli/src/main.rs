mod engines;
mod extract_cmd;
mod speak_cmd;
mod status_cmd;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use pagecast_config::{config_file_path, load_and_prepare, redact, validate, PagecastConfig};
use pagecast_gateway::start_server;
use pagecast_logging::init_logger;

#[derive(Parser)]
#[command(name = "pagecast")]
#[command(about = "Pagecast: page images to text and speech")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $PAGECAST_CONFIG or ./pagecast.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Query a running server's health endpoint
    Status,
    /// Extract text blocks from a local image
    Extract {
        path: PathBuf,
        /// Clean up the text with the configured LLM
        #[arg(long)]
        format: bool,
        #[arg(long)]
        pretty: bool,
    },
    /// Synthesize text to a WAV file
    Speak {
        text: String,
        #[arg(long)]
        voice: Option<String>,
        #[arg(short, long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli.config.unwrap_or_else(config_file_path);
    let mut config = load_and_prepare(&path).await?;

    init_logger(config.log_dir(), config.log_level());
    // Warnings raised while loading predate the subscriber.
    for warning in validate(&config).warnings {
        warn!(path = %warning.path, message = %warning.message, "Config warning");
    }

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = Some(port);
            }
            run_server(config).await?;
        }
        Commands::Status => status_cmd::run(config.port()).await?,
        Commands::Extract {
            path,
            format,
            pretty,
        } => extract_cmd::run(&config, &path, format, pretty).await?,
        Commands::Speak { text, voice, out } => {
            speak_cmd::run(&config, &text, voice.as_deref(), &out).await?
        }
    }

    Ok(())
}

async fn run_server(config: PagecastConfig) -> Result<()> {
    let effective = serde_json::to_value(&config)?;
    info!(config = %redact(&effective), "Starting Pagecast server");

    let addr: SocketAddr = config
        .listen_addr()
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr()))?;

    let state = engines::gateway_state(&config);
    start_server(addr, state, config.max_upload_bytes()).await
}
