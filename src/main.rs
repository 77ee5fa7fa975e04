// Sara - Rule-governed generation relay
// Main entry point

use anyhow::Result;
use clap::Parser;

use sara::config::load_config;
use sara::logging::init_tracing;
use sara::server::RelayServer;

/// HTTP relay that reviews proposals against governance rules with Gemini
#[derive(Debug, Parser)]
#[command(name = "sara", version, about)]
struct Cli {
    /// Bind address (overrides $PORT), e.g. 127.0.0.1:8000
    #[arg(long)]
    bind: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let mut config = load_config()?;
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }

    let server = RelayServer::from_config(config)?;
    server.serve().await
}
