use std::path::PathBuf;

use clap::Parser;

use flight_relay::config::load_or_default;
use flight_relay::lifecycle::startup;
use flight_relay::observability::logging;

#[derive(Parser)]
#[command(name = "flight-relay", version)]
#[command(about = "Local relay for Travclan, Tripjack and TBO flight searches", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    logging::init(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        max_body_bytes = config.limits.max_body_bytes,
        "flight-relay starting"
    );

    startup::run(config).await?;
    Ok(())
}
