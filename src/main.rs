//! cfddns - point a Cloudflare DNS record at this machine's public IP
//!
//! Runs once and exits: 0 when the record is up to date (or was updated),
//! 1 when any step fails.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cfddns::constants::DEFAULT_CONFIG_PATH;
use cfddns::{CloudflareClient, Config, HttpIpSource, Updater};

/// Application version
const VERSION: &str = "1.0.0";

//==============================================================================
// Main
//==============================================================================

#[derive(Debug, Parser)]
#[command(name = "cfddns")]
#[command(version = VERSION)]
#[command(about = "Update a Cloudflare DNS record with the current public IP")]
struct Args {
    /// TOML config file (default: /etc/cfddns/config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load(Some(config_path)).context("Config load failed")?;

    let verbose = args.verbose || config.verbose;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cf_client = CloudflareClient::new(
        &config.api_base,
        config.auth_email.as_str(),
        config.auth_key.as_str(),
        config.timeout,
    )
    .context("Cloudflare client failed")?;
    let ip_source = HttpIpSource::new(&config.ip_service_url, config.timeout)
        .context("IP service client failed")?;

    info!(
        "Checking {} in zone {}",
        config.record_name, config.zone_name
    );
    let updater = Updater::new(
        cf_client,
        ip_source,
        config.zone_name.clone(),
        config.record_name.clone(),
    );

    match updater.run().await {
        Ok(outcome) => {
            println!("{}", outcome);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("[Error] Problem {}", e.step);
            error!("{:#}", anyhow::Error::new(e.source));
            Ok(ExitCode::FAILURE)
        }
    }
}
