//! Full performance monitor: all four collectors plus recommendations.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fluentpass_monitor::config::MonitorConfig;
use fluentpass_monitor::report::ReportRenderer;

#[derive(Debug, Parser)]
#[command(
    name = "fluentpass-monitor",
    version,
    about = "Performance analysis for a FluentPass deployment"
)]
struct Cli {
    /// Configuration file (default: first fluentpass-monitor.toml found)
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite store to probe
    #[arg(long, env = "FLUENTPASS_DATABASE")]
    database: Option<PathBuf>,

    /// Base URL for the endpoint latency checks
    #[arg(long, env = "FLUENTPASS_BASE_URL")]
    base_url: Option<String>,

    /// Frontend assets directory
    #[arg(long, env = "FLUENTPASS_ASSETS_DIR")]
    assets_dir: Option<PathBuf>,

    /// Write an annotated sample configuration file and exit
    #[arg(long)]
    sample_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.sample_config {
        let path = Path::new("fluentpass-monitor.toml.example");
        MonitorConfig::write_sample_config(path)?;
        println!("📝 Sample configuration written to {}", path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => MonitorConfig::load_from(path)?,
        None => MonitorConfig::load()?,
    };
    if let Some(database) = cli.database {
        config.database.path = database;
    }
    if let Some(base_url) = cli.base_url {
        config.endpoints.base_url = base_url;
    }
    if let Some(assets_dir) = cli.assets_dir {
        config.assets.dir = assets_dir;
    }

    let renderer = ReportRenderer::new(&config);
    renderer.run_full_analysis().await;

    Ok(())
}
