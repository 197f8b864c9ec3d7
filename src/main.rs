use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gateway_button::{
    enable_pull_up, until_signal, ButtonMonitor, CdevLine, CommandReset, CommandSignals,
    MonitorConfig, MonitorSettings,
};

#[derive(Parser, Debug)]
#[command(name = "button-monitor")]
#[command(about = "Watch the gateway user button and factory-reset on a long press")]
struct Args {
    /// Configuration file (ignored if missing)
    #[arg(short, long, default_value = "/etc/button-monitor/config.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = MonitorConfig::load(Some(&args.config))
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;

    // Single-threaded: one wait outstanding at a time.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(run(config))
}

async fn run(config: MonitorConfig) -> Result<()> {
    enable_pull_up(&config).await;

    let line = CdevLine::request(&config.chip, config.line, &config.consumer)?;
    let signals = CommandSignals::new(config.pressed_signal.clone(), config.released_signal.clone());
    let reset = CommandReset::new(config.factory_reset.clone());

    info!(
        "Monitoring GPIO{} on {} for button press...",
        config.line, config.chip
    );

    let monitor = ButtonMonitor::new(line, signals, reset, MonitorSettings::from(&config));
    monitor.run(shutdown_signal()).await?;
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let terminate = async {
        signal(SignalKind::terminate())?.recv().await;
        Ok::<(), std::io::Error>(())
    };

    tokio::select! {
        _ = until_signal("SIGINT", tokio::signal::ctrl_c()) => {}
        _ = until_signal("SIGTERM", terminate) => {}
    }
}
