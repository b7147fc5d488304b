use clap::Parser;
use spread_watch::cli::Cli;
use spread_watch::config::Config;
use spread_watch::monitor::Monitor;
use spread_watch::notify::TelegramNotifier;
use spread_watch::sink::InfluxSink;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .map_err(|e| anyhow::anyhow!("Could not load config from {}: {}", cli.config, e))?;

    spread_watch::telemetry::init_logging(&config.telemetry.log_level)?;

    tracing::info!(
        symbol = %config.feed.symbol,
        poll_interval_secs = config.monitor.poll_interval_secs,
        alert_cooldown_secs = config.monitor.alert_cooldown_secs,
        "Starting spread monitor"
    );

    let sink = InfluxSink::connect(&config.influx)
        .await
        .map_err(|e| anyhow::anyhow!("Telemetry store unavailable: {}", e))?;
    let notifier = TelegramNotifier::new(&config.notifier);

    let monitor = Monitor::new(&config, Arc::new(notifier), Arc::new(sink));
    monitor.run().await?;

    tracing::info!("Monitor stopped");
    Ok(())
}
