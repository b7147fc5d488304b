//! Monitor runner
//!
//! Owns the shared price cell and both execution contexts: the feed task in
//! the background and the evaluation loop in the foreground.

use super::cell::PriceCell;
use super::cooldown::AlertCooldown;
use super::evaluator::Evaluator;
use super::spread::ThresholdBand;
use crate::config::Config;
use crate::feed::BinanceFeed;
use crate::notify::Notifier;
use crate::rate::{MercuryoClient, RateError};
use crate::sink::TelemetrySink;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;

pub struct Monitor {
    cell: PriceCell,
    feed: BinanceFeed,
    rate_client: MercuryoClient,
    evaluator: Evaluator,
    poll_interval: Duration,
    rate_limit_backoff: Duration,
}

impl Monitor {
    pub fn new(
        config: &Config,
        notifier: Arc<dyn Notifier>,
        sink: Arc<dyn TelemetrySink>,
    ) -> Self {
        let band = ThresholdBand::new(
            config.monitor.threshold_low_pct,
            config.monitor.threshold_high_pct,
        );
        let cooldown = AlertCooldown::new(Duration::from_secs(config.monitor.alert_cooldown_secs));
        let pair = config.feed.symbol.to_uppercase();

        Self {
            cell: PriceCell::new(),
            feed: BinanceFeed::new(&config.feed),
            rate_client: MercuryoClient::new(&config.provider),
            evaluator: Evaluator::new(pair, band, cooldown, notifier, sink),
            poll_interval: Duration::from_secs(config.monitor.poll_interval_secs),
            rate_limit_backoff: Duration::from_secs(config.provider.rate_limit_backoff_secs),
        }
    }

    /// Run until interrupted
    ///
    /// The feed task lives in the background and talks to this loop only
    /// through the price cell. Every per-cycle error is absorbed here; the
    /// loop itself never fails.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let feed_task = self.feed.spawn(self.cell.clone());

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupt received, shutting down");
                    break;
                }
                _ = self.cycle() => {}
            }
        }

        feed_task.abort();
        Ok(())
    }

    /// One evaluation cycle including its trailing sleep
    ///
    /// A 429 from the provider replaces the normal poll-interval sleep with
    /// the elongated backoff; every other path sleeps the poll interval.
    async fn cycle(&mut self) {
        let Some(ask) = self.cell.get() else {
            tracing::info!("Waiting for the first feed tick...");
            sleep(self.poll_interval).await;
            return;
        };

        match self.rate_client.fetch_rate().await {
            Ok(rate) => {
                let outcome = self.evaluator.run_cycle(ask, rate, Instant::now()).await;
                tracing::debug!(?outcome, "Cycle complete");
                sleep(self.poll_interval).await;
            }
            Err(RateError::RateLimited) => {
                tracing::warn!(
                    backoff_secs = self.rate_limit_backoff.as_secs(),
                    "Provider rate limit hit, backing off"
                );
                sleep(self.rate_limit_backoff).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Rate poll failed, no sample this cycle");
                sleep(self.poll_interval).await;
            }
        }
    }
}
