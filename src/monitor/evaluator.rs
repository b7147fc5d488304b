//! Per-cycle spread evaluation

use super::cooldown::AlertCooldown;
use super::spread::{Breach, SpreadSample, ThresholdBand};
use crate::notify::Notifier;
use crate::sink::TelemetrySink;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Instant;

/// What the evaluator decided on one cycle
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// The ask was unusable, nothing was computed
    Skipped,
    /// Spread inside the band, sample recorded
    InBand(SpreadSample),
    /// Band breached, alert delivered
    AlertSent(SpreadSample, Breach),
    /// Band breached inside the cooldown window, delivery suppressed
    AlertSuppressed(SpreadSample, Breach),
    /// Band breached, delivery attempted and failed
    AlertFailed(SpreadSample, Breach),
}

/// Core decision component, executed once per poll cycle
///
/// Computes the spread from the two readings, forwards the sample to the
/// telemetry sink unconditionally, checks the threshold band, and delivers a
/// cooldown-gated alert on breach. The cooldown advances only on confirmed
/// delivery.
pub struct Evaluator {
    pair: String,
    band: ThresholdBand,
    cooldown: AlertCooldown,
    notifier: Arc<dyn Notifier>,
    sink: Arc<dyn TelemetrySink>,
}

impl Evaluator {
    pub fn new(
        pair: String,
        band: ThresholdBand,
        cooldown: AlertCooldown,
        notifier: Arc<dyn Notifier>,
        sink: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            pair,
            band,
            cooldown,
            notifier,
            sink,
        }
    }

    /// Evaluate one cycle from a streamed ask and a freshly polled rate
    pub async fn run_cycle(
        &mut self,
        streamed_ask: Decimal,
        quoted_rate: Decimal,
        now: Instant,
    ) -> CycleOutcome {
        let Some(sample) = SpreadSample::compute(streamed_ask, quoted_rate) else {
            tracing::warn!(%streamed_ask, "Streamed ask unusable, skipping comparison");
            return CycleOutcome::Skipped;
        };

        tracing::info!(
            streamed_ask = %sample.streamed_ask,
            quoted_rate = %sample.quoted_rate,
            spread_pct = %format!("{:.4}", sample.diff_pct),
            "Spread computed"
        );

        // The sample goes to the sink whether or not an alert fires
        if let Err(e) = self.sink.record(&self.pair, &sample).await {
            tracing::error!(error = %e, "Telemetry write failed");
        }

        let Some(breach) = self.band.breach(sample.diff_pct) else {
            return CycleOutcome::InBand(sample);
        };

        if !self.cooldown.permits(now) {
            tracing::info!(
                spread_pct = %format!("{:.4}", sample.diff_pct),
                "Alert suppressed by cooldown"
            );
            return CycleOutcome::AlertSuppressed(sample, breach);
        }

        let text = render_alert(&sample, breach);
        match self.notifier.send(&text).await {
            Ok(()) => {
                self.cooldown.record_delivery(now);
                tracing::info!("Alert delivered");
                CycleOutcome::AlertSent(sample, breach)
            }
            Err(e) => {
                // Cooldown untouched: the next eligible cycle retries
                tracing::error!(error = %e, "Alert delivery failed");
                CycleOutcome::AlertFailed(sample, breach)
            }
        }
    }
}

/// Render the alert text in Telegram Markdown
///
/// Carries the breach direction, the spread at four decimal places, and the
/// two raw prices at two decimal places.
pub fn render_alert(sample: &SpreadSample, breach: Breach) -> String {
    let direction = match breach {
        Breach::BelowLow => "📉 SPREAD BELOW BAND",
        Breach::AboveHigh => "📈 SPREAD ABOVE BAND",
    };

    format!(
        "🚨 *ALERT* 🚨\n\n\
         {}\n\
         👉 *CURRENT SPREAD: {:.4}%* 👈\n\n\
         🏦 *Quoted rate:* `{:.2}`\n\
         🔶 *Exchange ask:* `{:.2}`\n\
         💵 *Difference:* `{:.2}`",
        direction, sample.diff_pct, sample.quoted_rate, sample.streamed_ask, sample.diff_abs,
    )
}
