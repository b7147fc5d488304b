//! InfluxDB v2 line-protocol writer

use super::{SinkError, TelemetrySink};
use crate::config::InfluxConfig;
use crate::monitor::SpreadSample;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Telemetry sink backed by the InfluxDB v2 HTTP write API
pub struct InfluxSink {
    client: Client,
    write_url: String,
    health_url: String,
    token: String,
    measurement: String,
}

impl InfluxSink {
    /// Build the client and verify the endpoint is reachable
    ///
    /// The caller treats a failed health check as a startup-fatal condition:
    /// the monitor's dashboarding purpose cannot be met without the store.
    pub async fn connect(config: &InfluxConfig) -> Result<Self, SinkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(SinkError::Transport)?;

        let sink = Self {
            client,
            write_url: format!(
                "{}/api/v2/write?org={}&bucket={}&precision=ms",
                config.url, config.org, config.bucket
            ),
            health_url: format!("{}/health", config.url),
            token: config.token.clone(),
            measurement: config.measurement.clone(),
        };

        sink.ping().await?;
        tracing::info!(url = %config.url, bucket = %config.bucket, "Telemetry store connected");

        Ok(sink)
    }

    /// Check that the store answers its health endpoint
    pub async fn ping(&self) -> Result<(), SinkError> {
        let response = self
            .client
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| SinkError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SinkError::Unreachable(format!(
                "health check returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl TelemetrySink for InfluxSink {
    async fn record(&self, pair: &str, sample: &SpreadSample) -> Result<(), SinkError> {
        let line = render_line(&self.measurement, pair, sample);

        let response = self
            .client
            .post(&self.write_url)
            .header("Authorization", format!("Token {}", self.token))
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(line)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected { status, body });
        }

        Ok(())
    }
}

/// Render one line-protocol point: measurement, pair tag, numeric fields
fn render_line(measurement: &str, pair: &str, sample: &SpreadSample) -> String {
    format!(
        "{},pair={} spread_pct={},streamed_ask={},quoted_rate={} {}",
        measurement,
        pair,
        sample.diff_pct,
        sample.streamed_ask,
        sample.quoted_rate,
        sample.timestamp.timestamp_millis(),
    )
}
