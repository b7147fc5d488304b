//! Time-series persistence for spread samples

mod influx;

pub use influx::InfluxSink;

use crate::monitor::SpreadSample;
use async_trait::async_trait;
use thiserror::Error;

/// Telemetry store failures
///
/// `Unreachable` at startup is fatal to the process; per-write failures are
/// logged by the caller and the cycle continues.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Endpoint not reachable or health check failed
    #[error("telemetry endpoint unreachable: {0}")]
    Unreachable(String),

    /// The store rejected the write
    #[error("telemetry write rejected {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Network or timeout failure
    #[error("telemetry transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Persists one named measurement per evaluation cycle
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Record a spread sample tagged with the instrument pair
    async fn record(&self, pair: &str, sample: &SpreadSample) -> Result<(), SinkError>;
}
