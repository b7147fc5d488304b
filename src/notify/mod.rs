//! Alert delivery

mod telegram;

pub use telegram::TelegramNotifier;

use async_trait::async_trait;
use thiserror::Error;

/// Alert delivery failures; the cooldown does not advance on any of these
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Credentials are not configured; the alert is skipped
    #[error("notifier credentials not configured")]
    Unconfigured,

    /// The delivery API rejected the message
    #[error("notifier API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Network or timeout failure
    #[error("notifier delivery failed: {0}")]
    Delivery(#[from] reqwest::Error),
}

/// Delivery channel for rendered alert messages
///
/// `Ok(())` means the channel confirmed receipt; the caller treats anything
/// else as a failed delivery to be retried on the next eligible cycle.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
