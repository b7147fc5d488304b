//! Alert cooldown state

use std::time::{Duration, Instant};

/// Suppression window between successive alert deliveries
///
/// The state is derived from the last delivery timestamp: suppressing while
/// `now - last_alert_at <= window`, idle otherwise. It starts idle and only
/// advances on a confirmed delivery, so a failed send retries on the next
/// eligible cycle instead of waiting out the window. The caller passes `now`
/// explicitly, which keeps the arithmetic testable without clock fakes.
#[derive(Debug)]
pub struct AlertCooldown {
    window: Duration,
    last_alert_at: Option<Instant>,
}

impl AlertCooldown {
    /// Create an idle cooldown with the given window
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_alert_at: None,
        }
    }

    /// True when no alert has been delivered yet or the window has elapsed
    pub fn permits(&self, now: Instant) -> bool {
        match self.last_alert_at {
            None => true,
            Some(at) => now.duration_since(at) > self.window,
        }
    }

    /// Record a confirmed delivery
    pub fn record_delivery(&mut self, now: Instant) {
        self.last_alert_at = Some(now);
    }
}
