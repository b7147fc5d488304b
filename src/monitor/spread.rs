//! Spread computation and threshold band

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Percentage band considered normal
///
/// Bounds are strict: a spread exactly on a bound is still in band.
#[derive(Debug, Clone)]
pub struct ThresholdBand {
    pub low: Decimal,
    pub high: Decimal,
}

/// Which side of the band a spread escaped through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breach {
    BelowLow,
    AboveHigh,
}

impl ThresholdBand {
    /// Create a band from low/high percentage bounds
    pub fn new(low: Decimal, high: Decimal) -> Self {
        Self { low, high }
    }

    /// Check a spread percentage against the band
    pub fn breach(&self, pct: Decimal) -> Option<Breach> {
        if pct < self.low {
            Some(Breach::BelowLow)
        } else if pct > self.high {
            Some(Breach::AboveHigh)
        } else {
            None
        }
    }
}

/// One evaluation cycle's spread figures
///
/// Derived fresh each cycle from the two readings, never cached.
#[derive(Debug, Clone, Serialize)]
pub struct SpreadSample {
    /// Best ask from the streaming feed
    pub streamed_ask: Decimal,
    /// Quoted conversion rate from the poll
    pub quoted_rate: Decimal,
    /// quoted_rate - streamed_ask
    pub diff_abs: Decimal,
    /// diff_abs / streamed_ask * 100
    pub diff_pct: Decimal,
    /// When the sample was computed
    pub timestamp: DateTime<Utc>,
}

impl SpreadSample {
    /// Compute a sample from the two readings
    ///
    /// Returns `None` when the ask is zero, since the percentage is undefined.
    /// All arithmetic stays in fixed-precision decimals.
    pub fn compute(streamed_ask: Decimal, quoted_rate: Decimal) -> Option<Self> {
        if streamed_ask.is_zero() {
            return None;
        }

        let diff_abs = quoted_rate - streamed_ask;
        let diff_pct = diff_abs / streamed_ask * dec!(100);

        Some(Self {
            streamed_ask,
            quoted_rate,
            diff_abs,
            diff_pct,
            timestamp: Utc::now(),
        })
    }
}
