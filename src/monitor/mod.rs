//! Spread monitoring core
//!
//! The shared price cell, spread computation, alert cooldown, the per-cycle
//! evaluator, and the runner that wires them to the feed and the poller.

mod cell;
mod cooldown;
mod evaluator;
mod runner;
mod spread;

pub use cell::PriceCell;
pub use cooldown::AlertCooldown;
pub use evaluator::{render_alert, CycleOutcome, Evaluator};
pub use runner::Monitor;
pub use spread::{Breach, SpreadSample, ThresholdBand};
