//! spread-watch: cross-venue spread monitor
//!
//! This library provides the core components for:
//! - Real-time best-ask price from the Binance WebSocket ticker stream
//! - Periodic quoted-rate polling from the Mercuryo convert API
//! - Spread computation and threshold evaluation in decimal arithmetic
//! - Cooldown-gated Telegram alerting
//! - Per-cycle sample persistence to an InfluxDB-compatible store

pub mod cli;
pub mod config;
pub mod feed;
pub mod monitor;
pub mod notify;
pub mod rate;
pub mod sink;
pub mod telemetry;
pub mod ws;
