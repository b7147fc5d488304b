//! Price feed module
//!
//! Streams the exchange best ask into the shared price cell.

mod binance;

pub use binance::BinanceFeed;
