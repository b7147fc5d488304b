//! WebSocket client library
//!
//! Provides a reusable WebSocket client with ping/pong handling and
//! unbounded fixed-delay reconnection.

mod client;
mod types;

pub use client::WsClient;
pub use types::{ReconnectPolicy, WsConfig, WsError, WsMessage};
