//! Binance WebSocket best-ask feed

use crate::config::FeedConfig;
use crate::monitor::PriceCell;
use crate::ws::{ReconnectPolicy, WsClient, WsConfig, WsMessage};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Binance ticker message structure
#[derive(Debug, Deserialize)]
struct TickerMessage {
    /// Event type
    #[serde(rename = "e")]
    #[allow(dead_code)]
    event_type: String,
    /// Symbol
    #[serde(rename = "s")]
    #[allow(dead_code)]
    symbol: String,
    /// Best ask price
    #[serde(rename = "a")]
    best_ask: String,
}

/// Binance WebSocket feed for the `<symbol>@ticker` stream
pub struct BinanceFeed {
    ws_url: String,
    symbol: String,
    reconnect_delay: Duration,
    ping_interval: Duration,
}

impl BinanceFeed {
    /// Create a new Binance feed from the feed configuration
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            ws_url: config.ws_url.clone(),
            symbol: config.symbol.to_lowercase(),
            reconnect_delay: Duration::from_secs(config.reconnect_delay_secs),
            ping_interval: Duration::from_secs(config.ping_interval_secs),
        }
    }

    /// Build the WebSocket URL for the ticker stream
    fn stream_url(&self) -> String {
        format!("{}/{}@ticker", self.ws_url, self.symbol)
    }

    /// Extract the best ask from a ticker message
    ///
    /// Messages without a parseable, positive ask are dropped; a zero ask
    /// would make the spread percentage undefined.
    fn parse_best_ask(msg: &str) -> Option<Decimal> {
        let ticker: TickerMessage = serde_json::from_str(msg).ok()?;
        let ask = Decimal::from_str(&ticker.best_ask).ok()?;
        if ask <= Decimal::ZERO {
            return None;
        }
        Some(ask)
    }

    /// Spawn the feed task
    ///
    /// The task owns the WebSocket connection (including reconnection) and
    /// publishes every usable ask into the cell. It only talks to the rest of
    /// the process through that cell.
    pub fn spawn(&self, cell: PriceCell) -> JoinHandle<()> {
        let config = WsConfig::new(self.stream_url())
            .reconnect(ReconnectPolicy::fixed(self.reconnect_delay))
            .ping_interval(self.ping_interval);

        tracing::info!(symbol = %self.symbol, "Subscribing to Binance ticker feed");

        let client = WsClient::new(config);
        let ws_rx = client.connect();

        tokio::spawn(async move {
            Self::run_message_loop(ws_rx, cell).await;
        })
    }

    /// Run the message processing loop
    async fn run_message_loop(mut ws_rx: mpsc::Receiver<WsMessage>, cell: PriceCell) {
        while let Some(msg) = ws_rx.recv().await {
            match msg {
                WsMessage::Text(text) => match Self::parse_best_ask(&text) {
                    Some(ask) => cell.set(ask),
                    None => {
                        tracing::debug!(
                            payload_len = text.len(),
                            "Dropping feed message without a usable ask"
                        );
                    }
                },
                WsMessage::Connected => {
                    tracing::info!("Binance feed connected");
                }
                WsMessage::Reconnecting { attempt } => {
                    tracing::warn!(attempt, "Binance feed reconnecting...");
                }
            }
        }
    }
}
