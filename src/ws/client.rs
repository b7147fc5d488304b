//! WebSocket client with automatic reconnection

use super::types::{WsConfig, WsError, WsMessage};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// Reusable WebSocket client with unbounded reconnection and ping/pong handling
pub struct WsClient {
    config: WsConfig,
}

impl WsClient {
    /// Create a new WebSocket client with the given configuration
    pub fn new(config: WsConfig) -> Self {
        Self { config }
    }

    /// Create a new client with just a URL using default config
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::new(WsConfig::new(url))
    }

    /// Get the configured URL
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Connect and return a receiver for messages
    ///
    /// Spawns a background task that owns the connection. Any close or error
    /// triggers a reconnect after the policy's fixed delay, indefinitely; the
    /// task only stops once the returned receiver is dropped.
    pub fn connect(&self) -> mpsc::Receiver<WsMessage> {
        let (tx, rx) = mpsc::channel(1024);
        let config = self.config.clone();

        tokio::spawn(async move {
            Self::run_connection_loop(config, tx).await;
        });

        rx
    }

    /// Run the connection loop with unbounded reconnection
    async fn run_connection_loop(config: WsConfig, tx: mpsc::Sender<WsMessage>) {
        let mut attempt = 0u32;

        loop {
            match Self::connect_and_stream(&config, &tx).await {
                Ok(()) => {
                    // Receiver dropped, nobody is listening anymore
                    tracing::debug!("WebSocket receiver dropped, stopping");
                    return;
                }
                Err(e) => {
                    if tx.is_closed() {
                        tracing::debug!("WebSocket receiver dropped, stopping reconnection");
                        return;
                    }

                    attempt += 1;
                    let delay = config.reconnect.delay_before(attempt);
                    tracing::warn!(
                        error = %e,
                        attempt,
                        delay_secs = delay.as_secs(),
                        "WebSocket connection lost, reconnecting..."
                    );

                    let _ = tx.send(WsMessage::Reconnecting { attempt }).await;
                    sleep(delay).await;
                }
            }
        }
    }

    /// Connect to the WebSocket and stream messages until close or error
    ///
    /// Returns `Ok(())` only when the receiver has been dropped; a clean close
    /// from the server is an error like any other so the caller reconnects.
    async fn connect_and_stream(
        config: &WsConfig,
        tx: &mpsc::Sender<WsMessage>,
    ) -> Result<(), WsError> {
        tracing::info!(url = %config.url, "Connecting to WebSocket");

        let (ws_stream, _response) = connect_async(&config.url)
            .await
            .map_err(|e| WsError::ConnectionFailed(e.to_string()))?;

        let (mut write, mut read) = ws_stream.split();

        tracing::info!("WebSocket connected");

        if tx.send(WsMessage::Connected).await.is_err() {
            return Ok(());
        }

        let mut ping_interval = tokio::time::interval(config.ping_interval);
        ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Pong must arrive before the next ping tick
        let mut waiting_for_pong = false;

        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            if tx.send(WsMessage::Text(text)).await.is_err() {
                                tracing::debug!("Receiver dropped, closing connection");
                                return Ok(());
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            write.send(Message::Pong(data)).await
                                .map_err(|e| WsError::SendFailed(e.to_string()))?;
                        }
                        Some(Ok(Message::Pong(_))) => {
                            waiting_for_pong = false;
                        }
                        Some(Ok(Message::Close(_))) => {
                            return Err(WsError::ConnectionFailed("server closed the connection".into()));
                        }
                        Some(Err(e)) => {
                            return Err(WsError::ConnectionFailed(e.to_string()));
                        }
                        None => {
                            return Err(WsError::ConnectionFailed("stream ended unexpectedly".into()));
                        }
                        _ => {}
                    }
                }

                _ = ping_interval.tick() => {
                    if waiting_for_pong {
                        return Err(WsError::ConnectionFailed("pong timeout".into()));
                    }
                    write.send(Message::Ping(vec![])).await
                        .map_err(|e| WsError::SendFailed(e.to_string()))?;
                    waiting_for_pong = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ws::ReconnectPolicy;
    use std::time::Duration;

    #[test]
    fn test_ws_client_creation() {
        let client = WsClient::with_url("wss://example.com");
        assert_eq!(client.url(), "wss://example.com");
    }

    #[test]
    fn test_ws_client_with_config() {
        let config = WsConfig::new("wss://test.com")
            .reconnect(ReconnectPolicy::fixed(Duration::from_secs(5)))
            .ping_interval(Duration::from_secs(15));

        let client = WsClient::new(config);
        assert_eq!(client.url(), "wss://test.com");
        assert_eq!(client.config.ping_interval, Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_ws_client_keeps_retrying_unreachable_host() {
        let client = WsClient::new(
            WsConfig::new("wss://invalid.localhost.test:12345")
                .reconnect(ReconnectPolicy::fixed(Duration::from_millis(10))),
        );

        let mut rx = client.connect();

        // The client never gives up: it keeps announcing reconnection attempts
        let mut attempts_seen = 0;
        let timeout = tokio::time::timeout(Duration::from_secs(5), async {
            while let Some(msg) = rx.recv().await {
                if let WsMessage::Reconnecting { attempt } = msg {
                    attempts_seen = attempt;
                    if attempt >= 3 {
                        break;
                    }
                }
            }
        });

        timeout.await.expect("Test timed out");
        assert!(attempts_seen >= 3, "Should keep reconnecting indefinitely");
    }
}
