//! Configuration types for spread-watch

use rust_decimal::Decimal;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub feed: FeedConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    pub influx: InfluxConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Streaming price feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// WebSocket base URL for the exchange stream
    #[serde(default = "default_feed_ws_url")]
    pub ws_url: String,
    /// Instrument symbol (e.g., "btcusdt")
    pub symbol: String,
    /// Fixed delay between reconnection attempts
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,
    /// Keepalive ping interval
    #[serde(default = "default_ping_interval_secs")]
    pub ping_interval_secs: u64,
}

fn default_feed_ws_url() -> String {
    "wss://stream.binance.com:9443/ws".to_string()
}
fn default_reconnect_delay_secs() -> u64 {
    5
}
fn default_ping_interval_secs() -> u64 {
    30
}

/// Quoted-rate provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,

    /// Source currency of the quoted conversion
    #[serde(rename = "from", default = "default_from_currency")]
    pub from_currency: String,

    /// Target currency of the quoted conversion
    #[serde(rename = "to", default = "default_to_currency")]
    pub to_currency: String,

    /// Notional amount the quote is requested for
    #[serde(default = "default_amount")]
    pub amount: String,

    /// Trade side the quote is requested for
    #[serde(rename = "type", default = "default_trade_side")]
    pub trade_side: String,

    /// Client identification header; the provider rejects unidentified clients
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout
    #[serde(default = "default_provider_timeout_secs")]
    pub timeout_secs: u64,

    /// Elongated pause after a 429 response, before the next poll
    #[serde(default = "default_rate_limit_backoff_secs")]
    pub rate_limit_backoff_secs: u64,
}

fn default_provider_base_url() -> String {
    "https://api.mercuryo.io/v1.6/public/convert".to_string()
}
fn default_from_currency() -> String {
    "USD".to_string()
}
fn default_to_currency() -> String {
    "BTC".to_string()
}
fn default_amount() -> String {
    "100".to_string()
}
fn default_trade_side() -> String {
    "buy".to_string()
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}
fn default_provider_timeout_secs() -> u64 {
    5
}
fn default_rate_limit_backoff_secs() -> u64 {
    300
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_base_url(),
            from_currency: default_from_currency(),
            to_currency: default_to_currency(),
            amount: default_amount(),
            trade_side: default_trade_side(),
            user_agent: default_user_agent(),
            timeout_secs: default_provider_timeout_secs(),
            rate_limit_backoff_secs: default_rate_limit_backoff_secs(),
        }
    }
}

/// Spread evaluation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Lower bound of the normal band, in percent
    #[serde(default = "default_threshold_low_pct")]
    pub threshold_low_pct: Decimal,

    /// Upper bound of the normal band, in percent
    #[serde(default = "default_threshold_high_pct")]
    pub threshold_high_pct: Decimal,

    /// Sleep between evaluation cycles
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Minimum gap between two delivered alerts
    #[serde(default = "default_alert_cooldown_secs")]
    pub alert_cooldown_secs: u64,
}

fn default_threshold_low_pct() -> Decimal {
    Decimal::new(20, 2) // 0.20%
}
fn default_threshold_high_pct() -> Decimal {
    Decimal::new(5, 1) // 0.5%
}
fn default_poll_interval_secs() -> u64 {
    5
}
fn default_alert_cooldown_secs() -> u64 {
    60
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            threshold_low_pct: default_threshold_low_pct(),
            threshold_high_pct: default_threshold_high_pct(),
            poll_interval_secs: default_poll_interval_secs(),
            alert_cooldown_secs: default_alert_cooldown_secs(),
        }
    }
}

/// Alert delivery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Telegram bot token; alerts are skipped with a warning when empty
    #[serde(default)]
    pub bot_token: String,
    /// Telegram chat identifier
    #[serde(default)]
    pub chat_id: String,
    /// Per-delivery timeout
    #[serde(default = "default_notifier_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_notifier_timeout_secs() -> u64 {
    5
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            timeout_secs: default_notifier_timeout_secs(),
        }
    }
}

/// Time-series store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InfluxConfig {
    #[serde(default = "default_influx_url")]
    pub url: String,
    pub org: String,
    pub bucket: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_measurement")]
    pub measurement: String,
    #[serde(default = "default_influx_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_influx_url() -> String {
    "http://localhost:8086".to_string()
}
fn default_measurement() -> String {
    "spread".to_string()
}
fn default_influx_timeout_secs() -> u64 {
    5
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
