//! Mercuryo convert API client

use super::RateError;
use crate::config::ProviderConfig;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::time::Duration;

/// Client for the Mercuryo public convert endpoint
///
/// Every request carries the configured User-Agent; the provider answers 403
/// to unidentified clients.
pub struct MercuryoClient {
    client: Client,
    base_url: String,
    query: Vec<(String, String)>,
}

impl MercuryoClient {
    /// Create a new client from the provider configuration
    pub fn new(config: &ProviderConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to create HTTP client");

        let query = vec![
            ("from".to_string(), config.from_currency.clone()),
            ("to".to_string(), config.to_currency.clone()),
            ("amount".to_string(), config.amount.clone()),
            ("type".to_string(), config.trade_side.clone()),
        ];

        Self {
            client,
            base_url: config.base_url.clone(),
            query,
        }
    }

    /// Poll the quoted conversion rate once
    ///
    /// The request is bounded by the configured timeout so a hung provider
    /// cannot stall the evaluation cadence indefinitely. This call never
    /// sleeps on a 429; it surfaces `RateError::RateLimited` and leaves the
    /// backoff to the caller.
    pub async fn fetch_rate(&self) -> Result<Decimal, RateError> {
        tracing::debug!(url = %self.base_url, "Polling quoted rate");

        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::TOO_MANY_REQUESTS => return Err(RateError::RateLimited),
            status => {
                let body = response.text().await.unwrap_or_default();
                return Err(RateError::Provider {
                    status: status.as_u16(),
                    body,
                });
            }
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| RateError::MalformedResponse(e.to_string()))?;

        parse_rate(&value)
    }
}

/// Extract the quoted rate from a provider response
///
/// The rate may appear at the top level or nested under a `data` wrapper;
/// the top-level location wins when both are present.
fn parse_rate(body: &serde_json::Value) -> Result<Decimal, RateError> {
    let raw = body
        .get("rate")
        .or_else(|| body.get("data").and_then(|d| d.get("rate")))
        .ok_or(RateError::MissingRate)?;

    let text = match raw {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        other => return Err(RateError::InvalidRate(other.to_string())),
    };

    Decimal::from_str(&text).map_err(|_| RateError::InvalidRate(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_rate_top_level() {
        let body = serde_json::json!({ "rate": "50123.45" });
        assert_eq!(parse_rate(&body).unwrap(), dec!(50123.45));
    }

    #[test]
    fn test_parse_rate_nested_under_data() {
        let body = serde_json::json!({ "data": { "rate": "50123.45" } });
        assert_eq!(parse_rate(&body).unwrap(), dec!(50123.45));
    }

    #[test]
    fn test_parse_rate_top_level_wins() {
        let body = serde_json::json!({
            "rate": "50000.00",
            "data": { "rate": "49000.00" }
        });
        assert_eq!(parse_rate(&body).unwrap(), dec!(50000.00));
    }

    #[test]
    fn test_parse_rate_numeric_value() {
        let body = serde_json::json!({ "rate": 50123.45 });
        assert_eq!(parse_rate(&body).unwrap(), dec!(50123.45));
    }

    #[test]
    fn test_parse_rate_missing() {
        let body = serde_json::json!({ "data": { "currency": "BTC" } });
        assert!(matches!(parse_rate(&body), Err(RateError::MissingRate)));
    }

    #[test]
    fn test_parse_rate_unparseable() {
        let body = serde_json::json!({ "rate": "not-a-number" });
        assert!(matches!(parse_rate(&body), Err(RateError::InvalidRate(_))));
    }

    #[test]
    fn test_client_builds_fixed_query() {
        let client = MercuryoClient::new(&ProviderConfig::default());
        assert_eq!(client.query.len(), 4);
        assert_eq!(client.query[0], ("from".to_string(), "USD".to_string()));
        assert_eq!(client.query[1], ("to".to_string(), "BTC".to_string()));
        assert_eq!(client.query[2], ("amount".to_string(), "100".to_string()));
        assert_eq!(client.query[3], ("type".to_string(), "buy".to_string()));
    }
}
