//! Quoted-rate polling
//!
//! One bounded HTTP request per evaluation cycle against the conversion
//! provider, with a typed error taxonomy so the caller can tell a rate limit
//! apart from ordinary transport failures.

mod mercuryo;

pub use mercuryo::MercuryoClient;

use thiserror::Error;

/// Failures of a single rate poll; none are fatal to the evaluation loop
#[derive(Debug, Error)]
pub enum RateError {
    /// Provider answered with an unexpected status
    #[error("provider error {status}: {body}")]
    Provider { status: u16, body: String },

    /// Provider answered 429; the caller applies the elongated backoff
    #[error("provider rate limit hit")]
    RateLimited,

    /// Network or timeout failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body was not parseable as the expected structure
    #[error("unparseable provider response: {0}")]
    MalformedResponse(String),

    /// Neither lookup location carried a rate field
    #[error("no rate field in provider response")]
    MissingRate,

    /// A rate field was present but not decimal-parseable
    #[error("unparseable rate value: {0}")]
    InvalidRate(String),
}
