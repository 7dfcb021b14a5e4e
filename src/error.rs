//! Crate-wide error type.
//!
//! Three failure classes cross this crate's boundary: transport failures
//! (propagated unchanged from `reqwest`), application-level error envelopes
//! (the response is valid JSON but carries a top-level `error` field), and
//! local assertions such as a continuation cursor that stops advancing.
//! Shape mismatches inside parsing are *not* errors: they degrade to
//! defaults via [`crate::nav`].

use http::header::{InvalidHeaderValue, MaxSizeReached};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Application-level error envelope returned by the API.
    #[error("API error: {0}")]
    Api(String),

    #[error("assertion failed: {0}")]
    Assertion(String),

    #[error("missing or invalid credentials: {0}")]
    Auth(String),

    #[error("operation was cancelled")]
    Cancelled,

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("HTTP header error: {0}")]
    HttpHeader(String),

    #[error("parsing JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("parsing URL failed: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The upstream returned the same continuation cursor it was given,
    /// which would otherwise loop forever.
    #[error("continuation cursor did not advance")]
    StalledContinuation,
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<MaxSizeReached> for Error {
    fn from(e: MaxSizeReached) -> Self {
        Self::HttpHeader(e.to_string())
    }
}

impl From<InvalidHeaderValue> for Error {
    fn from(e: InvalidHeaderValue) -> Self {
        Self::HttpHeader(e.to_string())
    }
}
