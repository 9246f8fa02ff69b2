/*
[INPUT]:  Error sources (preconditions, remote API, transport, serialization)
[OUTPUT]: Structured error types carrying the raw response payload
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use serde_json::Value;
use thiserror::Error;

/// Main error type for the BTC-e adapter
#[derive(Error, Debug)]
pub enum BtceError {
    /// A credential needed for a signed request was not configured.
    /// Names the `Credentials` field (`secret_key` / `public_key`).
    #[error("Missing {0}")]
    MissingCredential(&'static str),

    /// A required method argument was absent or empty
    #[error("Missing {0}")]
    MissingArgument(&'static str),

    /// API returned a non-empty `error` field
    #[error("API error: {message}")]
    Remote { message: String, payload: Value },

    /// Server rejected the nonce but did not say which one it expects
    #[error("Cannot resynchronize nonce from error: {message}")]
    NonceResync { message: String, payload: Value },

    /// Nonce counter reached `u64::MAX`
    #[error("Nonce counter exhausted")]
    NonceOverflow,

    /// Nonce kept being rejected after the configured number of resyncs
    #[error("Nonce rejected after {attempts} resynchronizations")]
    NonceRetriesExhausted { attempts: u32, payload: Value },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// HMAC key setup failed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BtceError {
    /// Check if the error was raised before any request was sent
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            BtceError::MissingCredential(_) | BtceError::MissingArgument(_)
        )
    }

    /// Check if the error is retryable
    ///
    /// Only transport failures qualify; the client never retries them itself.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BtceError::Http(_))
    }

    /// Raw response body for errors reported by the exchange
    pub fn payload(&self) -> Option<&Value> {
        match self {
            BtceError::Remote { payload, .. }
            | BtceError::NonceResync { payload, .. }
            | BtceError::NonceRetriesExhausted { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

/// Result type alias for BTC-e operations
pub type Result<T> = std::result::Result<T, BtceError>;
