/*
[INPUT]:  Raw JSON response bodies from both endpoints
[OUTPUT]: Tagged outcomes (success / invalid nonce / failure)
[POS]:    Data layer - response envelope classification
[UPDATE]: When the exchange changes its error envelope or nonce message
*/

use serde_json::Value;

use crate::http::{BtceError, Result};

/// Substring the exchange puts in every nonce rejection
pub const INVALID_NONCE_MARKER: &str = "invalid nonce parameter";

/// Classified trade API response
#[derive(Debug, Clone, PartialEq)]
pub enum TradeOutcome {
    /// `return` field of a successful call (`null` when absent)
    Success(Value),
    /// Nonce rejected; `expected` is the value the server reported
    InvalidNonce { expected: u64, payload: Value },
    /// Any other non-empty `error`
    Failed { message: String, payload: Value },
}

impl TradeOutcome {
    /// Classify a trade API body. Fails only when a nonce rejection does not
    /// carry a parsable nonce.
    pub fn classify(payload: Value) -> Result<Self> {
        let Some(message) = error_message(&payload) else {
            let result = match payload {
                Value::Object(mut map) => map.remove("return").unwrap_or(Value::Null),
                _ => Value::Null,
            };
            return Ok(TradeOutcome::Success(result));
        };

        if !message.contains(INVALID_NONCE_MARKER) {
            return Ok(TradeOutcome::Failed { message, payload });
        }

        match parse_expected_nonce(&message) {
            Some(expected) => Ok(TradeOutcome::InvalidNonce { expected, payload }),
            None => Err(BtceError::NonceResync { message, payload }),
        }
    }
}

/// Public API bodies are handed back whole unless they carry an `error`.
pub fn check_public_response(payload: Value) -> Result<Value> {
    match error_message(&payload) {
        Some(message) => Err(BtceError::Remote { message, payload }),
        None => Ok(payload),
    }
}

/// Non-empty `error` field, if any. `false` and `0` count as no error.
pub fn error_message(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Integer after the last `:` of a nonce rejection message. A value the
/// counter cannot step past is treated as unparsable.
pub fn parse_expected_nonce(message: &str) -> Option<u64> {
    let (_, tail) = message.rsplit_once(':')?;
    let expected: u64 = tail.trim().parse().ok()?;
    expected.checked_add(1).map(|_| expected)
}
