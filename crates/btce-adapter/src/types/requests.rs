/*
[INPUT]:  Caller-supplied method arguments
[OUTPUT]: Ordered form parameters and public request descriptors
[POS]:    Data layer - request shaping for both API endpoints
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use url::form_urlencoded;

use super::enums::{SortOrder, TradeType};
use crate::http::{BtceError, Result};

/// Default `limit` query value for public methods
pub const DEFAULT_PUBLIC_LIMIT: u32 = 150;

const NONCE_KEY: &str = "nonce";

/// Form parameters of a trade API call, kept in insertion order.
///
/// Keys without a value are still sent, as `key=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: Vec<(String, Option<String>)>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Params for a named trade API method
    pub fn for_method(method: &str) -> Self {
        let mut params = Self::new();
        params.insert("method", method);
        params
    }

    /// Set a key, keeping its original position if already present
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.set(key.into(), Some(value.to_string()));
        self
    }

    /// Set a key that may have no value
    pub fn insert_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        self.set(key.into(), value.map(|v| v.to_string()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// URL-encoded form body
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            serializer.append_pair(key, value.as_deref().unwrap_or(""));
        }
        serializer.finish()
    }

    /// Form body with `nonce` stamped in; `self` is left untouched so a
    /// retry starts again from the caller's params.
    pub(crate) fn encode_with_nonce(&self, nonce: u64) -> String {
        let mut stamped = self.clone();
        stamped.insert(NONCE_KEY, nonce);
        stamped.encode()
    }

    fn set(&mut self, key: String, value: Option<String>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

/// Filters shared by `TransHistory` and `TradeHistory`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub from: Option<u64>,
    pub count: Option<u32>,
    pub from_id: Option<u64>,
    pub end_id: Option<u64>,
    pub order: Option<SortOrder>,
    pub since: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl HistoryFilter {
    pub(crate) fn append_to(&self, params: &mut RequestParams) {
        params
            .insert_opt("from", self.from)
            .insert_opt("count", self.count)
            .insert_opt("from_id", self.from_id)
            .insert_opt("end_id", self.end_id)
            .insert_opt("order", self.order)
            .insert_opt("since", self.since.map(|t| t.timestamp()))
            .insert_opt("end", self.end.map(|t| t.timestamp()));
    }
}

/// Arguments of the `Trade` method. All four are required; they are
/// optional here so a partially filled request fails with the missing
/// field's name instead of at compile time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeRequest {
    pub pair: Option<String>,
    pub trade_type: Option<TradeType>,
    pub rate: Option<Decimal>,
    pub amount: Option<Decimal>,
}

impl TradeRequest {
    pub fn new(pair: impl Into<String>, trade_type: TradeType, rate: Decimal, amount: Decimal) -> Self {
        Self {
            pair: Some(pair.into()),
            trade_type: Some(trade_type),
            rate: Some(rate),
            amount: Some(amount),
        }
    }

    pub(crate) fn into_params(self) -> Result<RequestParams> {
        let pair = self
            .pair
            .filter(|p| !p.is_empty())
            .ok_or(BtceError::MissingArgument("pair"))?;
        let trade_type = self.trade_type.ok_or(BtceError::MissingArgument("type"))?;
        let rate = self
            .rate
            .filter(|r| !r.is_zero())
            .ok_or(BtceError::MissingArgument("rate"))?;
        let amount = self
            .amount
            .filter(|a| !a.is_zero())
            .ok_or(BtceError::MissingArgument("amount"))?;

        let mut params = RequestParams::for_method("Trade");
        params
            .insert("pair", pair)
            .insert("type", trade_type)
            .insert("rate", rate)
            .insert("amount", amount);
        Ok(params)
    }
}

/// A public market-data call: `{base}/{method}/{pair}?limit={limit}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicRequest {
    pub method: String,
    pub pair: Option<String>,
    pub limit: u32,
}

impl PublicRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            pair: None,
            limit: DEFAULT_PUBLIC_LIMIT,
        }
    }

    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Relative path below the public base URL
    pub(crate) fn path(&self) -> Result<String> {
        if self.method.is_empty() {
            return Err(BtceError::MissingArgument("method"));
        }
        Ok(match self.pair.as_deref() {
            Some(pair) if !pair.is_empty() => format!("{}/{}", self.method, pair),
            _ => self.method.clone(),
        })
    }
}
