/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::enums::{PublicTradeSide, TradeType};

/// Balances keyed by lower-case currency code
pub type Funds = HashMap<String, Decimal>;

// ### Trade API

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rights {
    pub info: u8,
    pub trade: u8,
    #[serde(default)]
    pub withdraw: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub funds: Funds,
    pub rights: Rights,
    #[serde(default)]
    pub transaction_count: u64,
    #[serde(default)]
    pub open_orders: u64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub server_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResult {
    pub received: Decimal,
    pub remains: Decimal,
    /// 0 when the order was filled immediately
    pub order_id: u64,
    pub funds: Funds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderResult {
    pub order_id: u64,
    pub funds: Funds,
}

/// Entry of `ActiveOrders` and `OrderInfo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub pair: String,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    /// Only reported by `OrderInfo`
    #[serde(default)]
    pub start_amount: Option<Decimal>,
    pub amount: Decimal,
    pub rate: Decimal,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp_created: DateTime<Utc>,
    /// 0 active, 1 executed, 2 cancelled, 3 partially cancelled
    pub status: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub pair: String,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    pub amount: Decimal,
    pub rate: Decimal,
    pub order_id: u64,
    pub is_your_order: u8,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// 1 deposit, 2 withdrawal, 4/5 credit, otherwise exchange-defined
    #[serde(rename = "type")]
    pub kind: u8,
    pub amount: Decimal,
    pub currency: String,
    pub desc: String,
    pub status: u8,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
}

/// Orders keyed by order id
pub type Orders = HashMap<String, OrderDetails>;
/// Trades keyed by trade id
pub type TradeHistory = HashMap<String, TradeRecord>;
/// Transactions keyed by transaction id
pub type TransHistory = HashMap<String, Transaction>;

// ### Public API

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairInfo {
    pub decimal_places: u32,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub min_amount: Decimal,
    #[serde(default)]
    pub hidden: u8,
    pub fee: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeInfo {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub server_time: DateTime<Utc>,
    pub pairs: HashMap<String, PairInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub high: Decimal,
    pub low: Decimal,
    pub avg: Decimal,
    pub vol: Decimal,
    pub vol_cur: Decimal,
    pub last: Decimal,
    pub buy: Decimal,
    pub sell: Decimal,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub updated: DateTime<Utc>,
}

/// `[price, amount]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel(pub Decimal, pub Decimal);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depth {
    pub asks: Vec<DepthLevel>,
    pub bids: Vec<DepthLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicTrade {
    #[serde(rename = "type")]
    pub side: PublicTradeSide,
    pub price: Decimal,
    pub amount: Decimal,
    pub tid: u64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairFee {
    pub trade: Decimal,
}

/// Public responses are keyed by pair name (`btc_usd`, ...)
pub type PerPair<T> = HashMap<String, T>;
