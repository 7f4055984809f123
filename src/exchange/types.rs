// =================================================================
// exchange/types.rs - Wire and Domain Types
// =================================================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// One executed trade, normalized for aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct TradeFill {
    /// Execution time (UTC)
    pub time: DateTime<Utc>,

    /// Realized profit or loss of the fill
    pub realized_pnl: Decimal,

    /// Trading fee charged for the fill, non-negative
    pub fee: Decimal,
}

/// Envelope wrapped around every REST payload
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: i64,

    #[serde(default)]
    pub msg: String,

    pub data: Option<T>,
}

/// Raw trade-history record as the endpoint returns it
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TradeHistoryRow {
    /// Fill time: RFC 3339 string or epoch milliseconds
    pub time: RawTimestamp,

    /// Realized PnL: JSON number or numeric string
    pub realized_pnl: Decimal,

    /// Fee: JSON number or numeric string, absent means zero
    #[serde(default)]
    pub fee: Decimal,
}

/// Exchanges emit timestamps both as strings and as millisecond numbers
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum RawTimestamp {
    Millis(i64),
    Text(String),
}
