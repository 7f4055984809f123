// =================================================================
// exchange/utils.rs - Wire Conversion
// =================================================================

use super::errors::ExchangeError;
use super::types::{RawTimestamp, TradeFill, TradeHistoryRow};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Convert a raw trade-history record into a normalized fill
pub fn convert_history_row(row: TradeHistoryRow) -> Result<TradeFill, ExchangeError> {
    let time = parse_timestamp(&row.time)?;

    // Fees are deductions reported as magnitudes
    if row.fee < Decimal::ZERO {
        return Err(ExchangeError::Parse(format!(
            "Fee must be non-negative, got {}",
            row.fee
        )));
    }

    Ok(TradeFill {
        time,
        realized_pnl: row.realized_pnl,
        fee: row.fee,
    })
}

fn parse_timestamp(raw: &RawTimestamp) -> Result<DateTime<Utc>, ExchangeError> {
    match raw {
        RawTimestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms)
            .ok_or_else(|| ExchangeError::Parse(format!("Invalid timestamp {}", ms))),
        RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ExchangeError::Parse(format!("Invalid timestamp '{}': {}", text, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rfc3339_timestamp() {
        let row: TradeHistoryRow =
            serde_json::from_str(r#"{"time": "2025-07-25T10:00:00Z", "realizedPnl": 100, "fee": 1}"#)
                .unwrap();
        let fill = convert_history_row(row).unwrap();

        assert_eq!(fill.time, Utc.with_ymd_and_hms(2025, 7, 25, 10, 0, 0).unwrap());
        assert_eq!(fill.realized_pnl, dec!(100));
        assert_eq!(fill.fee, dec!(1));
    }

    #[test]
    fn test_millis_timestamp() {
        let row: TradeHistoryRow =
            serde_json::from_str(r#"{"time": 1753437600000, "realizedPnl": -50, "fee": 0.5}"#)
                .unwrap();
        let fill = convert_history_row(row).unwrap();

        assert_eq!(fill.time, Utc.with_ymd_and_hms(2025, 7, 25, 10, 0, 0).unwrap());
        assert_eq!(fill.realized_pnl, dec!(-50));
    }

    #[test]
    fn test_numeric_strings() {
        let row: TradeHistoryRow = serde_json::from_str(
            r#"{"time": "2025-07-25T10:00:00Z", "realizedPnl": "75.25", "fee": "0.8"}"#,
        )
        .unwrap();
        let fill = convert_history_row(row).unwrap();

        assert_eq!(fill.realized_pnl, dec!(75.25));
        assert_eq!(fill.fee, dec!(0.8));
    }

    #[test]
    fn test_missing_fee_defaults_to_zero() {
        let row: TradeHistoryRow =
            serde_json::from_str(r#"{"time": "2025-07-25T10:00:00Z", "realizedPnl": 10}"#).unwrap();
        let fill = convert_history_row(row).unwrap();

        assert_eq!(fill.fee, Decimal::ZERO);
    }

    #[test]
    fn test_negative_fee_rejected() {
        let row: TradeHistoryRow = serde_json::from_str(
            r#"{"time": "2025-07-25T10:00:00Z", "realizedPnl": 10, "fee": -0.5}"#,
        )
        .unwrap();

        assert!(matches!(
            convert_history_row(row),
            Err(ExchangeError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_timestamp_rejected() {
        let row: TradeHistoryRow =
            serde_json::from_str(r#"{"time": "not a date", "realizedPnl": 10, "fee": 0}"#).unwrap();

        assert!(matches!(
            convert_history_row(row),
            Err(ExchangeError::Parse(_))
        ));
    }
}
