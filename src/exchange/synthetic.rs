// =================================================================
// exchange/synthetic.rs - Deterministic Sample Source
// =================================================================

use super::errors::ExchangeError;
use super::types::TradeFill;
use super::TradeSource;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixed (pnl, fee) pairs, one fill per day walking backwards from the anchor
const SAMPLE_TRADES: [(Decimal, Decimal); 10] = [
    (dec!(100), dec!(1)),
    (dec!(-50), dec!(0.5)),
    (dec!(75), dec!(0.8)),
    (dec!(120), dec!(1.2)),
    (dec!(-30), dec!(0.4)),
    (dec!(200), dec!(2)),
    (dec!(50), dec!(0.7)),
    (dec!(-20), dec!(0.3)),
    (dec!(80), dec!(0.9)),
    (dec!(150), dec!(1.5)),
];

/// Sample dataset for running the dashboard without credentials.
/// Ten fills at 10:00 UTC on consecutive days, newest on the anchor date.
pub struct SyntheticSource {
    anchor: NaiveDate,
}

impl SyntheticSource {
    /// Anchors the newest fill on yesterday, keeping all fills in the past
    pub fn new() -> Self {
        Self::anchored(Utc::now().date_naive() - Duration::days(1))
    }

    pub fn anchored(anchor: NaiveDate) -> Self {
        Self { anchor }
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TradeSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    async fn fetch_fills(&self) -> Result<Vec<TradeFill>, ExchangeError> {
        let fills = SAMPLE_TRADES
            .iter()
            .enumerate()
            .map(|(i, (pnl, fee))| {
                let date = self.anchor - Duration::days(i as i64);
                TradeFill {
                    time: date.and_time(NaiveTime::MIN).and_utc() + Duration::hours(10),
                    realized_pnl: *pnl,
                    fee: *fee,
                }
            })
            .collect();
        Ok(fills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 25).unwrap()
    }

    #[tokio::test]
    async fn test_ten_fills_walking_backwards() {
        let fills = SyntheticSource::anchored(anchor()).fetch_fills().await.unwrap();

        assert_eq!(fills.len(), 10);
        assert_eq!(
            fills[0].time,
            Utc.with_ymd_and_hms(2025, 7, 25, 10, 0, 0).unwrap()
        );
        assert_eq!(
            fills[9].time,
            Utc.with_ymd_and_hms(2025, 7, 16, 10, 0, 0).unwrap()
        );
        assert_eq!(fills[0].realized_pnl, dec!(100));
        assert_eq!(fills[9].realized_pnl, dec!(150));
    }

    #[tokio::test]
    async fn test_deterministic() {
        let source = SyntheticSource::anchored(anchor());
        let a = source.fetch_fills().await.unwrap();
        let b = source.fetch_fills().await.unwrap();

        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_sample_totals() {
        let fills = SyntheticSource::anchored(anchor()).fetch_fills().await.unwrap();

        let total: Decimal = fills.iter().map(|f| f.realized_pnl).sum();
        let fees: Decimal = fills.iter().map(|f| f.fee).sum();
        assert_eq!(total, dec!(675));
        assert_eq!(fees, dec!(9.3));
    }
}
