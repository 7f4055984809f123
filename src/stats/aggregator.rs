//! Per-day PnL aggregation: a pure transform from a list of fills to daily
//! buckets and summary statistics. No clock access, no I/O.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use crate::exchange::TradeFill;

/// Distinct trading dates shown in the table and the chart
pub const DISPLAY_WINDOW_DAYS: usize = 10;

/// Distinct trading dates feeding the monthly projection
pub const PROJECTION_WINDOW_DAYS: usize = 7;

const MONTH_DAYS: Decimal = dec!(30);

/// Accumulated totals for one UTC calendar day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayBucket {
    pub profit: Decimal,
    pub fees: Decimal,
}

/// One row of the daily series handed to the table and the chart
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPnl {
    pub date: NaiveDate,
    pub profit: Decimal,
    pub fees: Decimal,
}

/// Read-only snapshot of aggregated account performance
#[derive(Debug, Clone, PartialEq)]
pub struct PnlSummary {
    pub total_profit: Decimal,
    pub total_fees: Decimal,
    pub total_trades: usize,
    pub winning_trades: usize,

    /// Fraction of fills with positive realized PnL, `None` without fills
    pub win_rate: Option<Decimal>,

    /// Trailing daily average scaled to 30 days, 2 dp, `None` without fills
    pub projected_monthly_profit: Option<Decimal>,

    /// Distinct dates the projection actually averaged over (0..=7)
    pub projection_window_days: u32,

    /// The most recent distinct trading dates, oldest first
    pub recent_days: Vec<DailyPnl>,
}

impl PnlSummary {
    /// Win rate as a percentage, rounded to 2 decimal places
    pub fn win_rate_percent(&self) -> Option<Decimal> {
        self.win_rate.map(|r| (r * dec!(100)).round_dp(2))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PnlReport {
    pub summary: PnlSummary,
    pub days: BTreeMap<NaiveDate, DayBucket>,
}

/// Aggregates an unordered slice of fills into per-day buckets and summary
/// statistics.
///
/// Empty input yields `None` for win rate and projection rather than zeros
/// pretending to be data.
pub fn aggregate(fills: &[TradeFill]) -> PnlReport {
    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    let mut total_profit = Decimal::ZERO;
    let mut total_fees = Decimal::ZERO;
    let mut winning_trades = 0usize;

    for fill in fills {
        let bucket = days.entry(fill.time.date_naive()).or_default();
        bucket.profit += fill.realized_pnl;
        bucket.fees += fill.fee;

        total_profit += fill.realized_pnl;
        total_fees += fill.fee;
        if fill.realized_pnl > Decimal::ZERO {
            winning_trades += 1;
        }
    }

    let total_trades = fills.len();
    let win_rate = if total_trades == 0 {
        None
    } else {
        Some(Decimal::from(winning_trades) / Decimal::from(total_trades))
    };

    // Selected newest-first, presented oldest-first
    let mut recent_days: Vec<DailyPnl> = days
        .iter()
        .rev()
        .take(DISPLAY_WINDOW_DAYS)
        .map(|(date, bucket)| DailyPnl {
            date: *date,
            profit: bucket.profit,
            fees: bucket.fees,
        })
        .collect();
    recent_days.reverse();

    // The projection averages over the distinct dates actually present in
    // the trailing window (1..=7); the divisor used is reported alongside
    // the result.
    let window: Vec<Decimal> = days
        .values()
        .rev()
        .take(PROJECTION_WINDOW_DAYS)
        .map(|bucket| bucket.profit)
        .collect();
    let projection_window_days = window.len() as u32;
    let projected_monthly_profit = if window.is_empty() {
        None
    } else {
        let sum: Decimal = window.iter().sum();
        let avg = sum / Decimal::from(window.len());
        Some((avg * MONTH_DAYS).round_dp(2))
    };

    PnlReport {
        summary: PnlSummary {
            total_profit,
            total_fees,
            total_trades,
            winning_trades,
            win_rate,
            projected_monthly_profit,
            projection_window_days,
            recent_days,
        },
        days,
    }
}
