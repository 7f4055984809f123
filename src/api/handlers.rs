use axum::{
    extract::State,
    response::{Html, Json},
};
use serde::Serialize;
use serde_json::json;

use crate::service::{DashboardState, DataState, Snapshot};
use crate::stats::PnlSummary;

#[derive(Debug, Serialize)]
pub struct DailyRow {
    pub date: String,
    pub profit: String,
    pub fees: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryBody {
    pub total_profit: String,
    pub total_fees: String,
    pub total_trades: usize,
    pub winning_trades: usize,
    /// Percentage with 2 decimal places, absent without trades
    pub win_rate_percent: Option<String>,
    pub projected_monthly_profit: Option<String>,
    pub projection_window_days: u32,
    /// Most recent trading dates, oldest first (chart order)
    pub recent_days: Vec<DailyRow>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub data_state: String,
    pub source: String,
    pub error: Option<String>,
    pub fetched_at: Option<String>,
    pub summary: Option<SummaryBody>,
}

impl SummaryBody {
    fn from_summary(summary: &PnlSummary) -> Self {
        Self {
            total_profit: summary.total_profit.to_string(),
            total_fees: summary.total_fees.to_string(),
            total_trades: summary.total_trades,
            winning_trades: summary.winning_trades,
            win_rate_percent: summary.win_rate_percent().map(|p| format!("{:.2}", p)),
            projected_monthly_profit: summary
                .projected_monthly_profit
                .map(|p| format!("{:.2}", p)),
            projection_window_days: summary.projection_window_days,
            recent_days: summary
                .recent_days
                .iter()
                .map(|d| DailyRow {
                    date: d.date.to_string(),
                    profit: d.profit.to_string(),
                    fees: d.fees.to_string(),
                })
                .collect(),
        }
    }
}

impl SummaryResponse {
    fn from_snapshot(snap: &Snapshot) -> Self {
        let error = match &snap.state {
            DataState::Unavailable { error, .. } => Some(error.clone()),
            _ => None,
        };
        Self {
            data_state: snap.state.as_str().to_string(),
            source: snap.source.clone(),
            error,
            fetched_at: snap.fetched_at.map(|t| t.to_rfc3339()),
            summary: snap
                .report
                .as_ref()
                .map(|r| SummaryBody::from_summary(&r.summary)),
        }
    }
}

pub async fn index() -> Html<String> {
    let html = std::fs::read_to_string("templates/dashboard.html")
        .unwrap_or_else(|_| include_str!("../../templates/dashboard.html").to_string());
    Html(html)
}

pub async fn get_summary(State(state): State<DashboardState>) -> Json<SummaryResponse> {
    let snap = state.read().await;
    Json(SummaryResponse::from_snapshot(&snap))
}

/// Chart feed: `(date, profit, fees)` rows in ascending date order
pub async fn get_daily(State(state): State<DashboardState>) -> Json<Vec<DailyRow>> {
    let snap = state.read().await;
    let rows = snap
        .report
        .as_ref()
        .map(|r| {
            r.summary
                .recent_days
                .iter()
                .map(|d| DailyRow {
                    date: d.date.to_string(),
                    profit: d.profit.to_string(),
                    fees: d.fees.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();
    Json(rows)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
