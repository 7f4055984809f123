//! HTTP endpoint tests for the dashboard router.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use tower::ServiceExt;

use pnl_dashboard::api;
use pnl_dashboard::exchange::TradeFill;
use pnl_dashboard::service::{new_dashboard_state, DashboardState};
use pnl_dashboard::stats;

fn sample_fills() -> Vec<TradeFill> {
    vec![
        TradeFill {
            time: Utc.with_ymd_and_hms(2025, 7, 24, 9, 30, 0).unwrap(),
            realized_pnl: dec!(100),
            fee: dec!(1),
        },
        TradeFill {
            time: Utc.with_ymd_and_hms(2025, 7, 25, 11, 0, 0).unwrap(),
            realized_pnl: dec!(-50),
            fee: dec!(0.5),
        },
        TradeFill {
            time: Utc.with_ymd_and_hms(2025, 7, 25, 15, 45, 0).unwrap(),
            realized_pnl: dec!(25),
            fee: dec!(0.25),
        },
    ]
}

async fn app_with_live_data() -> (Router, DashboardState) {
    let state = new_dashboard_state("synthetic");
    {
        let mut snap = state.write().await;
        snap.apply_success(stats::aggregate(&sample_fills()), Utc::now());
    }
    (api::create_router(state.clone()), state)
}

async fn get_json(app: Router, uri: &str) -> serde_json::Value {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_index_serves_dashboard_page() {
    let (app, _) = app_with_live_data().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body.to_vec()).unwrap();

    assert!(body_str.contains("<!DOCTYPE html>"));
    assert!(body_str.contains("profitChart"));
    assert!(body_str.contains("profitTableBody"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = app_with_live_data().await;

    let body = get_json(app, "/api/health").await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_summary_before_first_poll() {
    let state = new_dashboard_state("bingx");
    let app = api::create_router(state);

    let body = get_json(app, "/api/summary").await;

    assert_eq!(body["data_state"], "starting");
    assert_eq!(body["source"], "bingx");
    assert!(body["summary"].is_null());
    assert!(body["error"].is_null());
    assert!(body["fetched_at"].is_null());
}

#[tokio::test]
async fn test_summary_with_live_data() {
    let (app, _) = app_with_live_data().await;

    let body = get_json(app, "/api/summary").await;

    assert_eq!(body["data_state"], "live");
    assert!(body["fetched_at"].is_string());

    let summary = &body["summary"];
    assert_eq!(summary["total_profit"], "75");
    assert_eq!(summary["total_fees"], "1.75");
    assert_eq!(summary["total_trades"], 3);
    assert_eq!(summary["winning_trades"], 2);
    assert_eq!(summary["win_rate_percent"], "66.67");
    assert_eq!(summary["projected_monthly_profit"], "1125.00");
    assert_eq!(summary["projection_window_days"], 2);

    let days = summary["recent_days"].as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], "2025-07-24");
    assert_eq!(days[1]["date"], "2025-07-25");
}

#[tokio::test]
async fn test_daily_feed_is_ascending() {
    let (app, _) = app_with_live_data().await;

    let body = get_json(app, "/api/daily").await;
    let rows = body.as_array().unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["date"], "2025-07-24");
    assert_eq!(rows[0]["profit"], "100");
    assert_eq!(rows[1]["date"], "2025-07-25");
    assert_eq!(rows[1]["profit"], "-25");
}

#[tokio::test]
async fn test_summary_keeps_stale_data_when_unavailable() {
    let (app, state) = app_with_live_data().await;
    {
        let mut snap = state.write().await;
        snap.apply_failure("connection refused".to_string(), Utc::now());
    }

    let body = get_json(app, "/api/summary").await;

    assert_eq!(body["data_state"], "unavailable");
    assert_eq!(body["error"], "connection refused");
    // Stale report stays visible next to the error
    assert_eq!(body["summary"]["total_trades"], 3);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let (app, _) = app_with_live_data().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
