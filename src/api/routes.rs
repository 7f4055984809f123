use axum::Router;

use crate::service::DashboardState;

use super::handlers;

pub fn create_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", axum::routing::get(handlers::index))
        .route("/api/summary", axum::routing::get(handlers::get_summary))
        .route("/api/daily", axum::routing::get(handlers::get_daily))
        .route("/api/health", axum::routing::get(handlers::health))
        .with_state(state)
}
