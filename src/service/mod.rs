pub mod state;

pub use state::{new_dashboard_state, DashboardState, DataState, Snapshot};

use crate::exchange::TradeSource;
use crate::stats;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Poll interval must be greater than zero")]
    ZeroInterval,
}

/// Polls the trade source on a fixed interval and publishes the aggregated
/// snapshot for the HTTP layer. One outstanding request at a time.
pub struct PollService {
    source: Arc<dyn TradeSource>,
    state: DashboardState,
    interval: Duration,
    shutdown_tx: broadcast::Sender<()>,
}

impl PollService {
    pub fn new(
        source: Arc<dyn TradeSource>,
        state: DashboardState,
        interval: Duration,
    ) -> Result<Self, ServiceError> {
        // A zero period would panic tokio's interval timer
        if interval.is_zero() {
            return Err(ServiceError::ZeroInterval);
        }
        let (shutdown_tx, _) = broadcast::channel(1);
        Ok(Self {
            source,
            state,
            interval,
            shutdown_tx,
        })
    }

    pub fn get_shutdown_tx(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Runs until a shutdown signal arrives. The first poll fires
    /// immediately, then once per interval.
    pub async fn start(&self) {
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let mut ticker = tokio::time::interval(self.interval);

        info!(
            "📡 Polling '{}' every {}s",
            self.source.name(),
            self.interval.as_secs()
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
                _ = shutdown_rx.recv() => {
                    info!("Shutdown signal received, stopping poll loop");
                    break;
                }
            }
        }
    }

    /// One fetch, aggregate, publish cycle
    async fn poll_once(&self) {
        match self.source.fetch_fills().await {
            Ok(fills) => {
                let report = stats::aggregate(&fills);
                info!(
                    "✅ {} fills aggregated into {} trading days",
                    fills.len(),
                    report.days.len()
                );
                let mut snap = self.state.write().await;
                snap.apply_success(report, Utc::now());
            }
            Err(e) => {
                error!("❌ Poll of '{}' failed: {}", self.source.name(), e);
                let mut snap = self.state.write().await;
                snap.apply_failure(e.to_string(), Utc::now());
            }
        }
    }
}
