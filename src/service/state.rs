// =================================================================
// service/state.rs - Shared Dashboard State
// =================================================================

use crate::stats::PnlReport;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Lifecycle of the data behind the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum DataState {
    /// No poll has completed yet
    Starting,

    /// The last poll succeeded
    Live,

    /// The last poll failed; any retained report is stale
    Unavailable {
        error: String,
        failed_at: DateTime<Utc>,
    },
}

impl DataState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataState::Starting => "starting",
            DataState::Live => "live",
            DataState::Unavailable { .. } => "unavailable",
        }
    }
}

/// What the renderer sees: the current state plus the last good report
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub state: DataState,
    pub report: Option<PnlReport>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub source: String,
}

impl Snapshot {
    pub fn starting(source: &str) -> Self {
        Self {
            state: DataState::Starting,
            report: None,
            fetched_at: None,
            source: source.to_string(),
        }
    }

    pub fn apply_success(&mut self, report: PnlReport, at: DateTime<Utc>) {
        self.state = DataState::Live;
        self.report = Some(report);
        self.fetched_at = Some(at);
    }

    /// The previous report stays visible as stale data next to the error
    pub fn apply_failure(&mut self, error: String, at: DateTime<Utc>) {
        self.state = DataState::Unavailable {
            error,
            failed_at: at,
        };
    }
}

/// Handle shared between the poller and the HTTP handlers
pub type DashboardState = Arc<RwLock<Snapshot>>;

pub fn new_dashboard_state(source: &str) -> DashboardState {
    Arc::new(RwLock::new(Snapshot::starting(source)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats;

    #[test]
    fn test_failure_keeps_last_report() {
        let mut snap = Snapshot::starting("test");
        snap.apply_success(stats::aggregate(&[]), Utc::now());
        assert_eq!(snap.state, DataState::Live);
        assert!(snap.report.is_some());

        snap.apply_failure("connection refused".to_string(), Utc::now());
        assert!(matches!(snap.state, DataState::Unavailable { .. }));
        assert!(snap.report.is_some());
        assert_eq!(snap.state.as_str(), "unavailable");
    }
}
