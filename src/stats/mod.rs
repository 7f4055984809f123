pub mod aggregator;

pub use aggregator::{
    aggregate, DailyPnl, DayBucket, PnlReport, PnlSummary, DISPLAY_WINDOW_DAYS,
    PROJECTION_WINDOW_DAYS,
};
