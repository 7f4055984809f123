// =================================================================
// exchange/traits.rs - Source Interface
// =================================================================

use super::{ExchangeError, TradeFill};
use async_trait::async_trait;

/// A source of executed trade fills the dashboard polls
#[async_trait]
pub trait TradeSource: Send + Sync {
    /// Short source name for logs and the dashboard
    fn name(&self) -> &str;

    /// Fetch the account's recent fills
    async fn fetch_fills(&self) -> Result<Vec<TradeFill>, ExchangeError>;
}
