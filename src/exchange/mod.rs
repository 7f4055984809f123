// exchange/mod.rs
pub mod bingx;
pub mod synthetic;
pub mod errors;
pub mod sign;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export main interfaces for easy access
pub use bingx::BingxClient;
pub use synthetic::SyntheticSource;
pub use errors::ExchangeError;
pub use traits::TradeSource;
pub use types::TradeFill;

use crate::config::ExchangeSettings;
use crate::keystore;
use std::path::Path;
use std::sync::Arc;

/// Factory function to create a trade source
///
/// `synthetic` selects the built-in sample dataset. Otherwise API
/// credentials are resolved (environment first, then the key file) and a
/// live client for `settings.base_url` is returned; missing credentials
/// fail here, before any polling starts.
pub fn create_source(
    synthetic: bool,
    settings: &ExchangeSettings,
) -> Result<Arc<dyn TradeSource>, ExchangeError> {
    if synthetic {
        return Ok(Arc::new(SyntheticSource::new()));
    }

    let credentials = keystore::resolve(Path::new(&settings.key_file))?;
    let client = BingxClient::new(settings.base_url.clone(), credentials)?;
    Ok(Arc::new(client))
}
