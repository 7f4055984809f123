// =================================================================
// exchange/bingx.rs - BingX REST Client
// =================================================================

use super::errors::ExchangeError;
use super::sign::sign_query;
use super::types::{ApiEnvelope, TradeFill, TradeHistoryRow};
use super::utils::convert_history_row;
use super::TradeSource;
use crate::keystore::Credentials;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

pub struct BingxClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl BingxClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
    ) -> Result<Self, ExchangeError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Signed trade-history URL: `timestamp` first, `signature` appended last
    fn history_url(&self, timestamp: i64) -> Result<String, ExchangeError> {
        let query = format!("timestamp={}", timestamp);
        let signature = sign_query(&self.credentials.secret_key, &query)?;
        Ok(format!(
            "{}/api/v1/trade/history?{}&signature={}",
            self.base_url, query, signature
        ))
    }
}

#[async_trait]
impl TradeSource for BingxClient {
    fn name(&self) -> &str {
        "bingx"
    }

    async fn fetch_fills(&self) -> Result<Vec<TradeFill>, ExchangeError> {
        let url = self.history_url(Utc::now().timestamp_millis())?;

        let resp = self
            .client
            .get(&url)
            .header("X-BX-APIKEY", &self.credentials.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExchangeError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let envelope = parse_envelope(&body)?;
        if envelope.code != 0 {
            return Err(ExchangeError::Api {
                code: envelope.code,
                message: envelope.msg,
            });
        }

        let rows = envelope.data.unwrap_or_default();
        let received = rows.len();
        let mut fills = Vec::with_capacity(received);
        for row in rows {
            match convert_history_row(row) {
                Ok(fill) => fills.push(fill),
                Err(e) => warn!("Skipping malformed trade record: {}", e),
            }
        }

        // Every record failing is a payload problem, not a record problem
        if fills.is_empty() && received > 0 {
            return Err(ExchangeError::Parse(format!(
                "All {} trade records failed to parse",
                received
            )));
        }

        Ok(fills)
    }
}

/// A body that does not decode is a payload error, not a transport error
fn parse_envelope(body: &str) -> Result<ApiEnvelope<Vec<TradeHistoryRow>>, ExchangeError> {
    serde_json::from_str(body)
        .map_err(|e| ExchangeError::Parse(format!("Invalid response body: {}", e)))
}
