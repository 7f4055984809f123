// =================================================================
// exchange/sign.rs - Request Signing
// =================================================================

use super::errors::ExchangeError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 over the exact query-string bytes, lowercase hex output.
///
/// The query string must already be in its final form; the signature is
/// computed over those bytes verbatim.
pub fn sign_query(secret: &str, query: &str) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::Signing(e.to_string()))?;
    mac.update(query.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
