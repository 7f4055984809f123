//! API credential storage: environment variables first, then a local JSON key file.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum KeystoreError {
    #[error("no API credentials: set BINGX_API_KEY and BINGX_SECRET_KEY, or store them with `pnl-dashboard keys set`")]
    Missing,

    #[error("failed to read key file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("key file {path} is not valid JSON: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("key file {path} has an empty api_key or secret_key")]
    Empty { path: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub secret_key: String,
}

impl Credentials {
    /// Reads BINGX_API_KEY / BINGX_SECRET_KEY. Returns None unless both are set and non-empty.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("BINGX_API_KEY").ok()?;
        let secret_key = std::env::var("BINGX_SECRET_KEY").ok()?;
        if api_key.trim().is_empty() || secret_key.trim().is_empty() {
            return None;
        }
        Some(Credentials {
            api_key,
            secret_key,
        })
    }
}

/// Environment variables win over the key file.
pub fn resolve(path: &Path) -> Result<Credentials, KeystoreError> {
    if let Some(creds) = Credentials::from_env() {
        return Ok(creds);
    }
    load_file(path)
}

/// Reads and validates the key file. An absent file reports `Missing` and
/// its remediation hint rather than a raw I/O error.
pub fn load_file(path: &Path) -> Result<Credentials, KeystoreError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => KeystoreError::Missing,
        _ => KeystoreError::Io {
            path: display.clone(),
            source,
        },
    })?;
    let creds: Credentials =
        serde_json::from_str(&raw).map_err(|source| KeystoreError::Malformed {
            path: display.clone(),
            source,
        })?;
    if creds.api_key.trim().is_empty() || creds.secret_key.trim().is_empty() {
        return Err(KeystoreError::Empty { path: display });
    }
    Ok(creds)
}

/// Writes the key file as pretty JSON, owner-readable only on unix.
pub fn save(path: &Path, creds: &Credentials) -> Result<(), KeystoreError> {
    let display = path.display().to_string();
    let io_err = |source| KeystoreError::Io {
        path: display.clone(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let json = serde_json::to_string_pretty(creds).map_err(|source| KeystoreError::Malformed {
        path: display.clone(),
        source,
    })?;
    std::fs::write(path, json).map_err(io_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path).map_err(io_err)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms).map_err(io_err)?;
    }

    Ok(())
}
