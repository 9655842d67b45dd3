//! Core error types for the statline application.
//!
//! This module defines storage-agnostic error types. Engine-specific errors
//! are converted to these types by whatever storage adapter implements the
//! repository traits.

use thiserror::Error;

use statline_ingest::errors::{FetchError, RegistryError};

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ingestion core.
///
/// Everything below the configuration tier is recovered inside the
/// ingestion service into a diagnostic and a decremented success count;
/// only registry-time configuration errors are meant to stop a process.
#[derive(Error, Debug)]
pub enum Error {
    /// An outbound fetch failed after the resilience stack gave up.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Provider registration or lookup failed. Fatal at startup.
    #[error("Provider configuration error: {0}")]
    Registry(#[from] RegistryError),

    /// A storage operation failed. Engine-specific detail arrives in
    /// string form to keep this type storage-agnostic.
    #[error("Storage operation failed: {0}")]
    Storage(String),

    /// A record references a parent row that has not been reconciled yet.
    /// Skipped per record; ingest the parent resource first.
    #[error("{entity} '{key}' references missing {parent}")]
    MissingParent {
        entity: &'static str,
        key: String,
        parent: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parent_display() {
        let error = Error::MissingParent {
            entity: "player",
            key: "P. Mahomes (KC)".to_string(),
            parent: "team 'KC'".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "player 'P. Mahomes (KC)' references missing team 'KC'"
        );
    }

    #[test]
    fn test_fetch_error_wraps() {
        let fetch = FetchError::Timeout {
            provider: "STATSHUB".to_string(),
        };
        let error: Error = fetch.into();
        assert!(matches!(error, Error::Fetch(_)));
    }
}
