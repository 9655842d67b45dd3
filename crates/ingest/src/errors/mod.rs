//! Error types and retry classification for the ingest crate.
//!
//! This module provides:
//! - [`FetchError`]: the classified failure side of every fetch
//! - [`FetchOutcome`]: the value every outbound call resolves to
//! - [`RetryClass`]: classification for determining retry behavior
//! - [`RegistryError`]: fatal configuration errors raised at registration

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// The result of one fetch-and-decode operation.
///
/// Outbound calls never panic and never surface an unclassified error;
/// every path through the fetch client ends in one of these.
pub type FetchOutcome<T> = Result<T, FetchError>;

/// Classified failure of an outbound fetch.
///
/// Each variant is mapped to a [`RetryClass`] via [`retry_class`](Self::retry_class),
/// which determines whether the resilience wrapper retries it.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The connection to the provider failed before a response arrived.
    #[error("Connection to {provider} failed: {message}")]
    Transport { provider: String, message: String },

    /// The attempt exceeded the per-attempt timeout.
    #[error("Request to {provider} timed out")]
    Timeout { provider: String },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited by {provider}")]
    RateLimited { provider: String },

    /// The provider answered with a non-success status other than 429.
    /// 5xx statuses are transient; other 4xx statuses are permanent.
    #[error("{provider} returned status {status}")]
    Status { provider: String, status: u16 },

    /// The response body did not match the expected payload shape.
    /// Never retried - the provider is reachable, the payload is wrong.
    #[error("Malformed payload from {provider}: {message}")]
    Decode { provider: String, message: String },

    /// The circuit breaker is open for this provider; no network call
    /// was attempted.
    #[error("Circuit open for {provider}")]
    CircuitOpen { provider: String },

    /// A dependent fetch needed a provider-native identifier that the
    /// correlation cache does not hold.
    #[error("No native game id for {key}; run the schedule fetch first")]
    MissingCorrelation { provider: String, key: String },
}

impl FetchError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use statline_ingest::errors::{FetchError, RetryClass};
    ///
    /// let error = FetchError::Timeout { provider: "STATSHUB".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::Backoff);
    ///
    /// let error = FetchError::Status { provider: "STATSHUB".to_string(), status: 404 };
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            // Transient failures - retry with backoff
            Self::Transport { .. } | Self::Timeout { .. } | Self::RateLimited { .. } => {
                RetryClass::Backoff
            }
            Self::Status { status, .. } if *status >= 500 => RetryClass::Backoff,

            // Permanent failures - never retry
            Self::Status { .. } | Self::Decode { .. } | Self::MissingCorrelation { .. } => {
                RetryClass::Never
            }

            // Circuit breaker open - fail fast
            Self::CircuitOpen { .. } => RetryClass::CircuitOpen,
        }
    }

    /// The provider this failure belongs to, for diagnostics.
    pub fn provider(&self) -> &str {
        match self {
            Self::Transport { provider, .. }
            | Self::Timeout { provider }
            | Self::RateLimited { provider }
            | Self::Status { provider, .. }
            | Self::Decode { provider, .. }
            | Self::CircuitOpen { provider }
            | Self::MissingCorrelation { provider, .. } => provider,
        }
    }
}

/// Fatal configuration errors raised when the provider registry is built,
/// before any network activity.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The configured provider name does not match any known provider family.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// A global ingest setting is unusable.
    #[error("Invalid ingest settings: {0}")]
    InvalidSettings(String),

    /// A per-provider configuration value is unusable.
    #[error("Invalid configuration for provider '{provider}': {message}")]
    InvalidProviderConfig { provider: String, message: String },
}
