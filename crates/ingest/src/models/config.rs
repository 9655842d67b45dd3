//! Configuration models consumed from the host application.
//!
//! Loading is the host's concern; these types only define the shapes.
//! Both structs are immutable once an ingestion run starts.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How credentials are attached to a provider's transport.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    /// No credentials; the provider is publicly readable.
    #[default]
    None,
    /// A named header carrying the configured credential.
    HeaderKey,
    /// HTTP basic auth built from the credential and a fixed,
    /// provider-specific companion secret.
    BasicCredential,
}

/// Per-provider configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Provider family name; selects the adapter implementation.
    /// Matched case-insensitively by the registry.
    pub name: String,

    /// Base address all endpoint paths are joined to.
    pub base_url: String,

    /// Authentication scheme for this provider.
    #[serde(default)]
    pub auth_mode: AuthMode,

    /// Credential material for `header-key` and `basic-credential` modes.
    #[serde(default)]
    pub credential: Option<String>,

    /// Header name for `header-key` mode.
    #[serde(default)]
    pub header_name: Option<String>,

    /// Static headers merged into every request. Never overwrite
    /// mode-specific headers.
    #[serde(default)]
    pub custom_headers: HashMap<String, String>,

    /// Minimum spacing between outbound requests to this provider.
    #[serde(default = "default_min_interval_ms")]
    pub min_request_interval_ms: u64,
}

fn default_min_interval_ms() -> u64 {
    1_000
}

impl ProviderConfig {
    /// A config with the given name and base address and default everything else.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            auth_mode: AuthMode::None,
            credential: None,
            header_name: None,
            custom_headers: HashMap::new(),
            min_request_interval_ms: default_min_interval_ms(),
        }
    }

    pub fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }
}

/// Global settings shared by every provider binding.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSettings {
    /// Maximum attempts per fetch, including the first.
    pub max_retry_attempts: u32,

    /// Base delay before the first retry; doubles per attempt.
    pub retry_base_delay_ms: u64,

    /// Per-attempt timeout.
    pub request_timeout_secs: u64,

    /// User agent attached to every request.
    pub default_user_agent: String,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            max_retry_attempts: 3,
            retry_base_delay_ms: 500,
            request_timeout_secs: 30,
            default_user_agent: concat!("statline/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl IngestSettings {
    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
