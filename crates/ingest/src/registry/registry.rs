//! Provider registry: configured name -> pre-built adapter binding.
//!
//! Every binding is constructed up front, so a misconfigured provider name
//! is a fatal error at registration time - before any network activity -
//! rather than a per-call surprise.

use std::collections::HashMap;
use std::sync::Arc;

use log::info;

use crate::correlation::CorrelationCache;
use crate::errors::RegistryError;
use crate::models::{IngestSettings, ProviderConfig};
use crate::provider::{FieldpassProvider, SportsDataProvider, StatshubProvider};

/// Lookup from configured provider name to its bound adapter.
///
/// Each binding owns one authenticated, rate-limited, resilient fetch
/// client scoped to the provider's base address, and - where the family
/// needs one - its own correlation cache. Names are matched
/// case-insensitively.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn SportsDataProvider>>,
}

impl ProviderRegistry {
    /// Build every configured binding. Fails fast on an unknown provider
    /// family, a duplicate name, or unusable settings.
    pub fn new(
        configs: Vec<ProviderConfig>,
        settings: IngestSettings,
    ) -> Result<Self, RegistryError> {
        if settings.max_retry_attempts == 0 {
            return Err(RegistryError::InvalidSettings(
                "maxRetryAttempts must be at least 1".to_string(),
            ));
        }
        if settings.request_timeout_secs == 0 {
            return Err(RegistryError::InvalidSettings(
                "requestTimeoutSecs must be at least 1".to_string(),
            ));
        }

        let mut providers: HashMap<String, Arc<dyn SportsDataProvider>> = HashMap::new();

        for config in &configs {
            let name = config.name.trim().to_ascii_lowercase();

            let provider: Arc<dyn SportsDataProvider> = match name.as_str() {
                "statshub" => Arc::new(StatshubProvider::new(config, &settings)?),
                "fieldpass" => {
                    // One correlation cache per binding: native ids from one
                    // provider never resolve another provider's fetches.
                    let correlation = Arc::new(CorrelationCache::new());
                    Arc::new(FieldpassProvider::new(config, &settings, correlation)?)
                }
                _ => return Err(RegistryError::UnknownProvider(config.name.clone())),
            };

            if providers.insert(name.clone(), provider).is_some() {
                return Err(RegistryError::InvalidProviderConfig {
                    provider: config.name.clone(),
                    message: "provider configured more than once".to_string(),
                });
            }

            info!(
                "Registered provider '{}' at {}",
                name,
                config.base_url.trim_end_matches('/')
            );
        }

        Ok(Self { providers })
    }

    /// Look up a bound adapter by name, case-insensitively.
    ///
    /// An unknown name is a configuration error, not a fetch failure.
    pub fn get(&self, name: &str) -> Result<Arc<dyn SportsDataProvider>, RegistryError> {
        self.providers
            .get(&name.trim().to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| RegistryError::UnknownProvider(name.to_string()))
    }

    /// Names of every registered provider, sorted for stable output.
    pub fn provider_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
