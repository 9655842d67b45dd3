//! The fetch-and-decode primitive shared by every provider adapter.
//!
//! One `FetchClient` per provider binding, scoped to that provider's base
//! address and carrying its authentication, rate limiter, circuit breaker,
//! and retry policy. Every outbound call funnels through here, and every
//! call resolves to a [`FetchOutcome`] - the client never panics and never
//! surfaces an unclassified error.

use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::auth::bind_auth_headers;
use super::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use super::rate_limiter::RateLimiter;
use super::retry::RetryPolicy;
use crate::errors::{FetchError, FetchOutcome, RegistryError};
use crate::models::{IngestSettings, ProviderConfig};

/// Rate-limited, authenticated, resilient HTTP fetcher for one provider.
pub struct FetchClient {
    provider_id: String,
    base_url: String,
    client: Client,
    rate_limiter: RateLimiter,
    circuit_breaker: CircuitBreaker,
    retry: RetryPolicy,
}

impl FetchClient {
    /// Build a client for one provider binding with the default breaker.
    ///
    /// `basic_companion` is the provider family's fixed basic-auth secret,
    /// if the family has one.
    pub fn new(
        provider_id: &'static str,
        config: &ProviderConfig,
        settings: &IngestSettings,
        basic_companion: Option<&str>,
    ) -> Result<Self, RegistryError> {
        Self::with_breaker_config(
            provider_id,
            config,
            settings,
            basic_companion,
            CircuitBreakerConfig::default(),
        )
    }

    /// Build a client with a custom circuit breaker configuration.
    pub fn with_breaker_config(
        provider_id: &'static str,
        config: &ProviderConfig,
        settings: &IngestSettings,
        basic_companion: Option<&str>,
        breaker_config: CircuitBreakerConfig,
    ) -> Result<Self, RegistryError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(RegistryError::InvalidProviderConfig {
                provider: config.name.clone(),
                message: "base URL is empty".to_string(),
            });
        }

        let headers = bind_auth_headers(config, basic_companion, &settings.default_user_agent);
        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| RegistryError::InvalidProviderConfig {
                provider: config.name.clone(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            provider_id: provider_id.to_string(),
            base_url,
            client,
            rate_limiter: RateLimiter::new(config.min_request_interval()),
            circuit_breaker: CircuitBreaker::with_config(provider_id, breaker_config),
            retry: RetryPolicy::new(settings.max_retry_attempts, settings.retry_base_delay()),
        })
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// Fetch `path` and decode the JSON body into `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> FetchOutcome<T> {
        self.retry
            .run(&self.provider_id, || async move {
                let response = self.send(path, query).await?;
                response.json::<T>().await.map_err(|e| {
                    debug!(
                        "Payload from '{}' at '{}' did not decode: {}",
                        self.provider_id, path, e
                    );
                    FetchError::Decode {
                        provider: self.provider_id.clone(),
                        message: e.to_string(),
                    }
                })
            })
            .await
    }

    /// Fetch `path` and return the raw body, for page-shaped providers
    /// whose extraction happens elsewhere.
    pub async fn get_text(&self, path: &str, query: &[(&str, String)]) -> FetchOutcome<String> {
        self.retry
            .run(&self.provider_id, || async move {
                let response = self.send(path, query).await?;
                response
                    .text()
                    .await
                    .map_err(|e| FetchError::Decode {
                        provider: self.provider_id.clone(),
                        message: e.to_string(),
                    })
            })
            .await
    }

    /// One attempt: rate-limit, breaker admission, timed request, status
    /// classification. Records the attempt outcome into the breaker.
    async fn send(&self, path: &str, query: &[(&str, String)]) -> FetchOutcome<Response> {
        self.rate_limiter.wait().await;

        if !self.circuit_breaker.is_allowed() {
            debug!(
                "Circuit open for '{}', skipping request to '{}'",
                self.provider_id, path
            );
            return Err(FetchError::CircuitOpen {
                provider: self.provider_id.clone(),
            });
        }

        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        match request.send().await {
            Err(e) => {
                self.circuit_breaker.record_failure();
                if e.is_timeout() {
                    Err(FetchError::Timeout {
                        provider: self.provider_id.clone(),
                    })
                } else {
                    Err(FetchError::Transport {
                        provider: self.provider_id.clone(),
                        message: e.to_string(),
                    })
                }
            }
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    self.circuit_breaker.record_success();
                    Ok(response)
                } else {
                    self.circuit_breaker.record_failure();
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        Err(FetchError::RateLimited {
                            provider: self.provider_id.clone(),
                        })
                    } else {
                        Err(FetchError::Status {
                            provider: self.provider_id.clone(),
                            status: status.as_u16(),
                        })
                    }
                }
            }
        }
    }
}
