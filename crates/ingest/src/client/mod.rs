//! The resilient fetch stack: auth binding, rate limiting, circuit
//! breaking, bounded retry, and the composed fetch client.

mod auth;
mod circuit_breaker;
mod fetch;
mod rate_limiter;
mod retry;

pub use auth::bind_auth_headers;
pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use fetch::FetchClient;
pub use rate_limiter::RateLimiter;
pub use retry::RetryPolicy;
