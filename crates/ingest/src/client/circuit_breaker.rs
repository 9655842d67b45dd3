//! Sliding-window circuit breaker for one provider binding.
//!
//! Prevents hammering a provider that is already failing. The circuit has
//! three states:
//!
//! - **Closed**: normal operation, requests are allowed through.
//! - **Open**: the provider is failing, requests fail fast with no network call.
//! - **HalfOpen**: the cooldown elapsed, a probe request is allowed.
//!
//! Unlike a consecutive-failure counter, the breaker evaluates a sliding
//! window of recent outcomes: it opens once the in-window failure ratio
//! reaches a threshold with a minimum sample count. State is in-memory and
//! resets on process restart.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

/// Default sliding window over which outcomes are sampled.
const DEFAULT_WINDOW: Duration = Duration::from_secs(30);

/// Default in-window failure ratio that opens the circuit.
const DEFAULT_FAILURE_RATIO: f64 = 0.7;

/// Default minimum number of in-window samples before the ratio applies.
const DEFAULT_MIN_SAMPLES: usize = 3;

/// Default time to wait before allowing a half-open probe.
const DEFAULT_COOLDOWN: Duration = Duration::from_secs(30);

/// Circuit breaker state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CircuitState {
    /// Normal operation - requests are allowed.
    Closed,
    /// The provider is failing - requests are blocked.
    Open,
    /// Testing recovery - a probe request is allowed.
    HalfOpen,
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "Closed"),
            Self::Open => write!(f, "Open"),
            Self::HalfOpen => write!(f, "HalfOpen"),
        }
    }
}

/// Circuit breaker configuration.
#[derive(Clone, Debug)]
pub struct CircuitBreakerConfig {
    /// Sliding window over which outcomes are sampled.
    pub window: Duration,
    /// In-window failure ratio that opens the circuit.
    pub failure_ratio: f64,
    /// Minimum in-window samples before the ratio applies.
    pub min_samples: usize,
    /// Time to wait in Open before allowing a probe.
    pub cooldown: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            failure_ratio: DEFAULT_FAILURE_RATIO,
            min_samples: DEFAULT_MIN_SAMPLES,
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

#[derive(Debug)]
struct Circuit {
    state: CircuitState,
    /// Recent outcomes: (completion time, success).
    outcomes: VecDeque<(Instant, bool)>,
    opened_at: Option<Instant>,
}

impl Circuit {
    fn new() -> Self {
        Self {
            state: CircuitState::Closed,
            outcomes: VecDeque::new(),
            opened_at: None,
        }
    }

    fn prune(&mut self, window: Duration) {
        let now = Instant::now();
        while let Some(&(at, _)) = self.outcomes.front() {
            if now.duration_since(at) > window {
                self.outcomes.pop_front();
            } else {
                break;
            }
        }
    }

    fn failure_ratio(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let failures = self.outcomes.iter().filter(|(_, ok)| !ok).count();
        failures as f64 / self.outcomes.len() as f64
    }
}

/// Per-provider circuit breaker over a sliding outcome window.
///
/// One instance per provider binding; distinct providers trip independently.
pub struct CircuitBreaker {
    provider: String,
    circuit: Mutex<Circuit>,
    config: CircuitBreakerConfig,
}

impl CircuitBreaker {
    /// Create a breaker with default settings for the given provider.
    pub fn new(provider: impl Into<String>) -> Self {
        Self::with_config(provider, CircuitBreakerConfig::default())
    }

    /// Create a breaker with custom configuration.
    pub fn with_config(provider: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            provider: provider.into(),
            circuit: Mutex::new(Circuit::new()),
            config,
        }
    }

    /// Lock the circuit mutex, recovering from poison if necessary.
    ///
    /// Slightly stale breaker state is preferable to panicking.
    fn lock_circuit(&self) -> MutexGuard<'_, Circuit> {
        self.circuit.lock().unwrap_or_else(|poisoned| {
            warn!("Circuit breaker mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Check if a request is allowed.
    ///
    /// Returns true if the circuit is Closed or HalfOpen. In Open, also
    /// handles the Open -> HalfOpen transition once the cooldown elapses.
    pub fn is_allowed(&self) -> bool {
        let mut circuit = self.lock_circuit();

        match circuit.state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                if let Some(opened_at) = circuit.opened_at {
                    if opened_at.elapsed() >= self.config.cooldown {
                        info!(
                            "Circuit breaker: transitioning '{}' from Open to HalfOpen",
                            self.provider
                        );
                        circuit.state = CircuitState::HalfOpen;
                        return true;
                    }
                }
                false
            }
        }
    }

    /// Record a successful attempt.
    ///
    /// In HalfOpen the probe succeeded: the circuit closes and the stale
    /// window is discarded.
    pub fn record_success(&self) {
        let mut circuit = self.lock_circuit();

        match circuit.state {
            CircuitState::Closed => {
                circuit.outcomes.push_back((Instant::now(), true));
                circuit.prune(self.config.window);
            }
            CircuitState::HalfOpen => {
                info!(
                    "Circuit breaker: closing circuit for '{}' after successful probe",
                    self.provider
                );
                circuit.state = CircuitState::Closed;
                circuit.outcomes.clear();
                circuit.opened_at = None;
            }
            CircuitState::Open => {
                debug!(
                    "Circuit breaker: unexpected success for '{}' in Open state",
                    self.provider
                );
            }
        }
    }

    /// Record a failed attempt.
    ///
    /// In Closed, evaluates the window and may open the circuit. In HalfOpen
    /// the probe failed and the circuit reopens immediately.
    pub fn record_failure(&self) {
        let mut circuit = self.lock_circuit();
        circuit.outcomes.push_back((Instant::now(), false));
        circuit.prune(self.config.window);

        match circuit.state {
            CircuitState::Closed => {
                let samples = circuit.outcomes.len();
                let ratio = circuit.failure_ratio();
                if samples >= self.config.min_samples && ratio >= self.config.failure_ratio {
                    info!(
                        "Circuit breaker: opening circuit for '{}' ({}/{} recent failures)",
                        self.provider,
                        circuit.outcomes.iter().filter(|(_, ok)| !ok).count(),
                        samples
                    );
                    circuit.state = CircuitState::Open;
                    circuit.opened_at = Some(Instant::now());
                } else {
                    debug!(
                        "Circuit breaker: failure for '{}' (ratio {:.2}, {} samples)",
                        self.provider, ratio, samples
                    );
                }
            }
            CircuitState::HalfOpen => {
                info!(
                    "Circuit breaker: reopening circuit for '{}' after failed probe",
                    self.provider
                );
                circuit.state = CircuitState::Open;
                circuit.opened_at = Some(Instant::now());
            }
            CircuitState::Open => {
                debug!(
                    "Circuit breaker: additional failure for '{}' (already open)",
                    self.provider
                );
            }
        }
    }

    /// Current state.
    pub fn state(&self) -> CircuitState {
        self.lock_circuit().state
    }

    /// Reset the circuit to Closed and discard the window.
    pub fn reset(&self) {
        let mut circuit = self.lock_circuit();
        info!(
            "Circuit breaker: manually resetting circuit for '{}'",
            self.provider
        );
        circuit.state = CircuitState::Closed;
        circuit.outcomes.clear();
        circuit.opened_at = None;
    }
}
