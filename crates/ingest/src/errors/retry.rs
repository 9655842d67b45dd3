/// Classification for retry policy.
///
/// Used to determine how the resilience wrapper should respond to a failed
/// fetch attempt.
///
/// # Behavior Summary
///
/// | Class | Retry? | Counts Against Circuit Breaker? |
/// |-------|--------|---------------------------------|
/// | `Backoff` | Yes, with exponential backoff | Yes |
/// | `Never` | No | No |
/// | `CircuitOpen` | No | No (already recorded) |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Transient failure - retry with exponential backoff.
    ///
    /// Covers request timeouts, rate limiting (429), server errors (5xx),
    /// and connection failures. These are expected to self-correct.
    Backoff,

    /// Permanent failure - retrying won't help.
    ///
    /// Covers malformed payloads, client errors other than 429, and
    /// missing correlation entries. The request is fundamentally broken
    /// until something outside the retry loop changes.
    Never,

    /// The circuit breaker is open for this provider.
    /// Fail fast until the cooldown elapses.
    CircuitOpen,
}
