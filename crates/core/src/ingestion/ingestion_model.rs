//! Run outcome model.

use serde::{Deserialize, Serialize};

/// Cap on the diagnostics carried by one outcome. A pathological run can
/// skip thousands of records; the report stays readable.
const MAX_DIAGNOSTICS: usize = 25;

/// Aggregated result of one ingestion operation.
///
/// Produced exactly once per top-level operation and never thrown past:
/// every failure below the configuration tier ends up in here as a
/// diagnostic and a count. When an operation fans out (rosters across
/// teams), child outcomes are folded in with [`absorb`](Self::absorb).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    /// False only when a step suffered total failure; per-record skips
    /// degrade the counts, not this flag.
    pub succeeded: bool,
    pub records_processed: usize,
    pub records_failed: usize,
    pub message: String,
    /// Bounded diagnostic list, oldest first.
    pub errors: Vec<String>,
}

impl RunOutcome {
    /// An outcome that starts successful with zero counts.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            records_processed: 0,
            records_failed: 0,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// A total-failure outcome carrying one diagnostic.
    pub fn failure(message: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            succeeded: false,
            records_processed: 0,
            records_failed: 0,
            message,
            errors: vec![diagnostic.into()],
        }
    }

    pub fn record_processed(&mut self) {
        self.records_processed += 1;
    }

    /// One record skipped: count it and keep the diagnostic.
    pub fn record_skip(&mut self, diagnostic: impl Into<String>) {
        self.records_failed += 1;
        self.push_diagnostic(diagnostic.into());
    }

    /// Append a diagnostic, bounded at [`MAX_DIAGNOSTICS`].
    pub fn push_diagnostic(&mut self, diagnostic: String) {
        match self.errors.len().cmp(&MAX_DIAGNOSTICS) {
            std::cmp::Ordering::Less => self.errors.push(diagnostic),
            std::cmp::Ordering::Equal => self
                .errors
                .push(format!("further diagnostics suppressed after {MAX_DIAGNOSTICS}")),
            std::cmp::Ordering::Greater => {}
        }
    }

    /// Fold a child outcome into this one: counts add, diagnostics append
    /// (still bounded), and success survives only if both succeeded.
    pub fn absorb(&mut self, child: RunOutcome) {
        self.succeeded &= child.succeeded;
        self.records_processed += child.records_processed;
        self.records_failed += child.records_failed;
        for diagnostic in child.errors {
            self.push_diagnostic(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_starts_clean() {
        let outcome = RunOutcome::success("ok");
        assert!(outcome.succeeded);
        assert_eq!(outcome.records_processed, 0);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_skip_degrades_count_not_success() {
        let mut outcome = RunOutcome::success("ok");
        outcome.record_processed();
        outcome.record_skip("player 'X' references missing team");

        assert!(outcome.succeeded);
        assert_eq!(outcome.records_processed, 1);
        assert_eq!(outcome.records_failed, 1);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn test_diagnostics_are_bounded() {
        let mut outcome = RunOutcome::success("ok");
        for i in 0..100 {
            outcome.record_skip(format!("skip {i}"));
        }

        assert_eq!(outcome.records_failed, 100);
        assert_eq!(outcome.errors.len(), MAX_DIAGNOSTICS + 1);
        assert!(outcome.errors.last().unwrap().contains("suppressed"));
    }

    #[test]
    fn test_absorb_merges_counts_and_success() {
        let mut parent = RunOutcome::success("parent");
        parent.record_processed();

        let mut healthy = RunOutcome::success("child");
        healthy.record_processed();
        parent.absorb(healthy);
        assert!(parent.succeeded);
        assert_eq!(parent.records_processed, 2);

        let broken = RunOutcome::failure("child", "provider unreachable");
        parent.absorb(broken);
        assert!(!parent.succeeded);
        assert_eq!(parent.errors.len(), 1);
    }
}
