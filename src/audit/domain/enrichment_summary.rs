use super::lookup_outcome::{LookupErrorKind, LookupKind, LookupOutcome};
use std::collections::BTreeMap;
use std::time::Duration;

/// Aggregate counts for one enrichment pass
///
/// The coordinator produces this; deciding whether failures matter is left to
/// the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentSummary {
    kind: LookupKind,
    attempted: usize,
    succeeded: usize,
    by_error: BTreeMap<LookupErrorKind, usize>,
    elapsed: Duration,
}

impl EnrichmentSummary {
    pub fn from_outcomes<T>(
        kind: LookupKind,
        outcomes: &[LookupOutcome<T>],
        elapsed: Duration,
    ) -> Self {
        let mut by_error = BTreeMap::new();
        let mut succeeded = 0;

        for outcome in outcomes {
            match outcome.error_kind() {
                Some(error_kind) => *by_error.entry(error_kind).or_insert(0) += 1,
                None => succeeded += 1,
            }
        }

        Self {
            kind,
            attempted: outcomes.len(),
            succeeded,
            by_error,
            elapsed,
        }
    }

    pub fn kind(&self) -> LookupKind {
        self.kind
    }

    pub fn attempted(&self) -> usize {
        self.attempted
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Domain-negative results (e.g. "not backed up")
    pub fn negative(&self) -> usize {
        self.by_error
            .iter()
            .filter(|(kind, _)| !kind.is_failure())
            .map(|(_, count)| count)
            .sum()
    }

    /// Real failures: timeouts, transport and decode errors
    pub fn failed(&self) -> usize {
        self.by_error
            .iter()
            .filter(|(kind, _)| kind.is_failure())
            .map(|(_, count)| count)
            .sum()
    }

    pub fn count(&self, kind: LookupErrorKind) -> usize {
        self.by_error.get(&kind).copied().unwrap_or(0)
    }

    pub fn by_error(&self) -> &BTreeMap<LookupErrorKind, usize> {
        &self.by_error
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}
