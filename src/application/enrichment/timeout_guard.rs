use crate::audit::domain::{LookupErrorKind, LookupOutcome, ResourceId};
use std::time::Duration;

/// Default upper bound for a single lookup (patch assessment can take minutes)
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// TimeoutGuard bounds the wall-clock time of one blocking lookup
///
/// The lookup runs on tokio's blocking pool. If it does not finish within
/// `limit`, the guard returns a `Timeout` outcome and detaches from it: the
/// external call cannot be cancelled, so it keeps running in the background
/// and its result is dropped when it eventually arrives. Callers that need to
/// bound the number of such abandoned calls hand the guard a closure that owns
/// a permit from a separate pool (see [`super::EnrichmentCoordinator`]).
#[derive(Debug, Clone, Copy)]
pub struct TimeoutGuard {
    limit: Duration,
}

impl TimeoutGuard {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Runs `lookup` on a blocking worker and waits at most `limit` for it
    ///
    /// # Arguments
    /// * `resource_id` - Resource the lookup is for; used to build the outcome
    ///   when the lookup times out or panics
    /// * `lookup` - The blocking lookup
    ///
    /// # Returns
    /// The lookup's own outcome if it finished in time, otherwise an outcome
    /// with `LookupErrorKind::Timeout`. A panicking lookup yields
    /// `LookupErrorKind::LookupFailed`.
    pub async fn guard<T, F>(&self, resource_id: ResourceId, lookup: F) -> LookupOutcome<T>
    where
        F: FnOnce() -> LookupOutcome<T> + Send + 'static,
        T: Send + 'static,
    {
        let handle = tokio::task::spawn_blocking(lookup);

        match tokio::time::timeout(self.limit, handle).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(join_error)) => LookupOutcome::failure(
                resource_id,
                LookupErrorKind::LookupFailed,
                format!("lookup task failed: {}", join_error),
            ),
            Err(_elapsed) => LookupOutcome::failure(
                resource_id,
                LookupErrorKind::Timeout,
                format!("no answer within {:?}", self.limit),
            ),
        }
    }
}

impl Default for TimeoutGuard {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKUP_TIMEOUT)
    }
}
