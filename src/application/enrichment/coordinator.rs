use super::timeout_guard::TimeoutGuard;
use crate::audit::domain::{
    EnrichmentSummary, LookupErrorKind, LookupOutcome, Resource, ResourceId, ResourceRegistry,
};
use crate::ports::outbound::ResourceLookup;
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};

/// Default number of lookups allowed to run at once
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Result of one enrichment pass
#[derive(Debug, Clone)]
pub struct EnrichmentPass<T> {
    /// One outcome per dispatched resource, in completion order
    pub outcomes: Vec<LookupOutcome<T>>,
    pub summary: EnrichmentSummary,
}

/// EnrichmentCoordinator runs a lookup over a set of registry resources
///
/// Every resource in the dispatch set gets its own task. At most
/// `max_concurrency` blocking lookups hold a worker slot at any time, and
/// each one is bounded by the [`TimeoutGuard`]. Outcomes flow back over a
/// channel to the coordinator, which is the only writer to the registry
/// while a pass runs.
///
/// Two pools bound the work. A worker slot is held while the guard waits, so
/// it comes back within `limit` even when the lookup is abandoned. A live
/// unit is held by the blocking call itself until it really returns. The
/// live pool has room for `max_concurrency` running calls plus as many
/// abandoned ones; once it is exhausted, further lookups are not started and
/// report `Timeout` at once. Both pools are shared by every pass of the same
/// coordinator.
#[derive(Debug, Clone)]
pub struct EnrichmentCoordinator {
    guard: TimeoutGuard,
    max_concurrency: usize,
    worker_slots: Arc<Semaphore>,
    live_capacity: usize,
    live_units: Arc<Semaphore>,
}

impl EnrichmentCoordinator {
    /// Creates a coordinator; a `max_concurrency` of 0 is treated as 1
    pub fn new(limit: Duration, max_concurrency: usize) -> Self {
        let max_concurrency = max_concurrency.max(1);
        let live_capacity = max_concurrency.saturating_mul(2);
        Self {
            guard: TimeoutGuard::new(limit),
            max_concurrency,
            worker_slots: Arc::new(Semaphore::new(max_concurrency)),
            live_capacity,
            live_units: Arc::new(Semaphore::new(live_capacity)),
        }
    }

    pub fn limit(&self) -> Duration {
        self.guard.limit()
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Worker slots not held by a lookup the guard is still waiting on
    pub fn available_slots(&self) -> usize {
        self.worker_slots.available_permits()
    }

    /// Blocking calls that have not returned yet, abandoned ones included
    pub fn live_lookups(&self) -> usize {
        self.live_capacity - self.live_units.available_permits()
    }

    pub async fn enrich<L: ResourceLookup>(
        &self,
        registry: &mut ResourceRegistry,
        resource_ids: &BTreeSet<ResourceId>,
        lookup: Arc<L>,
    ) -> Result<EnrichmentPass<L::Value>> {
        self.enrich_with_progress(registry, resource_ids, lookup, |_, _| {})
            .await
    }

    /// Runs `lookup` for every id in `resource_ids` and applies the outcomes
    ///
    /// Successful values go into the resource's slot through
    /// [`ResourceLookup::attach`]; failures are recorded on the resource and
    /// leave the slot empty. One resource's failure never affects another's.
    ///
    /// # Arguments
    /// * `registry` - Registry holding every resource in `resource_ids`
    /// * `resource_ids` - Dispatch set; each id gets exactly one outcome
    /// * `lookup` - The lookup to run
    /// * `on_progress` - Called after each applied outcome with
    ///   `(applied, total)`
    ///
    /// # Errors
    /// Only invariant violations abort a pass: an id that is not in the
    /// registry, two outcomes for the same resource, or the outcome channel
    /// closing before every outcome arrived.
    pub async fn enrich_with_progress<L, P>(
        &self,
        registry: &mut ResourceRegistry,
        resource_ids: &BTreeSet<ResourceId>,
        lookup: Arc<L>,
        mut on_progress: P,
    ) -> Result<EnrichmentPass<L::Value>>
    where
        L: ResourceLookup,
        P: FnMut(usize, usize),
    {
        let started = Instant::now();
        let kind = lookup.kind();
        let expected = resource_ids.len();
        let (sender, mut receiver) = mpsc::channel(expected.max(1));

        for resource_id in resource_ids {
            let snapshot = registry
                .get(resource_id)
                .cloned()
                .ok_or_else(|| AuditError::UnknownResource {
                    resource_id: resource_id.to_string(),
                })?;
            self.dispatch(snapshot, Arc::clone(&lookup), sender.clone());
        }
        drop(sender);

        let mut outcomes = Vec::with_capacity(expected);
        let mut applied = HashSet::with_capacity(expected);

        while outcomes.len() < expected {
            let Some(outcome) = receiver.recv().await else {
                return Err(AuditError::IncompletePass {
                    kind: kind.label().to_string(),
                    expected,
                    received: outcomes.len(),
                }
                .into());
            };

            apply(registry, lookup.as_ref(), &outcome, &mut applied)?;
            outcomes.push(outcome);
            on_progress(outcomes.len(), expected);
        }

        let summary = EnrichmentSummary::from_outcomes(kind, &outcomes, started.elapsed());
        Ok(EnrichmentPass { outcomes, summary })
    }

    fn dispatch<L: ResourceLookup>(
        &self,
        snapshot: Resource,
        lookup: Arc<L>,
        sender: mpsc::Sender<LookupOutcome<L::Value>>,
    ) {
        let guard = self.guard;
        let worker_slots = Arc::clone(&self.worker_slots);
        let live_units = Arc::clone(&self.live_units);

        tokio::spawn(async move {
            let resource_id = snapshot.id().clone();
            let outcome = match worker_slots.acquire_owned().await {
                Ok(_worker) => match live_units.try_acquire_owned() {
                    Ok(live) => {
                        guard
                            .guard(resource_id, move || {
                                // Released when the call returns, not when the guard gives up.
                                let _live = live;
                                lookup.lookup(&snapshot)
                            })
                            .await
                    }
                    Err(_exhausted) => LookupOutcome::failure(
                        resource_id,
                        LookupErrorKind::Timeout,
                        "not started: too many abandoned lookups are still running",
                    ),
                },
                Err(_closed) => LookupOutcome::failure(
                    resource_id,
                    LookupErrorKind::LookupFailed,
                    "worker pool closed",
                ),
            };

            // The receiver is only gone once the pass has already failed.
            let _ = sender.send(outcome).await;
        });
    }
}

impl Default for EnrichmentCoordinator {
    fn default() -> Self {
        Self::new(super::DEFAULT_LOOKUP_TIMEOUT, DEFAULT_MAX_CONCURRENCY)
    }
}

fn apply<L: ResourceLookup>(
    registry: &mut ResourceRegistry,
    lookup: &L,
    outcome: &LookupOutcome<L::Value>,
    applied: &mut HashSet<ResourceId>,
) -> Result<()> {
    let resource_id = outcome.resource_id();

    if !applied.insert(resource_id.clone()) {
        return Err(AuditError::DuplicateOutcome {
            kind: lookup.kind().label().to_string(),
            resource_id: resource_id.to_string(),
        }
        .into());
    }

    let resource = registry
        .get_mut(resource_id)
        .ok_or_else(|| AuditError::UnknownResource {
            resource_id: resource_id.to_string(),
        })?;

    if let Some(value) = outcome.value() {
        lookup.attach(resource, value.clone());
    } else if let Some(error) = outcome.error() {
        resource.record_lookup_error(lookup.kind(), error.clone());
    }

    Ok(())
}
