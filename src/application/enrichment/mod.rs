//! Resource enrichment engine
//!
//! Fans a lookup out over a set of registry resources, bounds each lookup
//! with a timeout, and merges the outcomes back into the registry from a
//! single applying actor.

mod coordinator;
mod timeout_guard;

pub use coordinator::{EnrichmentCoordinator, EnrichmentPass, DEFAULT_MAX_CONCURRENCY};
pub use timeout_guard::{TimeoutGuard, DEFAULT_LOOKUP_TIMEOUT};
