use crate::audit::domain::{LookupKind, LookupOutcome, Resource};

/// ResourceLookup port: one kind of per-resource enrichment
///
/// A lookup is a blocking remote call for one resource that always answers
/// with a [`LookupOutcome`] (never panics, never returns early without one).
/// The coordinator runs many of them concurrently on blocking workers, so
/// implementations must be `Send + Sync + 'static`.
///
/// `attach` is the write half: it stores a successful value into the
/// resource's enrichment slot for this kind. Only the coordinator's apply
/// step calls it.
pub trait ResourceLookup: Send + Sync + 'static {
    /// Payload stored in the enrichment slot
    type Value: Clone + Send + 'static;

    /// Which enrichment slot this lookup fills
    fn kind(&self) -> LookupKind;

    /// Performs the remote lookup for `resource`
    fn lookup(&self, resource: &Resource) -> LookupOutcome<Self::Value>;

    /// Writes a successful value into `resource`'s slot for this kind
    fn attach(&self, resource: &mut Resource, value: Self::Value);
}
