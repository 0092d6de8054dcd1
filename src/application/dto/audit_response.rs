use crate::audit::domain::{AuditMetadata, EnrichmentSummary, Recommendation, ResourceRegistry};
use std::collections::BTreeMap;

/// AuditResponse - Internal response DTO from the audit use case
///
/// Carries the fully enriched registry; the read model builder turns it into
/// what formatters consume.
#[derive(Debug, Clone)]
pub struct AuditResponse {
    /// Every audited resource with alert rules and lookup results attached
    pub registry: ResourceRegistry,
    /// Advisor recommendations grouped by category name
    pub recommendations: BTreeMap<String, Vec<Recommendation>>,
    /// One summary per enrichment pass that ran, in run order
    pub summaries: Vec<EnrichmentSummary>,
    pub metadata: AuditMetadata,
}

impl AuditResponse {
    pub fn new(
        registry: ResourceRegistry,
        recommendations: BTreeMap<String, Vec<Recommendation>>,
        summaries: Vec<EnrichmentSummary>,
        metadata: AuditMetadata,
    ) -> Self {
        Self {
            registry,
            recommendations,
            summaries,
            metadata,
        }
    }

    /// True when any pass had a timeout or a failed lookup
    pub fn has_lookup_failures(&self) -> bool {
        self.summaries.iter().any(EnrichmentSummary::has_failures)
    }
}
