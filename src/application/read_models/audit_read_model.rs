//! Audit read model for query operations
//!
//! This module provides the main read model struct that aggregates
//! everything a report renderer needs in a query-optimized format.

use super::recommendation_view::RecommendationCategoryView;
use super::resource_view::{BackupStatusView, MonitoringSectionView, VmPatchView};
use serde::Serialize;

/// Main read model for a subscription audit
///
/// Built once after every enrichment pass has finished. All lists are sorted,
/// so renderers can emit them as-is.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReadModel {
    pub metadata: AuditMetadataView,
    /// One section per audited category, in report order
    pub monitoring: Vec<MonitoringSectionView>,
    /// `None` when the backup pass was skipped
    pub backups: Option<Vec<BackupStatusView>>,
    /// Names of virtual machines reported as deallocated
    pub deallocated_vms: Vec<String>,
    /// `None` when the patch assessment pass was skipped
    pub patches: Option<Vec<VmPatchView>>,
    pub recommendations: Vec<RecommendationCategoryView>,
    pub enrichment: Vec<EnrichmentSummaryView>,
}

/// View representation of report metadata
#[derive(Debug, Clone, Serialize)]
pub struct AuditMetadataView {
    pub subscription_id: String,
    pub client_name: String,
    /// RFC 3339 timestamp
    pub generated_at: String,
    /// `YYYY-MM-DD`, for titles
    pub report_date: String,
    pub tool_name: String,
    pub tool_version: String,
    pub report_id: String,
}

/// View representation of one enrichment pass's counts
#[derive(Debug, Clone, Serialize)]
pub struct EnrichmentSummaryView {
    pub lookup: String,
    pub attempted: usize,
    pub succeeded: usize,
    /// Domain-negative answers (a VM without a vault)
    pub negative: usize,
    pub timed_out: usize,
    pub lookup_failed: usize,
    pub decode_failed: usize,
    pub elapsed_ms: u128,
}

impl AuditReadModel {
    /// True when any pass had a timeout or a failed lookup
    pub fn has_lookup_failures(&self) -> bool {
        self.enrichment
            .iter()
            .any(|s| s.timed_out + s.lookup_failed + s.decode_failed > 0)
    }
}
