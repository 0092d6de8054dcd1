//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of the audited subscription for renderers.

pub mod audit_read_model;
pub mod audit_read_model_builder;
pub mod recommendation_view;
pub mod resource_view;

pub use audit_read_model::{AuditMetadataView, AuditReadModel, EnrichmentSummaryView};
pub use audit_read_model_builder::AuditReadModelBuilder;
pub use recommendation_view::{RecommendationCategoryView, RecommendationView};
pub use resource_view::{
    AlertRuleView, BackupStatus, BackupStatusView, MonitoredResourceView, MonitoringSectionView,
    PatchView, VmPatchView,
};
