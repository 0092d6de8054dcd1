pub mod alert_rule;
pub mod audit_metadata;
pub mod enrichment_summary;
pub mod lookup_outcome;
pub mod patch_assessment;
pub mod recommendation;
pub mod registry;
pub mod resource;

pub use alert_rule::{AlertCriterion, AlertRule};
pub use audit_metadata::AuditMetadata;
pub use enrichment_summary::EnrichmentSummary;
pub use lookup_outcome::{LookupError, LookupErrorKind, LookupKind, LookupOutcome};
pub use patch_assessment::{AssessmentError, PatchAssessmentResult, PatchDescriptor};
pub use recommendation::{Impact, Recommendation};
pub use registry::ResourceRegistry;
pub use resource::{Resource, ResourceCategory, ResourceId};
