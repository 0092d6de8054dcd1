use chrono::{DateTime, Utc};

/// A single patch reported as available by `az vm assess-patches`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatchDescriptor {
    pub name: String,
    pub patch_id: String,
    pub kb_id: Option<String>,
    pub version: Option<String>,
    pub classifications: Vec<String>,
    pub reboot_behavior: Option<String>,
    pub assessment_state: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
}

/// Error block reported by the assessment itself (not a transport failure)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssessmentError {
    pub code: String,
    pub message: String,
}

/// PatchAssessmentResult value object
///
/// Opaque to the enrichment engine; only the lookup adapter builds it and
/// only the renderers read it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatchAssessmentResult {
    pub assessment_activity_id: Option<String>,
    pub status: String,
    pub started_at: Option<DateTime<Utc>>,
    pub critical_and_security_patch_count: u32,
    pub other_patch_count: u32,
    pub reboot_pending: bool,
    pub available_patches: Vec<PatchDescriptor>,
    pub error: Option<AssessmentError>,
}

impl PatchAssessmentResult {
    pub fn total_patch_count(&self) -> u32 {
        self.critical_and_security_patch_count + self.other_patch_count
    }

    /// True when the machine needs attention: critical patches or a pending reboot
    pub fn needs_attention(&self) -> bool {
        self.critical_and_security_patch_count > 0 || self.reboot_pending
    }
}
