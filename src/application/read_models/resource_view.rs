//! Per-resource view structs for read model

use serde::Serialize;

/// Alert-rule coverage of one resource category
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSectionView {
    pub title: String,
    pub resources: Vec<MonitoredResourceView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonitoredResourceView {
    pub name: String,
    pub resource_group: String,
    pub alert_rules: Vec<AlertRuleView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertRuleView {
    pub name: String,
    /// Human-readable conditions, e.g. `Average Percentage CPU GreaterThan 80.00`
    pub criteria: Vec<String>,
}

/// Backup state of a virtual machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupStatus {
    Protected,
    NotBackedUp,
    /// The lookup timed out or failed; the VM may or may not be protected
    Unknown,
}

#[derive(Debug, Clone, Serialize)]
pub struct BackupStatusView {
    pub name: String,
    pub resource_group: String,
    pub status: BackupStatus,
    pub vault_name: Option<String>,
    /// Why the status is unknown
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VmPatchView {
    pub name: String,
    pub resource_group: String,
    /// Assessment status reported by Azure; `None` when no assessment is available
    pub status: Option<String>,
    pub critical_and_security_patch_count: u32,
    pub other_patch_count: u32,
    pub reboot_pending: bool,
    pub patches: Vec<PatchView>,
    /// Error reported by the assessment itself
    pub assessment_error: Option<String>,
    /// Why no assessment is available (timeout, failed or undecodable lookup)
    pub lookup_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatchView {
    pub name: String,
    pub patch_id: String,
    pub kb_id: Option<String>,
    pub version: Option<String>,
    pub classifications: Vec<String>,
    pub reboot_behavior: Option<String>,
}
