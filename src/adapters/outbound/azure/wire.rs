//! Serde shapes of Azure CLI JSON output
//!
//! Only the fields the audit reads are declared; everything else in the CLI
//! output is ignored. Missing fields fall back to defaults because the CLI
//! omits keys freely between versions.

use crate::audit::domain::{
    AlertCriterion, AlertRule, AssessmentError, Impact, PatchAssessmentResult, PatchDescriptor,
    Recommendation, Resource, ResourceCategory,
};
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AzResource {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(default)]
    pub resource_group: String,
    /// Only present with `az vm list -d`
    #[serde(default)]
    pub power_state: Option<String>,
}

impl AzResource {
    pub fn into_resource(self, category: ResourceCategory) -> Result<Resource> {
        Ok(Resource::new(
            &self.id,
            self.name,
            self.resource_type,
            self.resource_group,
            category,
        )?
        .with_power_state(self.power_state))
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AzAlertRule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub criteria: Option<AzAlertCriteria>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AzAlertCriteria {
    #[serde(default)]
    pub all_of: Vec<AzMetricCriterion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AzMetricCriterion {
    #[serde(default)]
    pub metric_name: String,
    #[serde(default)]
    pub operator: String,
    /// Absent for dynamic-threshold criteria
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub time_aggregation: String,
}

impl From<AzAlertRule> for AlertRule {
    fn from(rule: AzAlertRule) -> Self {
        let criteria = rule
            .criteria
            .unwrap_or_default()
            .all_of
            .into_iter()
            .map(|c| AlertCriterion {
                time_aggregation: c.time_aggregation,
                metric_name: c.metric_name,
                operator: c.operator,
                threshold: c.threshold.unwrap_or_default(),
            })
            .collect();

        AlertRule::new(rule.id, rule.name, rule.scopes, criteria)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct AzShortDescription {
    #[serde(default)]
    pub problem: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AzRecommendation {
    #[serde(default)]
    pub short_description: AzShortDescription,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub impacted_field: String,
    #[serde(default)]
    pub impacted_value: String,
    #[serde(default)]
    pub resource_group: String,
    #[serde(default)]
    pub category: String,
}

impl From<AzRecommendation> for Recommendation {
    fn from(rec: AzRecommendation) -> Self {
        Recommendation {
            problem: rec.short_description.problem,
            impact: Impact::parse(&rec.impact),
            impacted_field: rec.impacted_field,
            impacted_value: rec.impacted_value,
            resource_group: rec.resource_group,
            category: rec.category,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AzPatchAssessment {
    #[serde(default)]
    pub assessment_activity_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub start_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub critical_and_security_patch_count: u32,
    #[serde(default)]
    pub other_patch_count: u32,
    #[serde(default)]
    pub reboot_pending: bool,
    #[serde(default)]
    pub available_patches: Vec<AzPatch>,
    #[serde(default)]
    pub error: Option<AzAssessmentError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AzPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub patch_id: Option<String>,
    #[serde(default)]
    pub kb_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub classifications: Option<Vec<String>>,
    #[serde(default)]
    pub reboot_behavior: Option<String>,
    #[serde(default)]
    pub assessment_state: Option<String>,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AzAssessmentError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<AzPatchAssessment> for PatchAssessmentResult {
    fn from(raw: AzPatchAssessment) -> Self {
        let available_patches = raw
            .available_patches
            .into_iter()
            .map(|p| PatchDescriptor {
                name: p.name.unwrap_or_default(),
                patch_id: p.patch_id.unwrap_or_default(),
                kb_id: p.kb_id.filter(|kb| !kb.is_empty()),
                version: p.version.filter(|v| !v.is_empty()),
                classifications: p.classifications.unwrap_or_default(),
                reboot_behavior: p.reboot_behavior,
                assessment_state: p.assessment_state,
                published_date: p.published_date,
            })
            .collect();

        // The CLI reports `"error": {"code": null, ...}` on success.
        let error = raw.error.and_then(|e| match (e.code, e.message) {
            (None, None) => None,
            (code, message) => Some(AssessmentError {
                code: code.unwrap_or_default(),
                message: message.unwrap_or_default(),
            }),
        });

        PatchAssessmentResult {
            assessment_activity_id: raw.assessment_activity_id,
            status: raw.status.unwrap_or_else(|| "Unknown".to_string()),
            started_at: raw.start_date_time,
            critical_and_security_patch_count: raw.critical_and_security_patch_count,
            other_patch_count: raw.other_patch_count,
            reboot_pending: raw.reboot_pending,
            available_patches,
            error,
        }
    }
}
