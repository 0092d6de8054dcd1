//! Builder for constructing AuditReadModel from domain objects
//!
//! This module provides the builder that transforms the enriched registry
//! into the query-optimized read model.

use super::audit_read_model::{AuditMetadataView, AuditReadModel, EnrichmentSummaryView};
use super::recommendation_view::{RecommendationCategoryView, RecommendationView};
use super::resource_view::{
    AlertRuleView, BackupStatus, BackupStatusView, MonitoredResourceView, MonitoringSectionView,
    PatchView, VmPatchView,
};
use crate::audit::domain::{
    AuditMetadata, EnrichmentSummary, LookupErrorKind, LookupKind, Recommendation, Resource,
    ResourceCategory, ResourceRegistry,
};
use std::collections::BTreeMap;

/// Builder for constructing AuditReadModel from domain objects
pub struct AuditReadModelBuilder;

impl AuditReadModelBuilder {
    /// Builds an AuditReadModel from the final registry
    ///
    /// # Arguments
    /// * `registry` - Registry after every enrichment pass has finished
    /// * `recommendations` - Advisor recommendations grouped by category
    /// * `summaries` - One summary per pass that ran; a missing pass means the
    ///   matching report section is omitted
    /// * `metadata` - Report metadata
    pub fn build(
        registry: &ResourceRegistry,
        recommendations: &BTreeMap<String, Vec<Recommendation>>,
        summaries: &[EnrichmentSummary],
        metadata: &AuditMetadata,
    ) -> AuditReadModel {
        let pass_ran = |kind: LookupKind| summaries.iter().any(|s| s.kind() == kind);
        let vms = registry.in_category(ResourceCategory::VirtualMachine);

        AuditReadModel {
            metadata: Self::build_metadata(metadata),
            monitoring: Self::build_monitoring(registry),
            backups: pass_ran(LookupKind::BackupVault)
                .then(|| vms.iter().map(|vm| Self::build_backup_status(vm)).collect()),
            deallocated_vms: vms
                .iter()
                .filter(|vm| vm.is_deallocated())
                .map(|vm| vm.name().to_string())
                .collect(),
            patches: pass_ran(LookupKind::PatchAssessment)
                .then(|| vms.iter().map(|vm| Self::build_patches(vm)).collect()),
            recommendations: Self::build_recommendations(recommendations),
            enrichment: summaries.iter().map(Self::build_summary).collect(),
        }
    }

    fn build_metadata(metadata: &AuditMetadata) -> AuditMetadataView {
        AuditMetadataView {
            subscription_id: metadata.subscription_id().to_string(),
            client_name: metadata.client_name().to_string(),
            generated_at: metadata.generated_at().to_rfc3339(),
            report_date: metadata.generated_at().format("%Y-%m-%d").to_string(),
            tool_name: metadata.tool_name().to_string(),
            tool_version: metadata.tool_version().to_string(),
            report_id: metadata.report_id().to_string(),
        }
    }

    fn build_monitoring(registry: &ResourceRegistry) -> Vec<MonitoringSectionView> {
        ResourceCategory::AUDITED
            .iter()
            .map(|&category| MonitoringSectionView {
                title: category.title().to_string(),
                resources: registry
                    .in_category(category)
                    .into_iter()
                    .map(|resource| MonitoredResourceView {
                        name: resource.name().to_string(),
                        resource_group: resource.resource_group().to_string(),
                        alert_rules: resource
                            .alert_rules()
                            .iter()
                            .map(|rule| AlertRuleView {
                                name: rule.name().to_string(),
                                criteria: rule.criteria().iter().map(|c| c.describe()).collect(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }

    fn build_backup_status(vm: &Resource) -> BackupStatusView {
        let error = vm.lookup_error(LookupKind::BackupVault);
        let (status, vault_name, detail) = match (vm.backup_vault(), error) {
            (Some(vault), _) => (
                BackupStatus::Protected,
                Some(vault.name().to_string()),
                None,
            ),
            (None, Some(error)) if error.kind == LookupErrorKind::NotBackedUp => {
                (BackupStatus::NotBackedUp, None, None)
            }
            (None, Some(error)) => (BackupStatus::Unknown, None, Some(error.to_string())),
            (None, None) => (BackupStatus::Unknown, None, Some("not checked".to_string())),
        };

        BackupStatusView {
            name: vm.name().to_string(),
            resource_group: vm.resource_group().to_string(),
            status,
            vault_name,
            detail,
        }
    }

    fn build_patches(vm: &Resource) -> VmPatchView {
        let mut view = VmPatchView {
            name: vm.name().to_string(),
            resource_group: vm.resource_group().to_string(),
            status: None,
            critical_and_security_patch_count: 0,
            other_patch_count: 0,
            reboot_pending: false,
            patches: Vec::new(),
            assessment_error: None,
            lookup_error: None,
        };

        match vm.patch_assessment() {
            Some(assessment) => {
                view.status = Some(assessment.status.clone());
                view.critical_and_security_patch_count =
                    assessment.critical_and_security_patch_count;
                view.other_patch_count = assessment.other_patch_count;
                view.reboot_pending = assessment.reboot_pending;
                view.patches = assessment
                    .available_patches
                    .iter()
                    .map(|patch| PatchView {
                        name: patch.name.clone(),
                        patch_id: patch.patch_id.clone(),
                        kb_id: patch.kb_id.clone(),
                        version: patch.version.clone(),
                        classifications: patch.classifications.clone(),
                        reboot_behavior: patch.reboot_behavior.clone(),
                    })
                    .collect();
                view.assessment_error = assessment
                    .error
                    .as_ref()
                    .map(|e| format!("{}: {}", e.code, e.message));
            }
            None => {
                view.lookup_error = Some(
                    vm.lookup_error(LookupKind::PatchAssessment)
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| "not assessed".to_string()),
                );
            }
        }

        view
    }

    fn build_recommendations(
        grouped: &BTreeMap<String, Vec<Recommendation>>,
    ) -> Vec<RecommendationCategoryView> {
        grouped
            .iter()
            .map(|(category, recommendations)| RecommendationCategoryView {
                category: category.clone(),
                recommendations: recommendations
                    .iter()
                    .map(|r| RecommendationView {
                        problem: r.problem.clone(),
                        impact: r.impact.to_string(),
                        impacted_field: r.impacted_field.clone(),
                        impacted_value: r.impacted_value.clone(),
                        resource_group: r.resource_group.clone(),
                    })
                    .collect(),
            })
            .collect()
    }

    fn build_summary(summary: &EnrichmentSummary) -> EnrichmentSummaryView {
        EnrichmentSummaryView {
            lookup: summary.kind().label().to_string(),
            attempted: summary.attempted(),
            succeeded: summary.succeeded(),
            negative: summary.negative(),
            timed_out: summary.count(LookupErrorKind::Timeout),
            lookup_failed: summary.count(LookupErrorKind::LookupFailed),
            decode_failed: summary.count(LookupErrorKind::DecodeFailed),
            elapsed_ms: summary.elapsed().as_millis(),
        }
    }
}
