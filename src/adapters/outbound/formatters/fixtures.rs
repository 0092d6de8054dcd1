use crate::application::read_models::{
    AlertRuleView, AuditMetadataView, AuditReadModel, BackupStatus, BackupStatusView,
    EnrichmentSummaryView, MonitoredResourceView, MonitoringSectionView, PatchView,
    RecommendationCategoryView, RecommendationView, VmPatchView,
};

/// Read model covering every report section
pub(super) fn full_read_model() -> AuditReadModel {
    AuditReadModel {
        metadata: AuditMetadataView {
            subscription_id: "0000-1111".to_string(),
            client_name: "Contoso".to_string(),
            generated_at: "2024-03-07T09:30:00+00:00".to_string(),
            report_date: "2024-03-07".to_string(),
            tool_name: "azure-checker".to_string(),
            tool_version: "0.4.0".to_string(),
            report_id: "urn:uuid:test-123".to_string(),
        },
        monitoring: vec![
            MonitoringSectionView {
                title: "Virtual Machines".to_string(),
                resources: vec![
                    MonitoredResourceView {
                        name: "vm-web".to_string(),
                        resource_group: "prod-rg".to_string(),
                        alert_rules: vec![AlertRuleView {
                            name: "cpu-high".to_string(),
                            criteria: vec!["Average Percentage CPU GreaterThan 80.00".to_string()],
                        }],
                    },
                    MonitoredResourceView {
                        name: "vm-db".to_string(),
                        resource_group: "prod-rg".to_string(),
                        alert_rules: vec![],
                    },
                ],
            },
            MonitoringSectionView {
                title: "Web Apps".to_string(),
                resources: vec![],
            },
        ],
        backups: Some(vec![
            BackupStatusView {
                name: "vm-web".to_string(),
                resource_group: "prod-rg".to_string(),
                status: BackupStatus::Protected,
                vault_name: Some("vault-a".to_string()),
                detail: None,
            },
            BackupStatusView {
                name: "vm-db".to_string(),
                resource_group: "prod-rg".to_string(),
                status: BackupStatus::NotBackedUp,
                vault_name: None,
                detail: None,
            },
            BackupStatusView {
                name: "vm-batch".to_string(),
                resource_group: "prod-rg".to_string(),
                status: BackupStatus::Unknown,
                vault_name: None,
                detail: Some("timeout: no answer within 300s".to_string()),
            },
        ]),
        deallocated_vms: vec!["vm-old".to_string()],
        patches: Some(vec![
            VmPatchView {
                name: "vm-web".to_string(),
                resource_group: "prod-rg".to_string(),
                status: Some("Succeeded".to_string()),
                critical_and_security_patch_count: 1,
                other_patch_count: 0,
                reboot_pending: true,
                patches: vec![PatchView {
                    name: "2024-02 Cumulative Update".to_string(),
                    patch_id: "p1".to_string(),
                    kb_id: Some("5034768".to_string()),
                    version: None,
                    classifications: vec!["Security".to_string()],
                    reboot_behavior: Some("CanRequestReboot".to_string()),
                }],
                assessment_error: None,
                lookup_error: None,
            },
            VmPatchView {
                name: "vm-db".to_string(),
                resource_group: "prod-rg".to_string(),
                status: None,
                critical_and_security_patch_count: 0,
                other_patch_count: 0,
                reboot_pending: false,
                patches: vec![],
                assessment_error: None,
                lookup_error: Some("decode failed: bad json".to_string()),
            },
        ]),
        recommendations: vec![RecommendationCategoryView {
            category: "Security".to_string(),
            recommendations: vec![RecommendationView {
                problem: "Enable MFA | for owners".to_string(),
                impact: "High".to_string(),
                impacted_field: "Microsoft.Subscriptions/subscriptions".to_string(),
                impacted_value: "0000-1111".to_string(),
                resource_group: String::new(),
            }],
        }],
        enrichment: vec![EnrichmentSummaryView {
            lookup: "backup vault".to_string(),
            attempted: 3,
            succeeded: 1,
            negative: 1,
            timed_out: 1,
            lookup_failed: 0,
            decode_failed: 0,
            elapsed_ms: 1200,
        }],
    }
}

/// Read model for a subscription with nothing in it and both passes skipped
pub(super) fn empty_read_model() -> AuditReadModel {
    let mut model = full_read_model();
    model.monitoring = vec![MonitoringSectionView {
        title: "Virtual Machines".to_string(),
        resources: vec![],
    }];
    model.backups = None;
    model.deallocated_vms = vec![];
    model.patches = None;
    model.recommendations = vec![];
    model.enrichment = vec![];
    model
}
