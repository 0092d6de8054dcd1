use crate::application::read_models::{
    AuditMetadataView, AuditReadModel, BackupStatus, BackupStatusView, EnrichmentSummaryView,
    MonitoringSectionView, RecommendationCategoryView, VmPatchView,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Markdown table header for the enrichment summary
const SUMMARY_TABLE_HEADER: &str =
    "| Lookup | Attempted | Succeeded | Negative | Timed out | Failed | Undecodable | Elapsed |\n";

/// Markdown table separator line for the enrichment summary
const SUMMARY_TABLE_SEPARATOR: &str =
    "|--------|-----------|-----------|----------|-----------|--------|-------------|---------|\n";

/// Markdown table header for available patches
const PATCH_TABLE_HEADER: &str = "| Patch | Patch ID | KB ID | Version | Reboot |\n";

/// Markdown table separator line for available patches
const PATCH_TABLE_SEPARATOR: &str = "|-------|----------|-------|---------|--------|\n";

const NO_RULES_ACTION: &str = "If this resource is used in production, create resource alert rules. Non-production resources are not monitored.";
const REVIEW_RULES_ACTION: &str =
    "Review alert rules and confirm that they are appropriate for this resource.";
const NO_BACKUP_ACTION: &str = "If this is a production machine, consider setting up backups using an Azure Recovery Services vault. If an alternative backup solution is being used, this recommendation can be ignored.";

/// MarkdownFormatter adapter for generating the audit report as Markdown
///
/// This adapter implements the ReportFormatter port. Section order follows
/// the printed report: monitoring per category, backups, deallocated VMs,
/// patches, advisor recommendations, then the enrichment summary.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    /// Escapes characters that would start Markdown markup in running text
    fn escape_markdown_text(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|') {
                escaped.push('\\');
            }
            escaped.push(if c == '\n' { ' ' } else { c });
        }
        escaped
    }

    fn or_na(value: Option<&str>) -> String {
        Self::escape_markdown_table_cell(value.unwrap_or("N/A"))
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, metadata: &AuditMetadataView) {
        output.push_str(&format!(
            "# Managed Services Report: {}\n\n",
            Self::escape_markdown_text(&metadata.client_name)
        ));
        output.push_str(&format!(
            "- **Subscription:** `{}`\n",
            metadata.subscription_id
        ));
        output.push_str(&format!("- **Date:** {}\n", metadata.report_date));
        output.push_str(&format!(
            "- **Generated by:** {} {}\n",
            metadata.tool_name, metadata.tool_version
        ));
        output.push_str(&format!("- **Report ID:** {}\n\n", metadata.report_id));
    }

    fn render_monitoring(&self, output: &mut String, section: &MonitoringSectionView) {
        output.push_str(&format!(
            "## Monitoring: {}\n\n",
            Self::escape_markdown_text(&section.title)
        ));

        if section.resources.is_empty() {
            output.push_str("*No resources of this type.*\n\n");
            return;
        }

        for resource in &section.resources {
            output.push_str(&format!(
                "### {} ({})\n\n",
                Self::escape_markdown_text(&resource.name),
                Self::escape_markdown_text(&resource.resource_group)
            ));

            if resource.alert_rules.is_empty() {
                output.push_str("⚠️ **No alert rules are configured for this resource.**\n\n");
                output.push_str(&format!("**Action to be performed:** {}\n\n", NO_RULES_ACTION));
                continue;
            }

            output.push_str(&format!(
                "This resource has {} alert rule(s) configured:\n\n",
                resource.alert_rules.len()
            ));
            for rule in &resource.alert_rules {
                output.push_str(&format!(
                    "- **{}**\n",
                    Self::escape_markdown_text(&rule.name)
                ));
                for criterion in &rule.criteria {
                    output.push_str(&format!(
                        "  - Criteria: {}\n",
                        Self::escape_markdown_text(criterion)
                    ));
                }
            }
            output.push('\n');
            output.push_str(&format!(
                "**Action to be performed:** {}\n\n",
                REVIEW_RULES_ACTION
            ));
        }
    }

    fn render_backups(&self, output: &mut String, backups: &[BackupStatusView]) {
        output.push_str("## Virtual Machine Backups\n\n");

        if backups.is_empty() {
            output.push_str("*No virtual machines in this subscription.*\n\n");
            return;
        }

        for vm in backups {
            output.push_str(&format!(
                "### {}\n\n",
                Self::escape_markdown_text(&vm.name)
            ));
            match vm.status {
                BackupStatus::Protected => {
                    output.push_str(&format!(
                        "This virtual machine is backed up to {}.\n\n",
                        Self::escape_markdown_text(vm.vault_name.as_deref().unwrap_or("a vault"))
                    ));
                    output.push_str("**Action to be performed:** None\n\n");
                }
                BackupStatus::NotBackedUp => {
                    output.push_str("⚠️ **This virtual machine is not backed up.**\n\n");
                    output.push_str(&format!(
                        "**Action to be performed:** {}\n\n",
                        NO_BACKUP_ACTION
                    ));
                }
                BackupStatus::Unknown => {
                    output.push_str(&format!(
                        "❓ The backup status could not be determined ({}).\n\n",
                        Self::escape_markdown_text(vm.detail.as_deref().unwrap_or("unknown"))
                    ));
                    output.push_str(
                        "**Action to be performed:** Verify the backup configuration manually.\n\n",
                    );
                }
            }
        }
    }

    fn render_deallocated(&self, output: &mut String, names: &[String]) {
        output.push_str("## Deallocated Virtual Machines\n\n");

        if names.is_empty() {
            output.push_str("*No deallocated virtual machines.*\n\n");
            return;
        }

        for name in names {
            output.push_str(&format!("- {}\n", Self::escape_markdown_text(name)));
        }
        output.push('\n');
    }

    fn render_patches(&self, output: &mut String, vms: &[VmPatchView]) {
        output.push_str("## Virtual Machine Patches\n\n");

        if vms.is_empty() {
            output.push_str("*No virtual machines in this subscription.*\n\n");
            return;
        }

        for vm in vms {
            output.push_str(&format!(
                "### {}\n\n",
                Self::escape_markdown_text(&vm.name)
            ));

            if let Some(error) = &vm.lookup_error {
                output.push_str(&format!(
                    "❓ No patch assessment is available ({}).\n\n",
                    Self::escape_markdown_text(error)
                ));
                continue;
            }

            output.push_str(&format!(
                "Assessment status: {}. {} patch(es) available ({} critical or security, {} other).",
                Self::escape_markdown_text(vm.status.as_deref().unwrap_or("Unknown")),
                vm.patches.len(),
                vm.critical_and_security_patch_count,
                vm.other_patch_count
            ));
            if vm.reboot_pending {
                output.push_str(" **A reboot is pending.**");
            }
            output.push_str("\n\n");

            if let Some(error) = &vm.assessment_error {
                output.push_str(&format!(
                    "⚠️ The assessment reported an error: {}\n\n",
                    Self::escape_markdown_text(error)
                ));
            }

            if !vm.patches.is_empty() {
                output.push_str(PATCH_TABLE_HEADER);
                output.push_str(PATCH_TABLE_SEPARATOR);
                for patch in &vm.patches {
                    output.push_str(&format!(
                        "| {} | {} | {} | {} | {} |\n",
                        Self::escape_markdown_table_cell(&patch.name),
                        Self::escape_markdown_table_cell(&patch.patch_id),
                        Self::or_na(patch.kb_id.as_deref()),
                        Self::or_na(patch.version.as_deref()),
                        Self::or_na(patch.reboot_behavior.as_deref())
                    ));
                }
                output.push('\n');
            }
        }
    }

    fn render_recommendations(&self, output: &mut String, category: &RecommendationCategoryView) {
        output.push_str(&format!(
            "## Advisory Recommendations: {}\n\n",
            Self::escape_markdown_text(&category.category)
        ));

        if category.recommendations.is_empty() {
            output.push_str("*No recommendations in this category. Looking good!*\n\n");
            return;
        }

        for rec in &category.recommendations {
            let marker = match rec.impact.as_str() {
                "High" => "🔴",
                "Medium" => "🟠",
                _ => "⚪",
            };
            output.push_str(&format!(
                "- {} **{}**\n",
                marker,
                Self::escape_markdown_text(&rec.problem)
            ));
            output.push_str(&format!("  - Impact: {}\n", rec.impact));
            output.push_str(&format!(
                "  - Resource Type: {}\n",
                Self::escape_markdown_text(&rec.impacted_field)
            ));
            output.push_str(&format!(
                "  - Affected Resource: {}\n",
                Self::escape_markdown_text(&rec.impacted_value)
            ));
            if !rec.resource_group.is_empty() {
                output.push_str(&format!(
                    "  - Resource Group: {}\n",
                    Self::escape_markdown_text(&rec.resource_group)
                ));
            }
        }
        output.push('\n');
    }

    fn render_enrichment_summary(&self, output: &mut String, summaries: &[EnrichmentSummaryView]) {
        if summaries.is_empty() {
            return;
        }

        output.push_str("## Lookup Summary\n\n");
        output.push_str(SUMMARY_TABLE_HEADER);
        output.push_str(SUMMARY_TABLE_SEPARATOR);
        for summary in summaries {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {:.1}s |\n",
                Self::escape_markdown_table_cell(&summary.lookup),
                summary.attempted,
                summary.succeeded,
                summary.negative,
                summary.timed_out,
                summary.lookup_failed,
                summary.decode_failed,
                summary.elapsed_ms as f64 / 1000.0
            ));
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, model: &AuditReadModel) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, &model.metadata);

        for section in &model.monitoring {
            self.render_monitoring(&mut output, section);
        }

        if let Some(backups) = &model.backups {
            self.render_backups(&mut output, backups);
        }

        self.render_deallocated(&mut output, &model.deallocated_vms);

        if let Some(patches) = &model.patches {
            self.render_patches(&mut output, patches);
        }

        for category in &model.recommendations {
            self.render_recommendations(&mut output, category);
        }

        self.render_enrichment_summary(&mut output, &model.enrichment);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{empty_read_model, full_read_model};
    use super::*;

    #[test]
    fn test_header() {
        let output = MarkdownFormatter::new().format(&full_read_model()).unwrap();

        assert!(output.starts_with("# Managed Services Report: Contoso\n"));
        assert!(output.contains("- **Subscription:** `0000-1111`"));
        assert!(output.contains("- **Date:** 2024-03-07"));
    }

    #[test]
    fn test_monitoring_sections() {
        let output = MarkdownFormatter::new().format(&full_read_model()).unwrap();

        assert!(output.contains("## Monitoring: Virtual Machines"));
        assert!(output.contains("### vm-web (prod-rg)"));
        assert!(output.contains("This resource has 1 alert rule(s) configured"));
        assert!(output.contains("  - Criteria: Average Percentage CPU GreaterThan 80.00"));
        assert!(output.contains("**No alert rules are configured for this resource.**"));
        assert!(output.contains("## Monitoring: Web Apps\n\n*No resources of this type.*"));
    }

    #[test]
    fn test_backup_section_shows_each_status() {
        let output = MarkdownFormatter::new().format(&full_read_model()).unwrap();

        assert!(output.contains("This virtual machine is backed up to vault-a."));
        assert!(output.contains("**This virtual machine is not backed up.**"));
        assert!(output.contains(
            "The backup status could not be determined (timeout: no answer within 300s)."
        ));
    }

    #[test]
    fn test_patch_section() {
        let output = MarkdownFormatter::new().format(&full_read_model()).unwrap();

        assert!(output.contains("## Virtual Machine Patches"));
        assert!(output.contains("1 patch(es) available (1 critical or security, 0 other)."));
        assert!(output.contains("**A reboot is pending.**"));
        assert!(output.contains("| 2024-02 Cumulative Update | p1 | 5034768 | N/A | CanRequestReboot |"));
        assert!(output.contains("No patch assessment is available (decode failed: bad json)."));
    }

    #[test]
    fn test_recommendations_escape_markup() {
        let output = MarkdownFormatter::new().format(&full_read_model()).unwrap();

        assert!(output.contains("## Advisory Recommendations: Security"));
        assert!(output.contains("🔴 **Enable MFA \\| for owners**"));
        assert!(!output.contains("Resource Group:"));
    }

    #[test]
    fn test_enrichment_summary_table() {
        let output = MarkdownFormatter::new().format(&full_read_model()).unwrap();

        assert!(output.contains(SUMMARY_TABLE_HEADER));
        assert!(output.contains("| backup vault | 3 | 1 | 1 | 1 | 0 | 0 | 1.2s |"));
    }

    #[test]
    fn test_skipped_passes_are_omitted() {
        let output = MarkdownFormatter::new().format(&empty_read_model()).unwrap();

        assert!(!output.contains("## Virtual Machine Backups"));
        assert!(!output.contains("## Virtual Machine Patches"));
        assert!(!output.contains("## Lookup Summary"));
        assert!(output.contains("*No deallocated virtual machines.*"));
    }

    #[test]
    fn test_escape_markdown_text() {
        assert_eq!(
            MarkdownFormatter::escape_markdown_text("a_b *c* [d]"),
            "a\\_b \\*c\\* \\[d\\]"
        );
        assert_eq!(MarkdownFormatter::escape_markdown_text("x\ny"), "x y");
    }
}
