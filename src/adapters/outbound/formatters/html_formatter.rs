use crate::application::read_models::{
    AuditMetadataView, AuditReadModel, BackupStatus, BackupStatusView, EnrichmentSummaryView,
    MonitoringSectionView, RecommendationCategoryView, VmPatchView,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

const STYLESHEET: &str = r#"
body { font-family: "Segoe UI", Arial, sans-serif; margin: 2cm; color: #222; }
h1 { color: #0b3d91; border-bottom: 2px solid #0b3d91; }
h2 { color: #0b3d91; margin-top: 2em; page-break-after: avoid; }
h3 { margin-bottom: 0.3em; }
table { border-collapse: collapse; width: 100%; margin: 0.5em 0 1em; }
th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }
th { background: #eef2f8; }
.action { font-weight: bold; }
.empty { font-style: italic; color: #666; }
.danger { color: #b00020; font-weight: bold; }
.warn { color: #b36b00; font-weight: bold; }
.ok { color: #1b7e2a; }
@media print { section { page-break-inside: avoid; } }
"#;

const NO_RULES_ACTION: &str = "If this resource is used in production, create resource alert rules. Non-production resources are not monitored.";
const REVIEW_RULES_ACTION: &str =
    "Review alert rules and confirm that they are appropriate for this resource.";
const NO_BACKUP_ACTION: &str = "If this is a production machine, consider setting up backups using an Azure Recovery Services vault. If an alternative backup solution is being used, this recommendation can be ignored.";

/// HtmlFormatter adapter producing a self-contained printable report
///
/// Every value taken from Azure is escaped before it is written.
pub struct HtmlFormatter;

impl HtmlFormatter {
    pub fn new() -> Self {
        Self
    }

    fn escape_html(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                _ => escaped.push(c),
            }
        }
        escaped
    }

    fn impact_class(impact: &str) -> &'static str {
        match impact {
            "High" => "danger",
            "Medium" => "warn",
            _ => "",
        }
    }

    fn action(output: &mut String, text: &str) {
        output.push_str(&format!(
            "<p><span class=\"action\">Action to be performed:</span> {}</p>\n",
            Self::escape_html(text)
        ));
    }

    fn empty(output: &mut String, text: &str) {
        output.push_str(&format!("<p class=\"empty\">{}</p>\n", text));
    }
}

impl HtmlFormatter {
    fn render_header(&self, output: &mut String, metadata: &AuditMetadataView) {
        let client = Self::escape_html(&metadata.client_name);
        output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        output.push_str(&format!(
            "<title>{} Managed Services Report {}</title>\n",
            client, metadata.report_date
        ));
        output.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLESHEET));
        output.push_str(&format!("<h1>Managed Services Report: {}</h1>\n", client));
        output.push_str("<table>\n");
        output.push_str(&format!(
            "<tr><th>Subscription</th><td><code>{}</code></td></tr>\n",
            Self::escape_html(&metadata.subscription_id)
        ));
        output.push_str(&format!(
            "<tr><th>Date</th><td>{}</td></tr>\n",
            Self::escape_html(&metadata.report_date)
        ));
        output.push_str(&format!(
            "<tr><th>Generated by</th><td>{} {}</td></tr>\n",
            Self::escape_html(&metadata.tool_name),
            Self::escape_html(&metadata.tool_version)
        ));
        output.push_str(&format!(
            "<tr><th>Report ID</th><td>{}</td></tr>\n",
            Self::escape_html(&metadata.report_id)
        ));
        output.push_str("</table>\n");
    }

    fn render_monitoring(&self, output: &mut String, section: &MonitoringSectionView) {
        output.push_str(&format!(
            "<section>\n<h2>Monitoring: {}</h2>\n",
            Self::escape_html(&section.title)
        ));

        if section.resources.is_empty() {
            Self::empty(output, "No resources of this type.");
            output.push_str("</section>\n");
            return;
        }

        for resource in &section.resources {
            output.push_str(&format!(
                "<h3>{} <small>({})</small></h3>\n",
                Self::escape_html(&resource.name),
                Self::escape_html(&resource.resource_group)
            ));

            if resource.alert_rules.is_empty() {
                output.push_str(
                    "<p class=\"danger\">No alert rules are configured for this resource.</p>\n",
                );
                Self::action(output, NO_RULES_ACTION);
                continue;
            }

            output.push_str("<ul>\n");
            for rule in &resource.alert_rules {
                output.push_str(&format!("<li><strong>{}</strong>", Self::escape_html(&rule.name)));
                if !rule.criteria.is_empty() {
                    output.push_str("<ul>");
                    for criterion in &rule.criteria {
                        output.push_str(&format!("<li>{}</li>", Self::escape_html(criterion)));
                    }
                    output.push_str("</ul>");
                }
                output.push_str("</li>\n");
            }
            output.push_str("</ul>\n");
            Self::action(output, REVIEW_RULES_ACTION);
        }
        output.push_str("</section>\n");
    }

    fn render_backups(&self, output: &mut String, backups: &[BackupStatusView]) {
        output.push_str("<section>\n<h2>Virtual Machine Backups</h2>\n");

        if backups.is_empty() {
            Self::empty(output, "No virtual machines in this subscription.");
            output.push_str("</section>\n");
            return;
        }

        output.push_str("<table>\n<tr><th>Virtual machine</th><th>Resource group</th><th>Status</th><th>Vault</th></tr>\n");
        for vm in backups {
            let (class, label) = match vm.status {
                BackupStatus::Protected => ("ok", "Backed up".to_string()),
                BackupStatus::NotBackedUp => ("danger", "Not backed up".to_string()),
                BackupStatus::Unknown => (
                    "warn",
                    format!("Unknown ({})", vm.detail.as_deref().unwrap_or("unknown")),
                ),
            };
            output.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
                Self::escape_html(&vm.name),
                Self::escape_html(&vm.resource_group),
                class,
                Self::escape_html(&label),
                Self::escape_html(vm.vault_name.as_deref().unwrap_or("-"))
            ));
        }
        output.push_str("</table>\n");

        if backups
            .iter()
            .any(|vm| vm.status == BackupStatus::NotBackedUp)
        {
            Self::action(output, NO_BACKUP_ACTION);
        }
        output.push_str("</section>\n");
    }

    fn render_deallocated(&self, output: &mut String, names: &[String]) {
        output.push_str("<section>\n<h2>Deallocated Virtual Machines</h2>\n");

        if names.is_empty() {
            Self::empty(output, "No deallocated virtual machines.");
        } else {
            output.push_str("<ul>\n");
            for name in names {
                output.push_str(&format!("<li>{}</li>\n", Self::escape_html(name)));
            }
            output.push_str("</ul>\n");
        }
        output.push_str("</section>\n");
    }

    fn render_patches(&self, output: &mut String, vms: &[VmPatchView]) {
        output.push_str("<section>\n<h2>Virtual Machine Patches</h2>\n");

        if vms.is_empty() {
            Self::empty(output, "No virtual machines in this subscription.");
            output.push_str("</section>\n");
            return;
        }

        for vm in vms {
            output.push_str(&format!("<h3>{}</h3>\n", Self::escape_html(&vm.name)));

            if let Some(error) = &vm.lookup_error {
                output.push_str(&format!(
                    "<p class=\"warn\">No patch assessment is available ({}).</p>\n",
                    Self::escape_html(error)
                ));
                continue;
            }

            output.push_str(&format!(
                "<p>Assessment status: {}. Critical and security patches: {}. Other patches: {}.</p>\n",
                Self::escape_html(vm.status.as_deref().unwrap_or("Unknown")),
                vm.critical_and_security_patch_count,
                vm.other_patch_count
            ));
            if vm.reboot_pending {
                output.push_str("<p class=\"warn\">A reboot is pending.</p>\n");
            }
            if let Some(error) = &vm.assessment_error {
                output.push_str(&format!(
                    "<p class=\"warn\">The assessment reported an error: {}</p>\n",
                    Self::escape_html(error)
                ));
            }

            if vm.patches.is_empty() {
                continue;
            }
            output.push_str("<table>\n<tr><th>Patch</th><th>KB ID</th><th>Classification</th><th>Reboot</th></tr>\n");
            for patch in &vm.patches {
                output.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    Self::escape_html(&patch.name),
                    Self::escape_html(patch.kb_id.as_deref().unwrap_or("N/A")),
                    Self::escape_html(&patch.classifications.join(", ")),
                    Self::escape_html(patch.reboot_behavior.as_deref().unwrap_or("N/A"))
                ));
            }
            output.push_str("</table>\n");
        }
        output.push_str("</section>\n");
    }

    fn render_recommendations(&self, output: &mut String, category: &RecommendationCategoryView) {
        output.push_str(&format!(
            "<section>\n<h2>Advisory Recommendations: {}</h2>\n",
            Self::escape_html(&category.category)
        ));

        if category.recommendations.is_empty() {
            Self::empty(output, "No recommendations in this category.");
            output.push_str("</section>\n");
            return;
        }

        output.push_str("<table>\n<tr><th>Problem</th><th>Impact</th><th>Resource type</th><th>Affected resource</th></tr>\n");
        for rec in &category.recommendations {
            output.push_str(&format!(
                "<tr><td>{}</td><td class=\"{}\">{}</td><td>{}</td><td>{}</td></tr>\n",
                Self::escape_html(&rec.problem),
                Self::impact_class(&rec.impact),
                Self::escape_html(&rec.impact),
                Self::escape_html(&rec.impacted_field),
                Self::escape_html(&rec.impacted_value)
            ));
        }
        output.push_str("</table>\n</section>\n");
    }

    fn render_enrichment_summary(&self, output: &mut String, summaries: &[EnrichmentSummaryView]) {
        if summaries.is_empty() {
            return;
        }

        output.push_str("<section>\n<h2>Lookup Summary</h2>\n<table>\n");
        output.push_str("<tr><th>Lookup</th><th>Attempted</th><th>Succeeded</th><th>Negative</th><th>Timed out</th><th>Failed</th><th>Undecodable</th><th>Elapsed</th></tr>\n");
        for summary in summaries {
            output.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.1}s</td></tr>\n",
                Self::escape_html(&summary.lookup),
                summary.attempted,
                summary.succeeded,
                summary.negative,
                summary.timed_out,
                summary.lookup_failed,
                summary.decode_failed,
                summary.elapsed_ms as f64 / 1000.0
            ));
        }
        output.push_str("</table>\n</section>\n");
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for HtmlFormatter {
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

        output.push_str("</body>\n</html>\n");
        Ok(output)
    }
}
