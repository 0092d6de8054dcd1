use crate::application::dto::{AuditRequest, AuditResponse};
use crate::application::enrichment::EnrichmentCoordinator;
use crate::audit::domain::{
    AuditMetadata, EnrichmentSummary, LookupErrorKind, PatchAssessmentResult, Recommendation,
    Resource, ResourceCategory, ResourceRegistry,
};
use crate::audit::services::{AlertRuleAssigner, RecommendationGrouper};
use crate::ports::outbound::{ProgressReporter, ResourceInventory, ResourceLookup};
use crate::shared::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

/// RunAuditUseCase - Core use case for auditing one subscription
///
/// This use case orchestrates the audit workflow using generic dependency
/// injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `INV` - ResourceInventory implementation
/// * `BL` - Backup vault lookup (resolves a VM to its vault resource)
/// * `PL` - Patch assessment lookup
/// * `PR` - ProgressReporter implementation
pub struct RunAuditUseCase<INV, BL, PL, PR> {
    inventory: INV,
    backup_lookup: Arc<BL>,
    patch_lookup: Arc<PL>,
    progress_reporter: PR,
}

impl<INV, BL, PL, PR> RunAuditUseCase<INV, BL, PL, PR>
where
    INV: ResourceInventory,
    BL: ResourceLookup<Value = Resource>,
    PL: ResourceLookup<Value = PatchAssessmentResult>,
    PR: ProgressReporter,
{
    /// Creates a new RunAuditUseCase with injected dependencies
    pub fn new(inventory: INV, backup_lookup: BL, patch_lookup: PL, progress_reporter: PR) -> Self {
        Self {
            inventory,
            backup_lookup: Arc::new(backup_lookup),
            patch_lookup: Arc::new(patch_lookup),
            progress_reporter,
        }
    }

    /// Executes the audit
    ///
    /// Inventory, alert rule and recommendation failures abort the run.
    /// Per-resource lookup failures do not: they end up in the summaries and
    /// on the resources.
    pub async fn execute(&self, request: AuditRequest) -> Result<AuditResponse> {
        // Step 1: Select the subscription
        self.select_subscription(&request)?;

        // Step 2: Load every audited category into one registry
        let mut registry = self.load_inventory()?;

        // Step 3: Join alert rules onto resources
        self.assign_alert_rules(&mut registry)?;

        // Step 4: Enrichment passes, one at a time over the same worker pool
        let coordinator =
            EnrichmentCoordinator::new(request.lookup_timeout, request.max_concurrency);
        let mut summaries = Vec::new();

        if request.check_backups {
            self.progress_reporter
                .report("💾 Checking virtual machine backups...");
            let summary = self
                .run_pass(&coordinator, &mut registry, &self.backup_lookup)
                .await?;
            summaries.push(summary);
        } else {
            self.progress_reporter
                .report("⏭️  Skipping backup check (--skip-backups)");
        }

        if request.assess_patches {
            self.progress_reporter
                .report("🩹 Assessing virtual machine patches (this can take a few minutes)...");
            let summary = self
                .run_pass(&coordinator, &mut registry, &self.patch_lookup)
                .await?;
            summaries.push(summary);
        } else {
            self.progress_reporter
                .report("⏭️  Skipping patch assessment (--skip-patches)");
        }

        // Step 5: Advisor recommendations
        let recommendations = self.fetch_recommendations()?;

        // Step 6: Build and return response
        let metadata = AuditMetadata::generate(&request.subscription_id, &request.client_name);
        Ok(AuditResponse::new(
            registry,
            recommendations,
            summaries,
            metadata,
        ))
    }

    fn select_subscription(&self, request: &AuditRequest) -> Result<()> {
        self.progress_reporter.report(&format!(
            "🔑 Selecting subscription: {}",
            request.subscription_id
        ));
        self.inventory.set_subscription(&request.subscription_id)
    }

    fn load_inventory(&self) -> Result<ResourceRegistry> {
        self.progress_reporter
            .report("📖 Fetching subscription inventory...");

        let mut registry = ResourceRegistry::new();
        for category in ResourceCategory::AUDITED {
            let resources = self.inventory.fetch_resources(category)?;
            self.progress_reporter.report(&format!(
                "   - {}: {}",
                category.title(),
                resources.len()
            ));
            for resource in resources {
                registry.set(resource);
            }
        }

        self.progress_reporter
            .report(&format!("✅ Found {} resource(s)", registry.len()));
        Ok(registry)
    }

    fn assign_alert_rules(&self, registry: &mut ResourceRegistry) -> Result<()> {
        self.progress_reporter.report("🔔 Fetching metric alert rules...");

        let rules = self.inventory.fetch_alert_rules()?;
        let attached = AlertRuleAssigner::assign(&rules, registry);

        self.progress_reporter.report(&format!(
            "   - {} rule(s), {} resource assignment(s)",
            rules.len(),
            attached
        ));
        Ok(())
    }

    /// Runs one lookup over every virtual machine and reports the result
    async fn run_pass<L: ResourceLookup>(
        &self,
        coordinator: &EnrichmentCoordinator,
        registry: &mut ResourceRegistry,
        lookup: &Arc<L>,
    ) -> Result<EnrichmentSummary> {
        let resource_ids = registry.ids_in(ResourceCategory::VirtualMachine);
        let label = lookup.kind().label();

        let pass = coordinator
            .enrich_with_progress(registry, &resource_ids, Arc::clone(lookup), |current, total| {
                self.progress_reporter
                    .report_progress(current, total, Some(label));
            })
            .await?;

        for outcome in &pass.outcomes {
            let Some(error) = outcome.error() else {
                continue;
            };
            if !error.kind.is_failure() {
                continue;
            }
            let name = registry
                .get(outcome.resource_id())
                .map(Resource::name)
                .unwrap_or_else(|| outcome.resource_id().as_str());
            let marker = if error.kind == LookupErrorKind::Timeout {
                "⏱️ "
            } else {
                "⚠️ "
            };
            self.progress_reporter.report_error(&format!(
                "{} Warning: {} lookup for {} failed ({}: {})",
                marker, label, name, error.kind, error.message
            ));
        }

        let summary = pass.summary;
        self.progress_reporter.report_completion(&format!(
            "✅ {} pass complete: {} of {} succeeded, {} negative, {} failed ({:.1}s)",
            capitalize(label),
            summary.succeeded(),
            summary.attempted(),
            summary.negative(),
            summary.failed(),
            summary.elapsed().as_secs_f64()
        ));

        Ok(summary)
    }

    fn fetch_recommendations(&self) -> Result<BTreeMap<String, Vec<Recommendation>>> {
        self.progress_reporter
            .report("💡 Fetching Advisor recommendations...");

        let recommendations = self.inventory.fetch_recommendations()?;
        let count = recommendations.len();
        let grouped = RecommendationGrouper::group(recommendations);

        self.progress_reporter.report(&format!(
            "   - {} recommendation(s) in {} categor{}",
            count,
            grouped.len(),
            if grouped.len() == 1 { "y" } else { "ies" }
        ));
        Ok(grouped)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
