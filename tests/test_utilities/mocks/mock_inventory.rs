use azure_checker::audit::domain::{AlertRule, Impact, Recommendation};
use azure_checker::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock ResourceInventory serving canned resources per category
#[derive(Default)]
pub struct MockInventory {
    pub resources: HashMap<ResourceCategory, Vec<Resource>>,
    pub alert_rules: Vec<AlertRule>,
    pub recommendations: Vec<Recommendation>,
    pub should_fail: bool,
    pub selected_subscription: Arc<Mutex<Option<String>>>,
}

impl MockInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vm(mut self, name: &str) -> Self {
        let vm = Resource::new(
            &vm_id(name),
            name,
            "Microsoft.Compute/virtualMachines",
            "prod-rg",
            ResourceCategory::VirtualMachine,
        )
        .unwrap();
        self.resources
            .entry(ResourceCategory::VirtualMachine)
            .or_default()
            .push(vm);
        self
    }

    pub fn with_deallocated_vm(mut self, name: &str) -> Self {
        let vm = Resource::new(
            &vm_id(name),
            name,
            "Microsoft.Compute/virtualMachines",
            "prod-rg",
            ResourceCategory::VirtualMachine,
        )
        .unwrap()
        .with_power_state(Some("VM deallocated".to_string()));
        self.resources
            .entry(ResourceCategory::VirtualMachine)
            .or_default()
            .push(vm);
        self
    }

    pub fn with_web_app(mut self, name: &str) -> Self {
        let app = Resource::new(
            &format!(
                "/subscriptions/0000-1111/resourceGroups/prod-rg/providers/Microsoft.Web/sites/{}",
                name
            ),
            name,
            "Microsoft.Web/sites",
            "prod-rg",
            ResourceCategory::WebApp,
        )
        .unwrap();
        self.resources
            .entry(ResourceCategory::WebApp)
            .or_default()
            .push(app);
        self
    }

    pub fn with_alert_rule(mut self, name: &str, scopes: Vec<String>) -> Self {
        self.alert_rules
            .push(AlertRule::new(format!("rule-{}", name), name, scopes, vec![]));
        self
    }

    pub fn with_recommendation(mut self, category: &str, problem: &str, impact: Impact) -> Self {
        self.recommendations.push(Recommendation {
            problem: problem.to_string(),
            impact,
            impacted_field: "Microsoft.Compute/virtualMachines".to_string(),
            impacted_value: "vm-web".to_string(),
            resource_group: "prod-rg".to_string(),
            category: category.to_string(),
        });
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }
}

/// Full resource id of a VM in the test subscription
pub fn vm_id(name: &str) -> String {
    format!(
        "/subscriptions/0000-1111/resourceGroups/prod-rg/providers/Microsoft.Compute/virtualMachines/{}",
        name
    )
}

impl ResourceInventory for MockInventory {
    fn set_subscription(&self, subscription_id: &str) -> Result<()> {
        if self.should_fail {
            anyhow::bail!("ERROR: Please run 'az login' to setup account.");
        }
        *self.selected_subscription.lock().unwrap() = Some(subscription_id.to_string());
        Ok(())
    }

    fn fetch_resources(&self, category: ResourceCategory) -> Result<Vec<Resource>> {
        Ok(self.resources.get(&category).cloned().unwrap_or_default())
    }

    fn fetch_alert_rules(&self) -> Result<Vec<AlertRule>> {
        Ok(self.alert_rules.clone())
    }

    fn fetch_recommendations(&self) -> Result<Vec<Recommendation>> {
        Ok(self.recommendations.clone())
    }
}
