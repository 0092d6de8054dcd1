use crate::audit::domain::{AlertRule, ResourceId, ResourceRegistry};

/// AlertRuleAssigner service joining metric alert rules onto resources
///
/// This service contains pure business logic. It has no I/O dependencies and
/// works only with domain objects.
pub struct AlertRuleAssigner;

impl AlertRuleAssigner {
    /// Attaches each rule to every registry resource listed in its scopes
    ///
    /// Scopes are normalized the same way registry keys are, so casing
    /// differences between the alert API and the inventory do not matter.
    /// Scopes that are not in the registry (resource groups, resources of
    /// unaudited types) are ignored, as are scopes that are not valid ids.
    ///
    /// # Returns
    /// The number of (rule, resource) attachments made
    pub fn assign(rules: &[AlertRule], registry: &mut ResourceRegistry) -> usize {
        let mut attached = 0;

        for rule in rules {
            for scope in rule.scopes() {
                let Ok(scope_id) = ResourceId::new(scope) else {
                    continue;
                };

                if let Some(resource) = registry.get_mut(&scope_id) {
                    resource.add_alert_rule(rule.clone());
                    attached += 1;
                }
            }
        }

        attached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::domain::{Resource, ResourceCategory};

    fn registry() -> ResourceRegistry {
        ResourceRegistry::from_resources(vec![
            Resource::new(
                "/subscriptions/x/resourceGroups/rg/providers/Microsoft.Compute/virtualMachines/vm1",
                "vm1",
                "Microsoft.Compute/virtualMachines",
                "rg",
                ResourceCategory::VirtualMachine,
            )
            .unwrap(),
            Resource::new(
                "/subscriptions/x/resourceGroups/rg/providers/Microsoft.Web/sites/app1",
                "app1",
                "Microsoft.Web/sites",
                "rg",
                ResourceCategory::WebApp,
            )
            .unwrap(),
        ])
    }

    fn id(raw: &str) -> ResourceId {
        ResourceId::new(raw).unwrap()
    }

    #[test]
    fn test_assign_matches_scope_case_insensitively() {
        let mut registry = registry();
        let rules = vec![AlertRule::new(
            "rule-1",
            "cpu-high",
            vec!["/subscriptions/X/resourceGroups/RG/providers/Microsoft.Compute/virtualMachines/VM1".to_string()],
            vec![],
        )];

        let attached = AlertRuleAssigner::assign(&rules, &mut registry);

        assert_eq!(attached, 1);
        let vm = registry
            .get(&id("/subscriptions/x/resourceGroups/rg/providers/Microsoft.Compute/virtualMachines/vm1"))
            .unwrap();
        assert_eq!(vm.alert_rules().len(), 1);
        assert_eq!(vm.alert_rules()[0].name(), "cpu-high");
    }

    #[test]
    fn test_assign_multi_scope_rule_to_each_resource() {
        let mut registry = registry();
        let rules = vec![AlertRule::new(
            "rule-1",
            "availability",
            vec![
                "/subscriptions/x/resourceGroups/rg/providers/Microsoft.Compute/virtualMachines/vm1".to_string(),
                "/subscriptions/x/resourceGroups/rg/providers/Microsoft.Web/sites/app1".to_string(),
            ],
            vec![],
        )];

        assert_eq!(AlertRuleAssigner::assign(&rules, &mut registry), 2);
        assert!(registry.iter().all(|r| r.alert_rules().len() == 1));
    }

    #[test]
    fn test_assign_ignores_unknown_and_empty_scopes() {
        let mut registry = registry();
        let rules = vec![AlertRule::new(
            "rule-1",
            "rg-wide",
            vec![
                "/subscriptions/x/resourceGroups/rg".to_string(),
                "".to_string(),
            ],
            vec![],
        )];

        assert_eq!(AlertRuleAssigner::assign(&rules, &mut registry), 0);
        assert!(registry.iter().all(|r| r.alert_rules().is_empty()));
    }

    #[test]
    fn test_assign_accumulates_rules() {
        let mut registry = registry();
        let scope =
            "/subscriptions/x/resourceGroups/rg/providers/Microsoft.Web/sites/app1".to_string();
        let rules = vec![
            AlertRule::new("r1", "http-5xx", vec![scope.clone()], vec![]),
            AlertRule::new("r2", "response-time", vec![scope.clone()], vec![]),
        ];

        AlertRuleAssigner::assign(&rules, &mut registry);

        let app = registry.get(&id(&scope)).unwrap();
        let names: Vec<&str> = app.alert_rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["http-5xx", "response-time"]);
    }
}
