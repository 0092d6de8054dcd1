use super::wire::{AzAlertRule, AzRecommendation, AzResource};
use crate::audit::domain::{AlertRule, Recommendation, Resource, ResourceCategory};
use crate::ports::outbound::{CommandRunner, ResourceInventory};
use crate::shared::error::AuditError;
use crate::shared::security::quote_command_argument;
use crate::shared::Result;
use serde::de::DeserializeOwned;

/// AzCliInventory adapter reading the subscription through the Azure CLI
///
/// Every call is one `az ... -o json` invocation. Any failure (process error
/// or unparseable output) is reported as [`AuditError::InventoryFetch`].
pub struct AzCliInventory<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> AzCliInventory<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    fn fetch_json<T: DeserializeOwned>(&self, command: &str, what: &str) -> Result<T> {
        let output = self
            .runner
            .run(&format!("{} -o json", command))
            .map_err(|e| AuditError::InventoryFetch {
                what: what.to_string(),
                details: e.to_string(),
            })?;

        serde_json::from_slice(&output).map_err(|e| {
            AuditError::InventoryFetch {
                what: what.to_string(),
                details: format!("unexpected `{}` output: {}", command, e),
            }
            .into()
        })
    }
}

impl<R: CommandRunner> ResourceInventory for AzCliInventory<R> {
    fn set_subscription(&self, subscription_id: &str) -> Result<()> {
        let invalid = |reason: String| AuditError::InvalidSubscription {
            subscription: subscription_id.to_string(),
            reason,
        };

        let subscription = quote_command_argument(subscription_id, "subscription ID")
            .map_err(|e| invalid(e.to_string()))?;

        self.runner
            .run(&format!("az account set --subscription {}", subscription))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(())
    }

    fn fetch_resources(&self, category: ResourceCategory) -> Result<Vec<Resource>> {
        let Some(command) = category.inventory_command() else {
            return Ok(Vec::new());
        };

        let raw: Vec<AzResource> = self.fetch_json(command, category.plural_name())?;
        raw.into_iter()
            .map(|r| r.into_resource(category))
            .collect()
    }

    fn fetch_alert_rules(&self) -> Result<Vec<AlertRule>> {
        let raw: Vec<AzAlertRule> =
            self.fetch_json("az monitor metrics alert list", "alert rules")?;
        Ok(raw.into_iter().map(AlertRule::from).collect())
    }

    fn fetch_recommendations(&self) -> Result<Vec<Recommendation>> {
        let raw: Vec<AzRecommendation> =
            self.fetch_json("az advisor recommendation list", "advisor recommendations")?;
        Ok(raw.into_iter().map(Recommendation::from).collect())
    }
}
