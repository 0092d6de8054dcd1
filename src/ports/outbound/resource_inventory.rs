use crate::audit::domain::{AlertRule, Recommendation, Resource, ResourceCategory};
use crate::shared::Result;

/// ResourceInventory port for reading the subscription's contents
///
/// This port abstracts the inventory source (the Azure CLI in production).
/// Every method is a single synchronous request; any failure here is fatal to
/// the audit, unlike per-resource lookup failures.
pub trait ResourceInventory {
    /// Selects the subscription all following calls operate on
    fn set_subscription(&self, subscription_id: &str) -> Result<()>;

    /// Lists every resource of one category
    fn fetch_resources(&self, category: ResourceCategory) -> Result<Vec<Resource>>;

    /// Lists the subscription's metric alert rules
    fn fetch_alert_rules(&self) -> Result<Vec<AlertRule>>;

    /// Lists Azure Advisor recommendations
    fn fetch_recommendations(&self) -> Result<Vec<Recommendation>>;
}
