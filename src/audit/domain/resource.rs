use super::alert_rule::AlertRule;
use super::lookup_outcome::{LookupError, LookupKind};
use super::patch_assessment::PatchAssessmentResult;
use crate::shared::Result;
use std::collections::BTreeMap;

/// Maximum length for resource identifiers (security limit)
const MAX_RESOURCE_ID_LENGTH: usize = 1024;

/// NewType wrapper for a normalized (lower-case) Azure resource identifier
///
/// Azure treats resource IDs case-insensitively, and alert rule scopes come
/// back with different casing than `az vm list`, so the registry key is
/// always the lower-cased form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            anyhow::bail!("Resource id cannot be empty");
        }

        if trimmed.len() > MAX_RESOURCE_ID_LENGTH {
            anyhow::bail!(
                "Resource id is too long ({} bytes). Maximum allowed: {} bytes",
                trimmed.len(),
                MAX_RESOURCE_ID_LENGTH
            );
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kinds of resource the audit inventories, plus the vaults VMs are backed up to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceCategory {
    VirtualMachine,
    AksCluster,
    MySqlServer,
    FlexibleMySqlServer,
    SqlServer,
    StorageAccount,
    WebApp,
    RecoveryServicesVault,
}

impl ResourceCategory {
    /// Categories fetched from the subscription inventory, in report order
    pub const AUDITED: [ResourceCategory; 7] = [
        ResourceCategory::VirtualMachine,
        ResourceCategory::AksCluster,
        ResourceCategory::MySqlServer,
        ResourceCategory::FlexibleMySqlServer,
        ResourceCategory::SqlServer,
        ResourceCategory::StorageAccount,
        ResourceCategory::WebApp,
    ];

    /// Azure CLI command listing every resource of this category
    ///
    /// `az vm list -d` includes the power state so deallocated machines can be
    /// reported. Vaults are never listed, only resolved by id.
    pub fn inventory_command(&self) -> Option<&'static str> {
        match self {
            ResourceCategory::VirtualMachine => Some("az vm list -d"),
            ResourceCategory::AksCluster => Some("az aks list"),
            ResourceCategory::MySqlServer => Some("az mysql server list"),
            ResourceCategory::FlexibleMySqlServer => Some("az mysql flexible-server list"),
            ResourceCategory::SqlServer => Some("az sql server list"),
            ResourceCategory::StorageAccount => Some("az storage account list"),
            ResourceCategory::WebApp => Some("az webapp list"),
            ResourceCategory::RecoveryServicesVault => None,
        }
    }

    /// Plural, human-readable name used in progress messages
    pub fn plural_name(&self) -> &'static str {
        match self {
            ResourceCategory::VirtualMachine => "virtual machines",
            ResourceCategory::AksCluster => "AKS clusters",
            ResourceCategory::MySqlServer => "MySQL servers",
            ResourceCategory::FlexibleMySqlServer => "flexible MySQL servers",
            ResourceCategory::SqlServer => "SQL servers",
            ResourceCategory::StorageAccount => "storage accounts",
            ResourceCategory::WebApp => "web apps",
            ResourceCategory::RecoveryServicesVault => "recovery services vaults",
        }
    }

    /// Section title used by the report renderers
    pub fn title(&self) -> &'static str {
        match self {
            ResourceCategory::VirtualMachine => "Virtual Machines",
            ResourceCategory::AksCluster => "Azure Kubernetes Services",
            ResourceCategory::MySqlServer => "MySQL Servers",
            ResourceCategory::FlexibleMySqlServer => "Flexible MySQL Servers",
            ResourceCategory::SqlServer => "SQL Servers",
            ResourceCategory::StorageAccount => "Storage Accounts",
            ResourceCategory::WebApp => "Web Apps",
            ResourceCategory::RecoveryServicesVault => "Recovery Services Vaults",
        }
    }
}

/// Resource entity: one audited Azure resource and its enrichment slots
///
/// Identity (`id`) is fixed at construction. The `backup_vault` and
/// `patch_assessment` slots are filled by enrichment passes; failed or
/// negative lookups are kept in `lookup_errors` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    id: ResourceId,
    name: String,
    resource_type: String,
    resource_group: String,
    category: ResourceCategory,
    power_state: Option<String>,
    alert_rules: Vec<AlertRule>,
    backup_vault: Option<Box<Resource>>,
    patch_assessment: Option<PatchAssessmentResult>,
    lookup_errors: BTreeMap<LookupKind, LookupError>,
}

impl Resource {
    pub fn new(
        id: &str,
        name: impl Into<String>,
        resource_type: impl Into<String>,
        resource_group: impl Into<String>,
        category: ResourceCategory,
    ) -> Result<Self> {
        Ok(Self {
            id: ResourceId::new(id)?,
            name: name.into(),
            resource_type: resource_type.into(),
            resource_group: resource_group.into(),
            category,
            power_state: None,
            alert_rules: Vec::new(),
            backup_vault: None,
            patch_assessment: None,
            lookup_errors: BTreeMap::new(),
        })
    }

    pub fn with_power_state(mut self, power_state: Option<String>) -> Self {
        self.power_state = power_state;
        self
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn resource_group(&self) -> &str {
        &self.resource_group
    }

    pub fn category(&self) -> ResourceCategory {
        self.category
    }

    pub fn power_state(&self) -> Option<&str> {
        self.power_state.as_deref()
    }

    /// True when `az vm list -d` reported the machine as deallocated
    pub fn is_deallocated(&self) -> bool {
        self.power_state
            .as_deref()
            .map(|state| state.to_lowercase().contains("deallocated"))
            .unwrap_or(false)
    }

    pub fn alert_rules(&self) -> &[AlertRule] {
        &self.alert_rules
    }

    pub fn backup_vault(&self) -> Option<&Resource> {
        self.backup_vault.as_deref()
    }

    pub fn patch_assessment(&self) -> Option<&PatchAssessmentResult> {
        self.patch_assessment.as_ref()
    }

    pub fn lookup_error(&self, kind: LookupKind) -> Option<&LookupError> {
        self.lookup_errors.get(&kind)
    }

    pub(crate) fn add_alert_rule(&mut self, rule: AlertRule) {
        self.alert_rules.push(rule);
    }

    /// Fills the backup vault slot
    pub fn set_backup_vault(&mut self, vault: Resource) {
        self.lookup_errors.remove(&LookupKind::BackupVault);
        self.backup_vault = Some(Box::new(vault));
    }

    /// Fills the patch assessment slot
    pub fn set_patch_assessment(&mut self, assessment: PatchAssessmentResult) {
        self.lookup_errors.remove(&LookupKind::PatchAssessment);
        self.patch_assessment = Some(assessment);
    }

    /// Records a failed or negative lookup; the matching slot is left empty
    pub(crate) fn record_lookup_error(&mut self, kind: LookupKind, error: LookupError) {
        self.lookup_errors.insert(kind, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::domain::LookupErrorKind;

    fn vm(id: &str) -> Resource {
        Resource::new(
            id,
            "vm-web-01",
            "Microsoft.Compute/virtualMachines",
            "rg-prod",
            ResourceCategory::VirtualMachine,
        )
        .unwrap()
    }

    #[test]
    fn test_resource_id_is_lowercased() {
        let id = ResourceId::new("/subscriptions/ABC/resourceGroups/RG/vm1").unwrap();
        assert_eq!(id.as_str(), "/subscriptions/abc/resourcegroups/rg/vm1");
    }

    #[test]
    fn test_resource_id_trims_whitespace() {
        let id = ResourceId::new("  /subscriptions/abc/vm1\n").unwrap();
        assert_eq!(id.as_str(), "/subscriptions/abc/vm1");
    }

    #[test]
    fn test_resource_id_empty() {
        assert!(ResourceId::new("").is_err());
        assert!(ResourceId::new("   ").is_err());
    }

    #[test]
    fn test_resource_id_equality_ignores_case() {
        let a = ResourceId::new("/Subscriptions/X/VM1").unwrap();
        let b = ResourceId::new("/subscriptions/x/vm1").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_resource_new_keeps_display_name_casing() {
        let resource = vm("/subscriptions/X/VM1");
        assert_eq!(resource.id().as_str(), "/subscriptions/x/vm1");
        assert_eq!(resource.name(), "vm-web-01");
        assert_eq!(resource.resource_group(), "rg-prod");
        assert!(resource.backup_vault().is_none());
        assert!(resource.patch_assessment().is_none());
        assert!(resource.alert_rules().is_empty());
    }

    #[test]
    fn test_is_deallocated() {
        let running = vm("/s/vm1").with_power_state(Some("VM running".to_string()));
        let stopped = vm("/s/vm2").with_power_state(Some("VM deallocated".to_string()));
        let unknown = vm("/s/vm3");

        assert!(!running.is_deallocated());
        assert!(stopped.is_deallocated());
        assert!(!unknown.is_deallocated());
    }

    #[test]
    fn test_set_backup_vault_clears_previous_error() {
        let mut resource = vm("/s/vm1");
        resource.record_lookup_error(
            LookupKind::BackupVault,
            LookupError::new(LookupErrorKind::Timeout, "slow"),
        );
        let vault = Resource::new(
            "/s/vaults/vault-a",
            "vault-a",
            "Microsoft.RecoveryServices/vaults",
            "rg-backup",
            ResourceCategory::RecoveryServicesVault,
        )
        .unwrap();

        resource.set_backup_vault(vault);

        assert_eq!(resource.backup_vault().unwrap().name(), "vault-a");
        assert!(resource.lookup_error(LookupKind::BackupVault).is_none());
    }

    #[test]
    fn test_inventory_commands() {
        assert_eq!(
            ResourceCategory::VirtualMachine.inventory_command(),
            Some("az vm list -d")
        );
        assert!(ResourceCategory::RecoveryServicesVault
            .inventory_command()
            .is_none());
        assert!(ResourceCategory::AUDITED
            .iter()
            .all(|c| c.inventory_command().is_some()));
    }
}
