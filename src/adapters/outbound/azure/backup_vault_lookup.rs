use super::wire::AzResource;
use crate::adapters::outbound::process::CachingCommandRunner;
use crate::audit::domain::{
    LookupErrorKind, LookupKind, LookupOutcome, Resource, ResourceCategory,
};
use crate::ports::outbound::{CommandRunner, ResourceLookup};
use crate::shared::security::quote_command_argument;
use crate::shared::Result;
use anyhow::Context;
use std::sync::Arc;

/// BackupVaultLookup adapter finding the Recovery Services vault protecting a VM
///
/// Two CLI calls per VM: `az backup protection check-vm` yields the vault id
/// (empty when the VM is not protected), then `az resource show` resolves the
/// vault's details. The second call goes through a cache because many VMs
/// share one vault.
///
/// Outcomes:
/// - vault found: success with the vault as a `RecoveryServicesVault` resource
/// - no vault: `NotBackedUp`
/// - any failed call, unusable argument or unreadable response: `LookupFailed`
pub struct BackupVaultLookup<R: CommandRunner + 'static> {
    runner: Arc<R>,
    vault_details: CachingCommandRunner<Arc<R>>,
}

impl<R: CommandRunner + 'static> BackupVaultLookup<R> {
    pub fn new(runner: Arc<R>) -> Self {
        Self {
            vault_details: CachingCommandRunner::new(Arc::clone(&runner)),
            runner,
        }
    }

    fn find_vault(&self, vm: &Resource) -> Result<Option<Resource>> {
        let vm_id = quote_command_argument(vm.id().as_str(), "VM ID")?;

        let output = self
            .runner
            .run(&format!("az backup protection check-vm --vm {} -o tsv", vm_id))?;
        let vault_id = String::from_utf8_lossy(&output)
            .trim()
            .trim_matches('"')
            .to_string();

        if vault_id.is_empty() {
            return Ok(None);
        }

        let vault_id = quote_command_argument(&vault_id, "vault ID")
            .context("unexpected `az backup protection check-vm` output")?;

        let details = self
            .vault_details
            .run(&format!("az resource show --ids {} -o json", vault_id))?;
        let raw: AzResource = serde_json::from_slice(&details)
            .context("unexpected `az resource show` output")?;

        Ok(Some(raw.into_resource(ResourceCategory::RecoveryServicesVault)?))
    }
}

impl<R: CommandRunner + 'static> ResourceLookup for BackupVaultLookup<R> {
    type Value = Resource;

    fn kind(&self) -> LookupKind {
        LookupKind::BackupVault
    }

    fn lookup(&self, vm: &Resource) -> LookupOutcome<Resource> {
        let resource_id = vm.id().clone();

        match self.find_vault(vm) {
            Ok(Some(vault)) => LookupOutcome::success(resource_id, vault),
            Ok(None) => LookupOutcome::failure(
                resource_id,
                LookupErrorKind::NotBackedUp,
                format!("no backup vault protects {}", vm.name()),
            ),
            Err(e) => LookupOutcome::failure(
                resource_id,
                LookupErrorKind::LookupFailed,
                format!("{:#}", e),
            ),
        }
    }

    fn attach(&self, vm: &mut Resource, vault: Resource) {
        vm.set_backup_vault(vault);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::azure::test_runner::TableRunner;

    const VM_ID: &str = "/subscriptions/s/resourcegroups/rg/providers/microsoft.compute/virtualmachines/vm1";
    const VAULT_ID: &str =
        "/subscriptions/s/resourceGroups/rg/providers/Microsoft.RecoveryServices/vaults/vault-a";

    fn vm(id: &str, name: &str) -> Resource {
        Resource::new(
            id,
            name,
            "Microsoft.Compute/virtualMachines",
            "rg",
            ResourceCategory::VirtualMachine,
        )
        .unwrap()
    }

    fn check_vm(id: &str) -> String {
        format!("az backup protection check-vm --vm {} -o tsv", id)
    }

    fn show_vault() -> String {
        format!("az resource show --ids {} -o json", VAULT_ID)
    }

    const VAULT_JSON: &str = r#"{
        "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.RecoveryServices/vaults/vault-a",
        "name": "vault-a",
        "type": "Microsoft.RecoveryServices/vaults",
        "resourceGroup": "rg"
    }"#;

    #[test]
    fn test_vault_found() {
        let check = check_vm(VM_ID);
        let show = show_vault();
        let runner = Arc::new(TableRunner::new(vec![
            (check.as_str(), Ok("\"/subscriptions/s/resourceGroups/rg/providers/Microsoft.RecoveryServices/vaults/vault-a\"\n")),
            (show.as_str(), Ok(VAULT_JSON)),
        ]));
        let lookup = BackupVaultLookup::new(runner);

        let outcome = lookup.lookup(&vm(VM_ID, "vm1"));

        let vault = outcome.value().unwrap();
        assert_eq!(vault.name(), "vault-a");
        assert_eq!(vault.category(), ResourceCategory::RecoveryServicesVault);
    }

    #[test]
    fn test_empty_reference_is_not_backed_up_on_every_call() {
        let check = check_vm(VM_ID);
        let runner = Arc::new(TableRunner::new(vec![(check.as_str(), Ok("\n"))]));
        let lookup = BackupVaultLookup::new(Arc::clone(&runner));

        for _ in 0..3 {
            let outcome = lookup.lookup(&vm(VM_ID, "vm1"));
            assert_eq!(outcome.error_kind(), Some(LookupErrorKind::NotBackedUp));
            assert!(outcome.value().is_none());
        }
        assert_eq!(runner.call_count(&check), 3);
        assert_eq!(runner.total_calls(), 3);
    }

    #[test]
    fn test_shared_vault_is_resolved_once() {
        let vm2_id = VM_ID.replace("vm1", "vm2");
        let check1 = check_vm(VM_ID);
        let check2 = check_vm(&vm2_id);
        let show = show_vault();
        let runner = Arc::new(TableRunner::new(vec![
            (check1.as_str(), Ok(VAULT_ID)),
            (check2.as_str(), Ok(VAULT_ID)),
            (show.as_str(), Ok(VAULT_JSON)),
        ]));
        let lookup = BackupVaultLookup::new(Arc::clone(&runner));

        assert!(lookup.lookup(&vm(VM_ID, "vm1")).is_success());
        assert!(lookup.lookup(&vm(&vm2_id, "vm2")).is_success());
        assert_eq!(runner.call_count(&show), 1);
    }

    #[test]
    fn test_check_vm_failure_is_lookup_failed() {
        let check = check_vm(VM_ID);
        let runner = Arc::new(TableRunner::new(vec![(
            check.as_str(),
            Err("(AuthorizationFailed) The client does not have authorization"),
        )]));

        let outcome = BackupVaultLookup::new(runner).lookup(&vm(VM_ID, "vm1"));

        assert_eq!(outcome.error_kind(), Some(LookupErrorKind::LookupFailed));
        assert!(outcome.error().unwrap().message.contains("AuthorizationFailed"));
    }

    #[test]
    fn test_malformed_vault_details_is_lookup_failed() {
        let check = check_vm(VM_ID);
        let show = show_vault();
        let runner = Arc::new(TableRunner::new(vec![
            (check.as_str(), Ok(VAULT_ID)),
            (show.as_str(), Ok("<html>gateway timeout</html>")),
        ]));

        let outcome = BackupVaultLookup::new(runner).lookup(&vm(VM_ID, "vm1"));

        assert_eq!(outcome.error_kind(), Some(LookupErrorKind::LookupFailed));
        assert!(outcome.value().is_none());
    }

    #[test]
    fn test_garbage_vault_reference_runs_no_second_command() {
        let check = check_vm(VM_ID);
        let runner = Arc::new(TableRunner::new(vec![(
            check.as_str(),
            Ok("vault-a\t$(reboot)"),
        )]));
        let lookup = BackupVaultLookup::new(Arc::clone(&runner));

        let outcome = lookup.lookup(&vm(VM_ID, "vm1"));

        assert_eq!(outcome.error_kind(), Some(LookupErrorKind::LookupFailed));
        assert_eq!(runner.total_calls(), 1);
    }

    #[test]
    fn test_vm_in_resource_group_with_parentheses_is_checked() {
        let vm_id = VM_ID.replace("/resourcegroups/rg/", "/resourcegroups/rg(legacy)/");
        let check = check_vm(&quote_command_argument(&vm_id, "VM ID").unwrap());
        let show = show_vault();
        let runner = Arc::new(TableRunner::new(vec![
            (check.as_str(), Ok(VAULT_ID)),
            (show.as_str(), Ok(VAULT_JSON)),
        ]));
        let lookup = BackupVaultLookup::new(Arc::clone(&runner));

        let outcome = lookup.lookup(&vm(&vm_id, "vm1"));

        assert_eq!(outcome.value().unwrap().name(), "vault-a");
        assert_eq!(runner.call_count(&check), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_metacharacters_in_vm_id_are_quoted() {
        let runner = Arc::new(TableRunner::new(vec![]));
        let lookup = BackupVaultLookup::new(Arc::clone(&runner));

        lookup.lookup(&vm("/s/rg/vms/vm1;reboot", "vm1"));

        assert_eq!(
            runner.calls.lock().unwrap().as_slice(),
            ["az backup protection check-vm --vm '/s/rg/vms/vm1;reboot' -o tsv"]
        );
    }

    #[test]
    fn test_attach_fills_backup_slot() {
        let runner = Arc::new(TableRunner::new(vec![]));
        let lookup = BackupVaultLookup::new(runner);
        let mut machine = vm(VM_ID, "vm1");
        let vault = Resource::new(
            VAULT_ID,
            "vault-a",
            "Microsoft.RecoveryServices/vaults",
            "rg",
            ResourceCategory::RecoveryServicesVault,
        )
        .unwrap();

        lookup.attach(&mut machine, vault);

        assert_eq!(machine.backup_vault().unwrap().name(), "vault-a");
    }
}
