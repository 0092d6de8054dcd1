/// Azure CLI adapters: inventory and per-resource lookups
mod az_cli_inventory;
mod backup_vault_lookup;
mod patch_assessment_lookup;
#[cfg(test)]
mod test_runner;
mod wire;

pub use az_cli_inventory::AzCliInventory;
pub use backup_vault_lookup::BackupVaultLookup;
pub use patch_assessment_lookup::PatchAssessmentLookup;
