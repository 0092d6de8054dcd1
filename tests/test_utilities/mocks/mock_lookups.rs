use azure_checker::audit::domain::PatchAssessmentResult;
use azure_checker::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// What a mock lookup does for one VM, keyed by VM name
#[derive(Debug, Clone)]
pub enum LookupScript {
    /// Backup: protected by this vault. Patches: this many critical patches.
    Found(String),
    NotBackedUp,
    Fail(String),
    Undecodable,
    /// Sleeps before answering like `Found`
    Slow(Duration, String),
}

fn run_script<T>(
    scripts: &HashMap<String, LookupScript>,
    calls: &AtomicUsize,
    resource: &Resource,
    found: impl Fn(&str) -> T,
) -> LookupOutcome<T> {
    calls.fetch_add(1, Ordering::SeqCst);
    let id = resource.id().clone();

    match scripts.get(resource.name()) {
        Some(LookupScript::Found(value)) => LookupOutcome::success(id, found(value)),
        Some(LookupScript::Slow(delay, value)) => {
            std::thread::sleep(*delay);
            LookupOutcome::success(id, found(value))
        }
        Some(LookupScript::NotBackedUp) | None => {
            LookupOutcome::failure(id, LookupErrorKind::NotBackedUp, "no vault reference")
        }
        Some(LookupScript::Fail(message)) => {
            LookupOutcome::failure(id, LookupErrorKind::LookupFailed, message.clone())
        }
        Some(LookupScript::Undecodable) => {
            LookupOutcome::failure(id, LookupErrorKind::DecodeFailed, "expected value at line 1")
        }
    }
}

/// Mock backup vault lookup
#[derive(Default)]
pub struct MockBackupLookup {
    pub scripts: HashMap<String, LookupScript>,
    pub calls: Arc<AtomicUsize>,
}

impl MockBackupLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, vm: &str, script: LookupScript) -> Self {
        self.scripts.insert(vm.to_string(), script);
        self
    }
}

impl ResourceLookup for MockBackupLookup {
    type Value = Resource;

    fn kind(&self) -> LookupKind {
        LookupKind::BackupVault
    }

    fn lookup(&self, resource: &Resource) -> LookupOutcome<Resource> {
        run_script(&self.scripts, &self.calls, resource, |vault| {
            Resource::new(
                &format!(
                    "/subscriptions/0000-1111/resourceGroups/backup-rg/providers/Microsoft.RecoveryServices/vaults/{}",
                    vault
                ),
                vault,
                "Microsoft.RecoveryServices/vaults",
                "backup-rg",
                ResourceCategory::RecoveryServicesVault,
            )
            .unwrap()
        })
    }

    fn attach(&self, resource: &mut Resource, value: Resource) {
        resource.set_backup_vault(value);
    }
}

/// Mock patch assessment lookup; `Found("3")` means three critical patches
#[derive(Default)]
pub struct MockPatchLookup {
    pub scripts: HashMap<String, LookupScript>,
    pub calls: Arc<AtomicUsize>,
}

impl MockPatchLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, vm: &str, script: LookupScript) -> Self {
        self.scripts.insert(vm.to_string(), script);
        self
    }
}

impl ResourceLookup for MockPatchLookup {
    type Value = PatchAssessmentResult;

    fn kind(&self) -> LookupKind {
        LookupKind::PatchAssessment
    }

    fn lookup(&self, resource: &Resource) -> LookupOutcome<PatchAssessmentResult> {
        run_script(&self.scripts, &self.calls, resource, |count| {
            PatchAssessmentResult {
                status: "Succeeded".to_string(),
                critical_and_security_patch_count: count.parse().unwrap_or(0),
                ..Default::default()
            }
        })
    }

    fn attach(&self, resource: &mut Resource, value: PatchAssessmentResult) {
        resource.set_patch_assessment(value);
    }
}
