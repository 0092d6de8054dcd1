use super::wire::AzPatchAssessment;
use crate::audit::domain::{
    LookupErrorKind, LookupKind, LookupOutcome, PatchAssessmentResult, Resource,
};
use crate::ports::outbound::{CommandRunner, ResourceLookup};
use crate::shared::security::quote_command_argument;
use crate::shared::Result;

/// PatchAssessmentLookup adapter running an on-demand patch assessment on a VM
///
/// `az vm assess-patches` blocks until the guest agent finishes, which can
/// take minutes; the enrichment coordinator's timeout bounds it.
///
/// A response that cannot be decoded is `DecodeFailed` and nothing partial is
/// kept. A failed command or a VM name or group that cannot be passed to the
/// shell (empty, oversized, control characters) is `LookupFailed`.
pub struct PatchAssessmentLookup<R: CommandRunner + 'static> {
    runner: R,
}

impl<R: CommandRunner + 'static> PatchAssessmentLookup<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    fn command_for(vm: &Resource) -> Result<String> {
        let name = quote_command_argument(vm.name(), "VM name")?;
        let resource_group = quote_command_argument(vm.resource_group(), "resource group")?;
        Ok(format!(
            "az vm assess-patches -n {} -g {} -o json",
            name, resource_group
        ))
    }
}

impl<R: CommandRunner + 'static> ResourceLookup for PatchAssessmentLookup<R> {
    type Value = PatchAssessmentResult;

    fn kind(&self) -> LookupKind {
        LookupKind::PatchAssessment
    }

    fn lookup(&self, vm: &Resource) -> LookupOutcome<PatchAssessmentResult> {
        let resource_id = vm.id().clone();

        let command = match Self::command_for(vm) {
            Ok(command) => command,
            Err(e) => {
                return LookupOutcome::failure(
                    resource_id,
                    LookupErrorKind::LookupFailed,
                    format!("{:#}", e),
                )
            }
        };

        let output = match self.runner.run(&command) {
            Ok(output) => output,
            Err(e) => {
                return LookupOutcome::failure(
                    resource_id,
                    LookupErrorKind::LookupFailed,
                    e.to_string(),
                )
            }
        };

        match serde_json::from_slice::<AzPatchAssessment>(&output) {
            Ok(raw) => LookupOutcome::success(resource_id, raw.into()),
            Err(e) => LookupOutcome::failure(
                resource_id,
                LookupErrorKind::DecodeFailed,
                format!("unexpected `az vm assess-patches` output: {}", e),
            ),
        }
    }

    fn attach(&self, vm: &mut Resource, assessment: PatchAssessmentResult) {
        vm.set_patch_assessment(assessment);
    }
}
