use crate::application::read_models::AuditReadModel;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

/// Version of the JSON document layout, bumped on breaking field changes
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    schema_version: u32,
    #[serde(flatten)]
    model: &'a AuditReadModel,
}

/// JsonFormatter adapter emitting the read model as pretty-printed JSON
///
/// Field names follow the read model; sections skipped on the command line
/// serialize as `null`.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, model: &AuditReadModel) -> Result<String> {
        let report = JsonReport {
            schema_version: REPORT_SCHEMA_VERSION,
            model,
        };
        serde_json::to_string_pretty(&report).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{empty_read_model, full_read_model};
    use super::*;
    use serde_json::Value;

    fn render(model: &AuditReadModel) -> Value {
        let output = JsonFormatter::new().format(model).unwrap();
        serde_json::from_str(&output).unwrap()
    }

    #[test]
    fn test_format_metadata() {
        let json = render(&full_read_model());

        assert_eq!(json["schemaVersion"], 1);
        assert_eq!(json["metadata"]["client_name"], "Contoso");
        assert_eq!(json["metadata"]["subscription_id"], "0000-1111");
        assert_eq!(json["metadata"]["report_id"], "urn:uuid:test-123");
    }

    #[test]
    fn test_format_backup_statuses() {
        let json = render(&full_read_model());
        let backups = json["backups"].as_array().unwrap();

        assert_eq!(backups.len(), 3);
        assert_eq!(backups[0]["status"], "protected");
        assert_eq!(backups[0]["vault_name"], "vault-a");
        assert_eq!(backups[1]["status"], "not_backed_up");
        assert_eq!(backups[2]["status"], "unknown");
        assert_eq!(backups[2]["detail"], "timeout: no answer within 300s");
    }

    #[test]
    fn test_format_patches_and_summary() {
        let json = render(&full_read_model());

        let patches = json["patches"].as_array().unwrap();
        assert_eq!(patches[0]["patches"][0]["kb_id"], "5034768");
        assert!(patches[0]["patches"][0]["version"].is_null());
        assert_eq!(patches[1]["lookup_error"], "decode failed: bad json");

        assert_eq!(json["enrichment"][0]["timed_out"], 1);
        assert_eq!(json["enrichment"][0]["elapsed_ms"], 1200);
    }

    #[test]
    fn test_skipped_passes_serialize_as_null() {
        let json = render(&empty_read_model());

        assert!(json["backups"].is_null());
        assert!(json["patches"].is_null());
        assert_eq!(json["deallocated_vms"].as_array().unwrap().len(), 0);
    }
}
