use chrono::{DateTime, Utc};

/// AuditMetadata value object describing one report run
#[derive(Debug, Clone)]
pub struct AuditMetadata {
    subscription_id: String,
    client_name: String,
    generated_at: DateTime<Utc>,
    tool_name: String,
    tool_version: String,
    report_id: String,
}

impl AuditMetadata {
    pub fn new(
        subscription_id: String,
        client_name: String,
        generated_at: DateTime<Utc>,
        tool_name: String,
        tool_version: String,
        report_id: String,
    ) -> Self {
        Self {
            subscription_id,
            client_name,
            generated_at,
            tool_name,
            tool_version,
            report_id,
        }
    }

    /// Metadata for a report generated now by this binary
    pub fn generate(subscription_id: &str, client_name: &str) -> Self {
        Self::new(
            subscription_id.to_string(),
            client_name.to_string(),
            Utc::now(),
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
            format!("urn:uuid:{}", uuid::Uuid::new_v4()),
        )
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn report_id(&self) -> &str {
        &self.report_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_metadata() {
        let metadata = AuditMetadata::generate("0000-1111", "Contoso");
        assert_eq!(metadata.subscription_id(), "0000-1111");
        assert_eq!(metadata.client_name(), "Contoso");
        assert_eq!(metadata.tool_name(), "azure-checker");
        assert!(metadata.report_id().starts_with("urn:uuid:"));
    }

    #[test]
    fn test_generated_report_ids_are_unique() {
        let a = AuditMetadata::generate("sub", "client");
        let b = AuditMetadata::generate("sub", "client");
        assert_ne!(a.report_id(), b.report_id());
    }
}
