use crate::application::read_models::AuditReadModel;
use crate::shared::Result;

/// ReportFormatter port for rendering the audit report
///
/// Formatters are read-only consumers: they receive the read model built
/// after every enrichment pass has finished and never see the live registry.
pub trait ReportFormatter {
    /// Renders the complete report document
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &AuditReadModel) -> Result<String>;
}
