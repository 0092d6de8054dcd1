use crate::application::enrichment::{DEFAULT_LOOKUP_TIMEOUT, DEFAULT_MAX_CONCURRENCY};
use crate::shared::error::AuditError;
use crate::shared::Result;
use std::time::Duration;

/// AuditRequest - Internal request DTO for the audit use case
///
/// Built by the CLI after merging command-line flags with the config file.
#[derive(Debug, Clone)]
pub struct AuditRequest {
    /// Subscription the audit runs against
    pub subscription_id: String,
    /// Customer name printed in the report title
    pub client_name: String,
    /// Upper bound for each individual lookup
    pub lookup_timeout: Duration,
    /// Maximum number of lookups in flight at once
    pub max_concurrency: usize,
    /// Whether to run the backup vault pass
    pub check_backups: bool,
    /// Whether to run the patch assessment pass
    pub assess_patches: bool,
}

impl AuditRequest {
    pub fn builder() -> AuditRequestBuilder {
        AuditRequestBuilder::default()
    }
}

/// Builder for [`AuditRequest`] with validation on `build`
#[derive(Debug, Default)]
pub struct AuditRequestBuilder {
    subscription_id: Option<String>,
    client_name: Option<String>,
    lookup_timeout: Option<Duration>,
    max_concurrency: Option<usize>,
    skip_backups: bool,
    skip_patches: bool,
}

impl AuditRequestBuilder {
    pub fn subscription_id(mut self, subscription_id: impl Into<String>) -> Self {
        self.subscription_id = Some(subscription_id.into());
        self
    }

    pub fn client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    pub fn lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.lookup_timeout = Some(lookup_timeout);
        self
    }

    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = Some(max_concurrency);
        self
    }

    pub fn check_backups(mut self, enabled: bool) -> Self {
        self.skip_backups = !enabled;
        self
    }

    pub fn assess_patches(mut self, enabled: bool) -> Self {
        self.skip_patches = !enabled;
        self
    }

    /// Validates the collected values and builds the request
    ///
    /// # Errors
    /// Returns `AuditError::Validation` if the subscription is missing or
    /// blank, or if the timeout or concurrency limit is zero.
    pub fn build(self) -> Result<AuditRequest> {
        let subscription_id = self
            .subscription_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AuditError::Validation {
                message: "a subscription ID is required".to_string(),
            })?;

        let lookup_timeout = self.lookup_timeout.unwrap_or(DEFAULT_LOOKUP_TIMEOUT);
        if lookup_timeout.is_zero() {
            return Err(AuditError::Validation {
                message: "lookup timeout must be greater than zero".to_string(),
            }
            .into());
        }

        let max_concurrency = self.max_concurrency.unwrap_or(DEFAULT_MAX_CONCURRENCY);
        if max_concurrency == 0 {
            return Err(AuditError::Validation {
                message: "max concurrency must be at least 1".to_string(),
            }
            .into());
        }

        let client_name = self
            .client_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| subscription_id.clone());

        Ok(AuditRequest {
            subscription_id,
            client_name,
            lookup_timeout,
            max_concurrency,
            check_backups: !self.skip_backups,
            assess_patches: !self.skip_patches,
        })
    }
}
