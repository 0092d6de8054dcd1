use super::resource::ResourceId;
use std::fmt;
use thiserror::Error;

/// The kinds of enrichment lookup, one per enrichment slot on [`super::Resource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LookupKind {
    BackupVault,
    PatchAssessment,
}

impl LookupKind {
    pub fn label(&self) -> &'static str {
        match self {
            LookupKind::BackupVault => "backup vault",
            LookupKind::PatchAssessment => "patch assessment",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a lookup produced no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LookupErrorKind {
    /// The lookup did not finish within the configured limit
    Timeout,
    /// Transport or process failure (command failed, unusable response)
    LookupFailed,
    /// The response could not be decoded into the expected payload
    DecodeFailed,
    /// Domain-valid negative result: the VM has no backup vault
    NotBackedUp,
}

impl LookupErrorKind {
    /// `NotBackedUp` is an answer, not a failure
    pub fn is_failure(&self) -> bool {
        !matches!(self, LookupErrorKind::NotBackedUp)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LookupErrorKind::Timeout => "timeout",
            LookupErrorKind::LookupFailed => "lookup failed",
            LookupErrorKind::DecodeFailed => "decode failed",
            LookupErrorKind::NotBackedUp => "not backed up",
        }
    }
}

impl fmt::Display for LookupErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed or negative lookup, with a human-readable detail message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct LookupError {
    pub kind: LookupErrorKind,
    pub message: String,
}

impl LookupError {
    pub fn new(kind: LookupErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Result of one enrichment attempt for one resource
///
/// Exactly one of `value` and `error` is present; the constructors are the
/// only way to build an outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOutcome<T> {
    resource_id: ResourceId,
    value: Option<T>,
    error: Option<LookupError>,
}

impl<T> LookupOutcome<T> {
    pub fn success(resource_id: ResourceId, value: T) -> Self {
        Self {
            resource_id,
            value: Some(value),
            error: None,
        }
    }

    pub fn failure(
        resource_id: ResourceId,
        kind: LookupErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            resource_id,
            value: None,
            error: Some(LookupError::new(kind, message)),
        }
    }

    pub fn resource_id(&self) -> &ResourceId {
        &self.resource_id
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&LookupError> {
        self.error.as_ref()
    }

    pub fn error_kind(&self) -> Option<LookupErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }

    pub fn is_success(&self) -> bool {
        self.value.is_some()
    }
}
