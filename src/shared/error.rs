use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow schedulers and CI systems to distinguish between a clean
/// audit, an audit with failed lookups, and a run that never produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - report produced (lookup failures tolerated unless `--strict`)
    Success = 0,
    /// Report produced, but some lookups failed and `--strict` was requested
    LookupFailures = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (inventory failure, file I/O error, invariant violation, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::LookupFailures => write!(f, "Lookup Failures (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the subscription audit.
///
/// Per-resource lookup failures are NOT represented here: they are contained
/// in lookup outcomes. These variants abort the run.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Invalid subscription: {subscription}\nReason: {reason}\n\n💡 Hint: Pass a subscription ID with --subscription (see `az account list`)")]
    InvalidSubscription {
        subscription: String,
        reason: String,
    },

    #[error("Failed to fetch {what}\nDetails: {details}\n\n💡 Hint: Make sure the Azure CLI is installed and you are logged in (`az login`)")]
    InventoryFetch { what: String, details: String },

    #[error("Lookup outcome references unknown resource: {resource_id}")]
    UnknownResource { resource_id: String },

    #[error("Received more than one {kind} outcome for resource {resource_id} in a single pass")]
    DuplicateOutcome { kind: String, resource_id: String },

    #[error("{kind} pass ended early: received {received} of {expected} outcome(s)")]
    IncompletePass {
        kind: String,
        expected: usize,
        received: usize,
    },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {subject}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        subject: String,
        reason: String,
        hint: String,
    },
}
