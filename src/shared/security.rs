use crate::shared::error::AuditError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum config file size for security (1 MB)
/// A config file larger than this is certainly not a hand-written audit config.
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Maximum length of a single command-line argument taken from inventory data
pub const MAX_COMMAND_ARGUMENT_LENGTH: usize = 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read {} metadata: {}",
            file_description,
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Prepares a value for interpolation into a shell command line
///
/// Resource identifiers, names and resource groups come from inventory JSON
/// and end up inside `bash -c` / `powershell -Command` strings. Values made
/// only of ASCII alphanumerics, `-`, `_`, `.` and `/` are returned as-is;
/// anything else (Azure allows `(`, `)` and Unicode letters in resource group
/// names) is wrapped in single quotes for the platform shell, so it reaches
/// the Azure CLI as one literal argument.
///
/// # Errors
/// Returns [`AuditError::SecurityError`] if the value is empty, too long or
/// contains a control character.
pub fn quote_command_argument(value: &str, argument_description: &str) -> Result<String> {
    if value.is_empty() {
        return Err(AuditError::SecurityError {
            subject: argument_description.to_string(),
            reason: "value is empty".to_string(),
            hint: "Command arguments must not be empty".to_string(),
        }
        .into());
    }

    if value.len() > MAX_COMMAND_ARGUMENT_LENGTH {
        return Err(AuditError::SecurityError {
            subject: argument_description.to_string(),
            reason: format!(
                "value is too long ({} bytes, maximum {})",
                value.len(),
                MAX_COMMAND_ARGUMENT_LENGTH
            ),
            hint: "Check the inventory data for corrupted identifiers".to_string(),
        }
        .into());
    }

    if let Some(bad) = value.chars().find(|c| c.is_control()) {
        return Err(AuditError::SecurityError {
            subject: format!("{} {:?}", argument_description, value),
            reason: format!("contains control character {:?}", bad),
            hint: "Check the inventory data for corrupted identifiers".to_string(),
        }
        .into());
    }

    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
    {
        return Ok(value.to_string());
    }

    if cfg!(windows) {
        Ok(powershell_single_quote(value))
    } else {
        Ok(bash_single_quote(value))
    }
}

/// `'...'` with each embedded `'` closed, escaped and reopened
fn bash_single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// `'...'`; PowerShell also treats typographic single quotes as quotes, so
/// every one of them is doubled
fn powershell_single_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if matches!(c, '\'' | '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}') {
            quoted.push(c);
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}
