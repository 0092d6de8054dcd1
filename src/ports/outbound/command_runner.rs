use thiserror::Error;

/// Failure of a single external command invocation
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be started at all (shell missing, permissions)
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited unsuccessfully
    #[error("`{command}` exited with {}: {stderr}", describe_status(.status))]
    NonZeroExit {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// CommandRunner port for invoking external commands (the Azure CLI)
///
/// This port is the only way the application reaches Azure. Implementations
/// are synchronous and blocking; callers that need concurrency or timeouts
/// run them on a blocking worker (see the enrichment coordinator).
///
/// Implementations must be `Send + Sync` so one runner can be shared by every
/// concurrent lookup.
pub trait CommandRunner: Send + Sync {
    /// Runs `command_line` and returns its stdout
    ///
    /// # Errors
    /// Returns [`CommandError`] if the process cannot be started or exits with
    /// a non-zero status.
    fn run(&self, command_line: &str) -> Result<Vec<u8>, CommandError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<R> {
    fn run(&self, command_line: &str) -> Result<Vec<u8>, CommandError> {
        (**self).run(command_line)
    }
}
