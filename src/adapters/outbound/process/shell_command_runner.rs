use crate::ports::outbound::{CommandError, CommandRunner};
use std::process::{Command, Stdio};

/// ShellCommandRunner adapter running command lines through the platform shell
///
/// Uses `bash -c` on Unix and `powershell -Command` on Windows. Stdout is
/// returned as-is; a non-zero exit status becomes
/// [`CommandError::NonZeroExit`] carrying the trimmed stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellCommandRunner;

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self
    }

    fn shell_command(command_line: &str) -> Command {
        if cfg!(windows) {
            let mut command = Command::new("powershell");
            command.args(["-NoProfile", "-Command", command_line]);
            command
        } else {
            let mut command = Command::new("bash");
            command.args(["-c", command_line]);
            command
        }
    }
}

impl CommandRunner for ShellCommandRunner {
    fn run(&self, command_line: &str) -> Result<Vec<u8>, CommandError> {
        let output = Self::shell_command(command_line)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CommandError::Spawn {
                command: command_line.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(CommandError::NonZeroExit {
                command: command_line.to_string(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}
