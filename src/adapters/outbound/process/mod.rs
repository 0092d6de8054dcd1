/// Process adapters for running external commands
mod caching_command_runner;
mod shell_command_runner;

pub use caching_command_runner::CachingCommandRunner;
pub use shell_command_runner::ShellCommandRunner;
