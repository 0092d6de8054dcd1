use crate::ports::outbound::{CommandError, CommandRunner};
use std::collections::HashMap;
use std::sync::Mutex;

/// Runner answering from a fixed table and recording every command line
///
/// Commands missing from the table fail with a non-zero exit.
pub(super) struct TableRunner {
    responses: HashMap<String, Result<String, String>>,
    pub calls: Mutex<Vec<String>>,
}

impl TableRunner {
    pub fn new(responses: Vec<(&str, Result<&str, &str>)>) -> Self {
        Self {
            responses: responses
                .into_iter()
                .map(|(cmd, r)| (cmd.to_string(), r.map(String::from).map_err(String::from)))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self, command_line: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == command_line)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CommandRunner for TableRunner {
    fn run(&self, command_line: &str) -> Result<Vec<u8>, CommandError> {
        self.calls.lock().unwrap().push(command_line.to_string());
        let stderr = match self.responses.get(command_line) {
            Some(Ok(stdout)) => return Ok(stdout.clone().into_bytes()),
            Some(Err(stderr)) => stderr.clone(),
            None => "unknown command".to_string(),
        };
        Err(CommandError::NonZeroExit {
            command: command_line.to_string(),
            status: Some(1),
            stderr,
        })
    }
}
