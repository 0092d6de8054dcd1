use crate::ports::outbound::{CommandError, CommandRunner};
use dashmap::DashMap;

/// CachingCommandRunner wraps a CommandRunner and memoizes successful output
///
/// Decorator used for idempotent reads that many lookups repeat, such as
/// resolving the same Recovery Services vault for every VM it protects.
/// The cache is keyed by the exact command line and is safe to share across
/// concurrent lookups. Failures are never cached, so a transient error is
/// retried by the next caller.
pub struct CachingCommandRunner<R: CommandRunner> {
    inner: R,
    cache: DashMap<String, Vec<u8>>,
}

impl<R: CommandRunner> CachingCommandRunner<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<R: CommandRunner> CommandRunner for CachingCommandRunner<R> {
    fn run(&self, command_line: &str) -> Result<Vec<u8>, CommandError> {
        if let Some(cached) = self.cache.get(command_line) {
            return Ok(cached.clone());
        }

        let output = self.inner.run(command_line)?;
        self.cache.insert(command_line.to_string(), output.clone());

        Ok(output)
    }
}
