/// ProgressReporter port for reporting progress during an audit
///
/// This is the application's logging channel: status lines, per-pass
/// progress and warnings all go through it, keeping stdout free for the
/// report itself.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress of a counted operation (an enrichment pass)
    ///
    /// # Arguments
    /// * `current` - Completed units so far
    /// * `total` - Total expected units
    /// * `message` - Optional label for the operation
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
