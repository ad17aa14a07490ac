//! Progress reporting
//!
//! Progress is advisory only: sinks observe the run and never influence it.

/// Receiver for progress notifications
pub trait ProgressSink: Send + Sync {
    /// Total number of steps the run will report
    fn set_total(&self, _total: usize) {}

    /// Describe the current phase
    fn set_description(&self, description: &str);

    /// Advance by `steps`
    fn update(&self, steps: usize);
}

/// Sink that discards all notifications
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn set_description(&self, _description: &str) {}

    fn update(&self, _steps: usize) {}
}
