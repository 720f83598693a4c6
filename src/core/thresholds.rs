use serde::Serialize;

/// Cutoffs for the orphan classifier, fixed for the duration of one
/// discovery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    /// A resource must be strictly older than this many days.
    pub age_days: u64,
    /// A Lambda's summed invocations over the monitoring window must be at
    /// or below this count.
    pub invoke_threshold: u64,
    /// Length of the invocation monitoring window, in days.
    pub monitor_days: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            age_days: 90,
            invoke_threshold: 0,
            monitor_days: 30,
        }
    }
}
