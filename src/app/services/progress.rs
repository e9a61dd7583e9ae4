//! Synchronous progress reporting
//!
//! Long-running reads and imports take a `&mut dyn FnMut(&ProgressUpdate)`
//! argument and call it at line, feature and file boundaries.

use serde::Serialize;

/// One progress notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressUpdate {
    /// What is being done, e.g. "Reading line"
    pub activity: String,
    pub current: usize,
    pub total: usize,
}

impl ProgressUpdate {
    pub fn new(activity: impl Into<String>, current: usize, total: usize) -> Self {
        Self {
            activity: activity.into(),
            current,
            total,
        }
    }

    /// Completed fraction in percent, 100 for an empty total
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

/// Callback that ignores all updates
pub fn no_progress(_update: &ProgressUpdate) {}
