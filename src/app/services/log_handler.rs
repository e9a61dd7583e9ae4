//! Collected diagnostics for one read or write operation
//!
//! Readers and builders receive a `&mut LogHandler` instead of logging on their
//! own. Messages are kept so callers can inspect them, and [`LogHandler::log_report`]
//! emits them as one grouped message per severity.

use serde::Serialize;
use tracing::{debug, error, warn};

/// Warnings and errors gathered while processing one file
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogHandler {
    activity: String,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl LogHandler {
    /// `activity` completes "During ..., the following warnings were reported"
    pub fn new(activity: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn report_warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("{}: {}", self.activity, message);
        self.warnings.push(message);
    }

    pub fn report_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("{}: {}", self.activity, message);
        self.errors.push(message);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    /// Move the messages of another handler into this one
    pub fn absorb(&mut self, other: LogHandler) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }

    /// Grouped warning text, none without warnings
    pub fn warning_summary(&self) -> Option<String> {
        Self::summary(&self.activity, "warnings", &self.warnings)
    }

    /// Grouped error text, none without errors
    pub fn error_summary(&self) -> Option<String> {
        Self::summary(&self.activity, "errors", &self.errors)
    }

    /// Emit the grouped messages through the tracing subscriber
    pub fn log_report(&self) {
        if let Some(summary) = self.warning_summary() {
            warn!("{}", summary);
        }
        if let Some(summary) = self.error_summary() {
            error!("{}", summary);
        }
    }

    fn summary(activity: &str, kind: &str, messages: &[String]) -> Option<String> {
        if messages.is_empty() {
            return None;
        }

        let mut text = format!("During {}, the following {} were reported:", activity, kind);
        for message in messages {
            text.push_str("\n- ");
            text.push_str(message);
        }
        Some(text)
    }
}
