//! Session configuration
//!
//! The output table carries three pieces of session metadata (start date,
//! session name, and the session time window) that are not derived from
//! the input document. They vary per real session, so they are explicit
//! configuration passed to the converter rather than baked-in literals.

use serde::{Deserialize, Serialize};

/// Session metadata stamped into every output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Session start date, rendered as-is (conventionally `YYYY/MM/DD`)
    #[serde(default = "default_start_date")]
    pub start_date: String,

    /// Human-readable session name
    #[serde(default = "default_name")]
    pub name: String,

    /// Session window start, rendered as-is
    #[serde(default = "default_session_start")]
    pub session_start: String,

    /// Session window end, rendered as-is
    #[serde(default = "default_session_end")]
    pub session_end: String,
}

fn default_start_date() -> String {
    "2025/11/12".to_string()
}

fn default_name() -> String {
    "Training session".to_string()
}

fn default_session_start() -> String {
    "00:00:00".to_string()
}

fn default_session_end() -> String {
    "01:30:00".to_string()
}

impl Default for SessionInfo {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            name: default_name(),
            session_start: default_session_start(),
            session_end: default_session_end(),
        }
    }
}

impl SessionInfo {
    /// Create session metadata with the default window.
    pub fn new(start_date: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder method: set the session start date.
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = start_date.into();
        self
    }

    /// Builder method: set the session name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder method: set the session time window.
    pub fn with_window(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.session_start = start.into();
        self.session_end = end.into();
        self
    }
}
