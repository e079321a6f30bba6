use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const BACK_LABEL: &str = "Back";
pub const NEXT_LABEL: &str = "Next";
pub const STEP_SELECTED_LABEL: &str = "Step selected";
pub const SUPPORT_LINK_LABEL: &str = "Support link";

pub fn version_changed_label(version: &str) -> String {
    format!("Version changed to {version}")
}

/// One recorded interaction. `step` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub step: usize,
    pub time: String,
    pub button: String,
}

/// Append-only record of what the user clicked, in click order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionLog {
    entries: Vec<LogEntry>,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, step_index: usize, button: impl Into<String>, at: NaiveDateTime) {
        self.entries.push(LogEntry {
            step: step_index + 1,
            time: format_timestamp(&at),
            button: button.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }
}

/// `YYYY-MM-DD--HH-MM-SS:mmm`
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d--%H-%M-%S:%3f").to_string()
}

/// Source of timestamps for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Local wall-clock time.
    #[default]
    Local,
    Fixed(NaiveDateTime),
}

impl Clock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::Local => Local::now().naive_local(),
            Clock::Fixed(at) => *at,
        }
    }
}
