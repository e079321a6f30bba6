use serde::{Deserialize, Serialize};

use crate::content::WizardConfig;
use crate::interaction_log::{InteractionLog, LogEntry};

pub const SUMMARY_TITLE: &str = "Onboarding summary";
pub const SUMMARY_DESCRIPTION: &str = "Below is a summary of the steps you took and the buttons you \
clicked. This data will be submitted if you choose to send it.";
pub const FEEDBACK_LABEL: &str = "Additional context or feedback";
pub const SUMMARY_DISCLAIMER: &str =
    "Submitting sends this data to our servers and is subject to our privacy policy.";
pub const PRIVACY_POLICY_URL: &str = "https://example.com/privacy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Completed,
    CriticalProblem,
}

impl FinishReason {
    pub fn as_str(self) -> &'static str {
        match self {
            FinishReason::Completed => "completed",
            FinishReason::CriticalProblem => "critical_problem",
        }
    }

    pub fn log_label(self) -> String {
        format!("Finished: {}", self.as_str())
    }
}

/// Outcome of the most recent submit click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Failed,
}

impl SubmissionStatus {
    pub fn text(self) -> Option<&'static str> {
        match self {
            SubmissionStatus::Idle => None,
            SubmissionStatus::Submitting => Some("Submitting..."),
            SubmissionStatus::Submitted => Some("Submitted. Thank you."),
            SubmissionStatus::Failed => Some("Submission failed. Please try again later."),
        }
    }
}

/// Body of the feedback POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub version: Option<String>,
    pub reason: FinishReason,
    pub log: Vec<LogEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
    pub feedback: String,
}

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub step_label: String,
    pub time: String,
    pub button: String,
    pub note: String,
}

/// Builds summary rows, resolving titles and notes at call time.
pub fn summary_rows(
    log: &InteractionLog,
    config: &WizardConfig,
    notes: &[String],
) -> Vec<SummaryRow> {
    log.entries()
        .iter()
        .map(|entry| {
            let index = entry.step.saturating_sub(1);
            let title = config
                .step(index)
                .map(|step| step.title.as_str())
                .unwrap_or("");
            let step_label = if title.is_empty() {
                entry.step.to_string()
            } else {
                format!("{}. {}", entry.step, title)
            };
            SummaryRow {
                step_label,
                time: entry.time.clone(),
                button: entry.button.clone(),
                note: notes.get(index).cloned().unwrap_or_default(),
            }
        })
        .collect()
}
