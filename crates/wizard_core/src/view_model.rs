use crate::{FinishReason, HelpMedia, StepStatus, SubmissionStatus, SummaryRow};

/// Everything a front-end needs to draw the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub wizard_title: String,
    pub versions: Vec<VersionOptionView>,
    /// Empty while `load_error` is set.
    pub steps: Vec<StepItemView>,
    pub load_error: Option<String>,
    /// The step being worked on; `None` while the summary is shown.
    pub current: Option<StepContentView>,
    pub summary: Option<SummaryView>,
    pub loading: bool,
    pub log_len: usize,
    pub page_url: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionOptionView {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepItemView {
    pub index: usize,
    pub label: String,
    pub status: StepStatus,
    pub clickable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub url: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpView {
    /// `None` hides the toggle.
    pub toggle_label: Option<String>,
    pub panel_visible: bool,
    pub media: Option<HelpMedia>,
    pub support_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepContentView {
    /// 1-based.
    pub number: usize,
    pub title: String,
    pub text: String,
    pub link: Option<LinkView>,
    pub help: HelpView,
    /// `None` when notes are not captured.
    pub note_draft: Option<String>,
    pub back_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub title: String,
    pub description: String,
    pub reason: FinishReason,
    pub rows: Vec<SummaryRow>,
    pub feedback_label: String,
    pub feedback: String,
    pub status: SubmissionStatus,
    pub status_text: Option<String>,
    pub submit_enabled: bool,
    /// Shown under the submit button.
    pub disclaimer: String,
    pub privacy_url: String,
}
