use url::Url;

use crate::{LoadToken, SubmissionToken, VersionCatalog, WizardConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page opened; the URL may carry a requested version.
    Init { page_url: Option<Url> },
    /// Version catalog fetch finished.
    CatalogLoaded(Result<VersionCatalog, String>),
    /// Step document fetch finished.
    ContentLoaded {
        token: LoadToken,
        version: String,
        result: Result<WizardConfig, String>,
    },
    /// User picked a version.
    VersionSelected(String),
    /// User clicked an entry in the step list (0-based).
    StepClicked(usize),
    NextClicked,
    BackClicked,
    HelpClicked,
    SupportLinkClicked,
    /// User typed into the note input of the current step.
    NoteInputChanged(String),
    /// User edited the note of a step (0-based), also allowed on the summary.
    NoteEdited { step: usize, text: String },
    /// User typed into the feedback box on the summary.
    FeedbackChanged(String),
    SubmitClicked,
    /// Feedback submission finished.
    SubmissionCompleted {
        token: SubmissionToken,
        result: Result<(), String>,
    },
}
