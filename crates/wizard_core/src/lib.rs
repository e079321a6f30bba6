//! Wizard core: pure state machine and view-model helpers.
mod content;
mod effect;
mod features;
mod finalize;
mod help;
mod interaction_log;
mod msg;
mod navigator;
mod state;
mod update;
mod version;
mod view_model;

pub use content::{
    Step, StepHelp, StepLink, WizardConfig, DEFAULT_LINK_LABEL, DEFAULT_WIZARD_TITLE,
};
pub use effect::Effect;
pub use features::{Features, Variant};
pub use finalize::{
    summary_rows, FinishReason, SubmissionPayload, SubmissionStatus, SummaryRow,
    FEEDBACK_LABEL, PRIVACY_POLICY_URL, SUMMARY_DESCRIPTION, SUMMARY_DISCLAIMER, SUMMARY_TITLE,
};
pub use help::{
    is_video_url, HelpMedia, HelpOutcome, HelpStage, HelpTracker, HELP_CRITICAL_LABEL,
    HELP_INITIAL_LABEL, HELP_TOGGLE_LABEL,
};
pub use interaction_log::{
    format_timestamp, version_changed_label, Clock, InteractionLog, LogEntry, BACK_LABEL,
    NEXT_LABEL, STEP_SELECTED_LABEL, SUPPORT_LINK_LABEL,
};
pub use msg::Msg;
pub use navigator::{Advance, Navigator, StepStatus};
pub use state::{AppState, LoadToken, SubmissionToken, LOAD_FAILED_MESSAGE};
pub use update::update;
pub use version::{
    resolve_version, version_param, with_version_param, VersionCatalog, VERSION_PARAM,
};
pub use view_model::{
    AppViewModel, HelpView, LinkView, StepContentView, StepItemView, SummaryView,
    VersionOptionView,
};
