use url::Url;
use wizard_logging::{wizard_debug, wizard_info, wizard_warn};

use crate::content::{Step, WizardConfig};
use crate::features::{Features, Variant};
use crate::finalize::{
    summary_rows, FinishReason, SubmissionPayload, SubmissionStatus, FEEDBACK_LABEL,
    PRIVACY_POLICY_URL, SUMMARY_DESCRIPTION, SUMMARY_DISCLAIMER, SUMMARY_TITLE,
};
use crate::help::{HelpOutcome, HelpTracker};
use crate::interaction_log::{
    version_changed_label, Clock, InteractionLog, BACK_LABEL, NEXT_LABEL, STEP_SELECTED_LABEL,
    SUPPORT_LINK_LABEL,
};
use crate::navigator::{Advance, Navigator};
use crate::version::{resolve_version, version_param, with_version_param, VersionCatalog};
use crate::view_model::{
    AppViewModel, HelpView, LinkView, StepContentView, StepItemView, SummaryView,
    VersionOptionView,
};
use crate::DEFAULT_WIZARD_TITLE;

/// The single user-visible text shown when content cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load onboarding content.";

/// Identifies one content load; only the latest issued token is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LoadToken(pub u64);

/// Identifies one submit click; only the latest issued token is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SubmissionToken(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingLoad {
    token: LoadToken,
    version: String,
    rewrite_url: bool,
}

/// Everything tied to one loaded version; replaced wholesale on reload.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WizardSession {
    version: String,
    config: WizardConfig,
    navigator: Navigator,
    help: HelpTracker,
    notes: Vec<String>,
    note_draft: String,
    finish_reason: Option<FinishReason>,
    feedback: String,
    submission: SubmissionStatus,
    pending_submit: Option<SubmissionToken>,
}

impl WizardSession {
    fn new(version: String, config: WizardConfig) -> Self {
        let step_count = config.steps.len();
        Self {
            version,
            config,
            navigator: Navigator::new(step_count),
            help: HelpTracker::default(),
            notes: vec![String::new(); step_count],
            note_draft: String::new(),
            finish_reason: None,
            feedback: String::new(),
            submission: SubmissionStatus::Idle,
            pending_submit: None,
        }
    }

    fn current_step(&self) -> Option<&Step> {
        self.config.step(self.navigator.current_index())
    }

    fn commit_note_draft(&mut self) {
        let draft = self.note_draft.trim().to_string();
        if draft.is_empty() {
            return;
        }
        let current = self.navigator.current_index();
        if let Some(slot) = self.notes.get_mut(current) {
            *slot = draft;
        }
    }

    fn sync_note_draft(&mut self) {
        let current = self.navigator.current_index();
        self.note_draft = self.notes.get(current).cloned().unwrap_or_default();
    }
}

/// Session state of one wizard instance, owned by a single controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    features: Features,
    clock: Clock,
    page_url: Option<Url>,
    requested_version: Option<String>,
    catalog: Option<VersionCatalog>,
    last_token: LoadToken,
    last_submit: SubmissionToken,
    pending: Option<PendingLoad>,
    session: Option<WizardSession>,
    log: InteractionLog,
    load_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(variant: Variant) -> Self {
        Self::with_features(variant.features())
    }

    pub fn with_features(features: Features) -> Self {
        Self {
            features,
            ..Self::default()
        }
    }

    /// Replaces the timestamp source used for log entries.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn features(&self) -> Features {
        self.features
    }

    pub fn log(&self) -> &InteractionLog {
        &self.log
    }

    pub fn navigator(&self) -> Option<&Navigator> {
        self.session.as_ref().map(|session| &session.navigator)
    }

    pub fn help(&self) -> Option<&HelpTracker> {
        self.session.as_ref().map(|session| &session.help)
    }

    pub fn config(&self) -> Option<&WizardConfig> {
        self.session.as_ref().map(|session| &session.config)
    }

    pub fn catalog(&self) -> Option<&VersionCatalog> {
        self.catalog.as_ref()
    }

    pub fn current_version(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.version.as_str())
    }

    pub fn notes(&self) -> &[String] {
        self.session
            .as_ref()
            .map(|session| session.notes.as_slice())
            .unwrap_or(&[])
    }

    pub fn note_draft(&self) -> Option<&str> {
        self.session
            .as_ref()
            .map(|session| session.note_draft.as_str())
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.session.as_ref().and_then(|session| session.finish_reason)
    }

    pub fn submission_status(&self) -> SubmissionStatus {
        self.session
            .as_ref()
            .map(|session| session.submission)
            .unwrap_or_default()
    }

    pub fn is_finished(&self) -> bool {
        self.navigator().is_some_and(Navigator::is_finished)
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn page_url(&self) -> Option<&Url> {
        self.page_url.as_ref()
    }

    pub fn latest_token(&self) -> LoadToken {
        self.last_token
    }

    pub fn view(&self) -> AppViewModel {
        let selected_version = self
            .pending
            .as_ref()
            .map(|pending| pending.version.as_str())
            .or_else(|| self.current_version());

        let versions = self
            .catalog
            .as_ref()
            .map(|catalog| {
                catalog
                    .versions
                    .keys()
                    .map(|id| VersionOptionView {
                        id: id.clone(),
                        label: catalog.option_label(id),
                        selected: Some(id.as_str()) == selected_version,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let wizard_title = self
            .config()
            .map(|config| config.display_title().to_string())
            .unwrap_or_else(|| DEFAULT_WIZARD_TITLE.to_string());

        let steps = match (&self.session, &self.load_error) {
            (Some(session), None) => self.step_items(session),
            _ => Vec::new(),
        };

        let (current, summary) = match &self.session {
            Some(session) if session.navigator.is_finished() => (None, self.summary(session)),
            Some(session) => (self.step_content(session), None),
            None => (None, None),
        };

        AppViewModel {
            wizard_title,
            versions,
            steps,
            load_error: self.load_error.clone(),
            current,
            summary,
            loading: self.pending.is_some(),
            log_len: self.log.len(),
            page_url: self.page_url.as_ref().map(Url::to_string),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin(&mut self, page_url: Option<Url>) {
        self.requested_version = page_url.as_ref().and_then(version_param);
        self.page_url = page_url;
        self.load_error = None;
        self.mark_dirty();
    }

    /// Stores the catalog and issues the first content load.
    pub(crate) fn apply_catalog(&mut self, catalog: VersionCatalog) -> Option<(LoadToken, String)> {
        let requested = self.requested_version.clone();
        let resolved = resolve_version(&catalog, requested.as_deref());
        let explicit = requested
            .as_deref()
            .is_some_and(|id| !id.is_empty() && catalog.contains(id));
        self.catalog = Some(catalog);
        self.mark_dirty();

        let Some(version) = resolved else {
            self.fail_load("version catalog lists no versions");
            return None;
        };
        wizard_debug!("Resolved version {} (explicit: {})", version, explicit);
        let token = self.issue_load(version.clone(), !explicit);
        Some((token, version))
    }

    fn issue_load(&mut self, version: String, rewrite_url: bool) -> LoadToken {
        self.last_token = LoadToken(self.last_token.0 + 1);
        let token = self.last_token;
        self.pending = Some(PendingLoad {
            token,
            version,
            rewrite_url,
        });
        token
    }

    /// Applies a finished content load. Returns the URL to write back, if any.
    pub(crate) fn apply_content(
        &mut self,
        token: LoadToken,
        version: String,
        result: Result<WizardConfig, String>,
    ) -> Option<Url> {
        let is_latest = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.token == token);
        if !is_latest {
            wizard_warn!(
                "Dropping stale content for {} (token {}, latest {})",
                version,
                token.0,
                self.last_token.0
            );
            return None;
        }
        let pending = self.pending.take()?;

        let config = match result {
            Ok(config) if config.steps.is_empty() => {
                self.fail_load(&format!("version {version} has no steps"));
                return None;
            }
            Ok(config) => config,
            Err(reason) => {
                self.fail_load(&reason);
                return None;
            }
        };

        wizard_info!(
            "Loaded version {} with {} steps",
            version,
            config.steps.len()
        );
        self.session = Some(WizardSession::new(version.clone(), config));
        self.load_error = None;
        self.mark_dirty();

        if !pending.rewrite_url {
            return None;
        }
        let next = with_version_param(self.page_url.as_ref()?, Some(&version));
        self.page_url = Some(next.clone());
        Some(next)
    }

    pub(crate) fn fail_load(&mut self, reason: &str) {
        wizard_warn!("Failed to load onboarding content: {}", reason);
        self.load_error = Some(LOAD_FAILED_MESSAGE.to_string());
        self.mark_dirty();
    }

    pub(crate) fn select_version(&mut self, version: &str) -> Option<LoadToken> {
        if version.is_empty() || self.is_finished() {
            return None;
        }
        let known = self
            .catalog
            .as_ref()
            .is_some_and(|catalog| catalog.contains(version));
        if !known {
            wizard_warn!("Ignoring selection of unknown version {}", version);
            return None;
        }
        self.record(version_changed_label(version));
        self.mark_dirty();
        Some(self.issue_load(version.to_string(), true))
    }

    pub(crate) fn next(&mut self) -> bool {
        if !self.is_interactive() {
            return false;
        }
        self.record(NEXT_LABEL);
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.commit_note_draft();
        match session.navigator.advance() {
            Advance::Moved => {
                self.on_step_changed();
                true
            }
            Advance::AtEnd => self.finalize(FinishReason::Completed),
            Advance::Blocked => false,
        }
    }

    pub(crate) fn back(&mut self) -> bool {
        let at_start = self
            .navigator()
            .is_none_or(|navigator| navigator.current_index() == 0);
        if !self.is_interactive() || at_start {
            return false;
        }
        self.record(BACK_LABEL);
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.commit_note_draft();
        if !session.navigator.retreat() {
            return false;
        }
        self.on_step_changed();
        true
    }

    pub(crate) fn select_step(&mut self, index: usize) -> bool {
        let gate = self.features.high_water_mark;
        let exit_summary = self.features.exit_summary;
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.navigator.is_reachable(index, gate) {
            wizard_debug!("Step {} is not reachable", index + 1);
            return false;
        }

        if session.navigator.is_finished() {
            if !exit_summary {
                return false;
            }
            session.navigator.exit_summary(Some(index));
            session.finish_reason = None;
            session.submission = SubmissionStatus::Idle;
            session.pending_submit = None;
            wizard_info!("Left summary for step {}", index + 1);
        } else {
            session.commit_note_draft();
            session.navigator.go_to(index);
        }
        self.record(STEP_SELECTED_LABEL);
        self.on_step_changed();
        true
    }

    pub(crate) fn help_clicked(&mut self) -> bool {
        if !self.is_interactive() {
            return false;
        }
        let escalation = self.features.help_escalation;
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let step_help = session.current_step().and_then(|step| step.help.clone());
        if !escalation && step_help.is_none() {
            return false;
        }
        let label = session.help.label(escalation);

        self.record(label);
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.commit_note_draft();
        match session.help.click(step_help.as_ref(), escalation) {
            HelpOutcome::Revealed | HelpOutcome::Hidden => {
                self.mark_dirty();
                true
            }
            HelpOutcome::Escalate => self.finalize(FinishReason::CriticalProblem),
            HelpOutcome::Ignored => false,
        }
    }

    pub(crate) fn support_link_clicked(&mut self) -> bool {
        let has_support = self
            .session
            .as_ref()
            .and_then(WizardSession::current_step)
            .and_then(Step::support_url)
            .is_some();
        if !has_support || !self.is_interactive() {
            return false;
        }
        self.record(SUPPORT_LINK_LABEL)
    }

    pub(crate) fn set_note_draft(&mut self, text: String) -> bool {
        if !self.features.notes || !self.is_interactive() {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.note_draft = text;
        self.mark_dirty();
        true
    }

    /// Notes stay editable on the summary; submissions read them at submit time.
    pub(crate) fn edit_note(&mut self, step_index: usize, text: &str) -> bool {
        if !self.features.notes {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(slot) = session.notes.get_mut(step_index) else {
            return false;
        };
        *slot = text.trim().to_string();
        if step_index == session.navigator.current_index() {
            session.sync_note_draft();
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn set_feedback(&mut self, text: String) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.navigator.is_finished() {
            return false;
        }
        session.feedback = text;
        self.mark_dirty();
        true
    }

    /// Enters the terminal state. A second call while finished is a no-op.
    pub(crate) fn finalize(&mut self, reason: FinishReason) -> bool {
        if self.session.is_none() || self.is_finished() {
            return false;
        }
        // The finish entry is written before the flag blocks further records.
        self.record(reason.log_label());
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.navigator.finish();
        session.help.reset();
        session.finish_reason = Some(reason);
        session.submission = SubmissionStatus::Idle;
        session.pending_submit = None;
        wizard_info!("Wizard finished: {}", reason.as_str());
        self.mark_dirty();
        true
    }

    pub(crate) fn begin_submit(&mut self) -> Option<(SubmissionToken, SubmissionPayload)> {
        let notes_enabled = self.features.notes;
        let log = self.log.entries().to_vec();
        let token = SubmissionToken(self.last_submit.0 + 1);
        let session = self.session.as_mut()?;
        let reason = session.finish_reason?;
        if !session.navigator.is_finished() || session.submission == SubmissionStatus::Submitting {
            return None;
        }

        let version = session
            .config
            .version
            .clone()
            .filter(|version| !version.is_empty())
            .unwrap_or_else(|| session.version.clone());
        let payload = SubmissionPayload {
            version: Some(version),
            reason,
            log,
            notes: notes_enabled.then(|| session.notes.clone()),
            feedback: session.feedback.clone(),
        };
        session.submission = SubmissionStatus::Submitting;
        session.pending_submit = Some(token);
        self.last_submit = token;
        self.mark_dirty();
        Some((token, payload))
    }

    /// Applies the result of the latest submit; earlier completions are dropped.
    pub(crate) fn apply_submission(&mut self, token: SubmissionToken, result: Result<(), String>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.pending_submit != Some(token) {
            wizard_warn!(
                "Dropping stale submission result (token {}, latest {})",
                token.0,
                self.last_submit.0
            );
            return;
        }
        session.pending_submit = None;
        session.submission = match result {
            Ok(()) => {
                wizard_info!("Feedback submitted");
                SubmissionStatus::Submitted
            }
            Err(reason) => {
                wizard_warn!("Feedback submission failed: {}", reason);
                SubmissionStatus::Failed
            }
        };
        self.mark_dirty();
    }

    fn is_interactive(&self) -> bool {
        self.navigator().is_some_and(|navigator| !navigator.is_finished())
    }

    /// Appends to the interaction log unless logging is off or the session is finished.
    fn record(&mut self, label: impl Into<String>) -> bool {
        if !self.features.interaction_log {
            return false;
        }
        let (index, finished) = self
            .navigator()
            .map(|navigator| (navigator.current_index(), navigator.is_finished()))
            .unwrap_or((0, false));
        if finished {
            return false;
        }
        self.log.record(index, label, self.clock.now());
        self.mark_dirty();
        true
    }

    fn on_step_changed(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.help.reset();
            session.sync_note_draft();
        }
        self.mark_dirty();
    }

    fn step_items(&self, session: &WizardSession) -> Vec<StepItemView> {
        let navigator = &session.navigator;
        let finished = navigator.is_finished();
        session
            .config
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| StepItemView {
                index,
                label: format!("{}. {}", index + 1, step.title),
                status: navigator.status_of(index),
                clickable: navigator.is_reachable(index, self.features.high_water_mark)
                    && (!finished || self.features.exit_summary),
            })
            .collect()
    }

    fn step_content(&self, session: &WizardSession) -> Option<StepContentView> {
        let step = session.current_step()?;
        let escalation = self.features.help_escalation;
        let show_toggle = escalation || step.help.is_some();
        Some(StepContentView {
            number: session.navigator.current_index() + 1,
            title: step.title.clone(),
            text: step.text.clone(),
            link: step.visible_link().map(|(url, label)| LinkView {
                url: url.to_string(),
                label: label.to_string(),
            }),
            help: HelpView {
                toggle_label: show_toggle.then(|| session.help.label(escalation).to_string()),
                panel_visible: session.help.panel_visible(),
                media: session.help.media().cloned(),
                support_url: step.support_url().map(str::to_string),
            },
            note_draft: self.features.notes.then(|| session.note_draft.clone()),
            back_enabled: session.navigator.current_index() > 0,
        })
    }

    fn summary(&self, session: &WizardSession) -> Option<SummaryView> {
        let reason = session.finish_reason?;
        let status = session.submission;
        Some(SummaryView {
            title: SUMMARY_TITLE.to_string(),
            description: SUMMARY_DESCRIPTION.to_string(),
            reason,
            rows: summary_rows(&self.log, &session.config, &session.notes),
            feedback_label: FEEDBACK_LABEL.to_string(),
            feedback: session.feedback.clone(),
            status,
            status_text: status.text().map(str::to_string),
            submit_enabled: status != SubmissionStatus::Submitting,
            disclaimer: SUMMARY_DISCLAIMER.to_string(),
            privacy_url: PRIVACY_POLICY_URL.to_string(),
        })
    }
}
