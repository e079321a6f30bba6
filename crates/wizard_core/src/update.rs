use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Init { page_url } => {
            state.begin(page_url);
            vec![Effect::LoadCatalog]
        }
        Msg::CatalogLoaded(Ok(catalog)) => match state.apply_catalog(catalog) {
            Some((token, version)) => vec![Effect::LoadContent { token, version }],
            None => Vec::new(),
        },
        Msg::CatalogLoaded(Err(reason)) => {
            state.fail_load(&reason);
            Vec::new()
        }
        Msg::ContentLoaded {
            token,
            version,
            result,
        } => match state.apply_content(token, version, result) {
            Some(url) => vec![Effect::ReplaceUrl {
                url: url.to_string(),
            }],
            None => Vec::new(),
        },
        Msg::VersionSelected(version) => match state.select_version(&version) {
            Some(token) => vec![Effect::LoadContent { token, version }],
            None => Vec::new(),
        },
        Msg::StepClicked(index) => {
            state.select_step(index);
            Vec::new()
        }
        Msg::NextClicked => {
            state.next();
            Vec::new()
        }
        Msg::BackClicked => {
            state.back();
            Vec::new()
        }
        Msg::HelpClicked => {
            state.help_clicked();
            Vec::new()
        }
        Msg::SupportLinkClicked => {
            state.support_link_clicked();
            Vec::new()
        }
        Msg::NoteInputChanged(text) => {
            state.set_note_draft(text);
            Vec::new()
        }
        Msg::NoteEdited { step, text } => {
            state.edit_note(step, &text);
            Vec::new()
        }
        Msg::FeedbackChanged(text) => {
            state.set_feedback(text);
            Vec::new()
        }
        Msg::SubmitClicked => match state.begin_submit() {
            Some((token, payload)) => vec![Effect::Submit { token, payload }],
            None => Vec::new(),
        },
        Msg::SubmissionCompleted { token, result } => {
            state.apply_submission(token, result);
            Vec::new()
        }
    };

    (state, effects)
}
