use std::sync::Once;

use url::Url;
use wizard_core::{
    update, AppState, Effect, LoadToken, Msg, Step, Variant, VersionCatalog, WizardConfig,
    LOAD_FAILED_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(wizard_logging::initialize_for_tests);
}

fn catalog() -> VersionCatalog {
    serde_json::from_str(r#"{"default":"v2","versions":{"v1":"Old","v2":"New"}}"#).unwrap()
}

fn config(version: &str, step_count: usize) -> WizardConfig {
    WizardConfig {
        title: format!("Wizard {version}"),
        version: Some(version.to_string()),
        steps: (0..step_count)
            .map(|i| Step {
                title: format!("{version} step {}", i + 1),
                ..Step::default()
            })
            .collect(),
    }
}

fn start(page_url: &str) -> (AppState, LoadToken, String) {
    let page_url = Url::parse(page_url).unwrap();
    let (state, effects) = update(
        AppState::with_variant(Variant::ChatArchive),
        Msg::Init {
            page_url: Some(page_url),
        },
    );
    assert_eq!(effects, vec![Effect::LoadCatalog]);
    let (state, effects) = update(state, Msg::CatalogLoaded(Ok(catalog())));
    match effects.as_slice() {
        [Effect::LoadContent { token, version }] => (state, *token, version.clone()),
        other => panic!("unexpected effects {other:?}"),
    }
}

fn content_loaded(
    state: AppState,
    token: LoadToken,
    version: &str,
    step_count: usize,
) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::ContentLoaded {
            token,
            version: version.to_string(),
            result: Ok(config(version, step_count)),
        },
    )
}

#[test]
fn default_version_is_loaded_and_written_back() {
    init_logging();
    let (state, token, version) = start("http://localhost:8080/?lang=en");
    assert_eq!(version, "v2");

    let (state, effects) = content_loaded(state, token, "v2", 3);
    assert_eq!(
        effects,
        vec![Effect::ReplaceUrl {
            url: "http://localhost:8080/?lang=en&v=v2".to_string()
        }]
    );
    assert_eq!(state.current_version(), Some("v2"));
    let view = state.view();
    assert_eq!(view.wizard_title, "Wizard v2");
    assert_eq!(view.steps.len(), 3);
    assert_eq!(
        view.versions.iter().map(|v| v.label.as_str()).collect::<Vec<_>>(),
        vec!["v1 — Old", "v2 — New"]
    );
    assert!(view.versions[1].selected);
}

#[test]
fn explicit_valid_request_leaves_url_alone() {
    init_logging();
    let (state, token, version) = start("http://localhost:8080/?v=v1");
    assert_eq!(version, "v1");

    let (state, effects) = content_loaded(state, token, "v1", 2);
    assert!(effects.is_empty());
    assert_eq!(
        state.page_url().map(Url::as_str),
        Some("http://localhost:8080/?v=v1")
    );
}

#[test]
fn unknown_request_falls_back_and_rewrites_url() {
    init_logging();
    let (state, token, version) = start("http://localhost:8080/?v=v9");
    assert_eq!(version, "v2");

    let (_, effects) = content_loaded(state, token, "v2", 2);
    assert_eq!(
        effects,
        vec![Effect::ReplaceUrl {
            url: "http://localhost:8080/?v=v2".to_string()
        }]
    );
}

#[test]
fn stale_completion_is_discarded() {
    init_logging();
    let (state, token, _) = start("http://localhost/");
    let (state, _) = content_loaded(state, token, "v2", 3);

    let (state, effects) = update(state, Msg::VersionSelected("v1".to_string()));
    let [Effect::LoadContent { token: first, .. }] = effects.as_slice() else {
        panic!("expected a load");
    };
    let first = *first;
    let (state, effects) = update(state, Msg::VersionSelected("v2".to_string()));
    let [Effect::LoadContent { token: second, .. }] = effects.as_slice() else {
        panic!("expected a load");
    };
    let second = *second;
    assert!(second > first);

    let (state, _) = content_loaded(state, second, "v2", 4);
    let (state, effects) = content_loaded(state, first, "v1", 2);
    assert!(effects.is_empty());
    assert_eq!(state.current_version(), Some("v2"));
    assert_eq!(state.navigator().unwrap().step_count(), 4);
}

#[test]
fn version_change_resets_navigation_but_keeps_log() {
    init_logging();
    let (state, token, _) = start("http://localhost/");
    let (state, _) = content_loaded(state, token, "v2", 3);
    let (state, _) = update(state, Msg::NoteInputChanged("note".to_string()));
    let (state, _) = update(state, Msg::NextClicked);
    assert_eq!(state.notes()[0], "note");

    let (state, effects) = update(state, Msg::VersionSelected("v1".to_string()));
    let [Effect::LoadContent { token, .. }] = effects.as_slice() else {
        panic!("expected a load");
    };
    let (state, effects) = content_loaded(state, *token, "v1", 2);
    assert_eq!(
        effects,
        vec![Effect::ReplaceUrl {
            url: "http://localhost/?v=v1".to_string()
        }]
    );

    assert_eq!(state.navigator().unwrap().current_index(), 0);
    assert_eq!(state.notes(), [String::new(), String::new()]);
    let buttons: Vec<_> = state
        .log()
        .entries()
        .iter()
        .map(|entry| (entry.step, entry.button.as_str()))
        .collect();
    assert_eq!(buttons, vec![(1, "Next"), (2, "Version changed to v1")]);
}

#[test]
fn version_change_is_ignored_when_finished_or_unknown() {
    init_logging();
    let (state, token, _) = start("http://localhost/");
    let (state, _) = content_loaded(state, token, "v2", 1);

    let (state, effects) = update(state, Msg::VersionSelected("nope".to_string()));
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::VersionSelected(String::new()));
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::NextClicked);
    assert!(state.is_finished());
    let (state, effects) = update(state, Msg::VersionSelected("v1".to_string()));
    assert!(effects.is_empty());
    assert_eq!(state.current_version(), Some("v2"));
}

#[test]
fn catalog_failure_replaces_step_list_with_message() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Init { page_url: None });
    let (state, effects) = update(state, Msg::CatalogLoaded(Err("HTTP 404".to_string())));
    assert!(effects.is_empty());

    let view = state.view();
    assert_eq!(view.load_error.as_deref(), Some(LOAD_FAILED_MESSAGE));
    assert!(view.steps.is_empty());
    assert!(view.current.is_none());
}

#[test]
fn empty_catalog_is_a_load_failure() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Init { page_url: None });
    let (state, effects) = update(
        state,
        Msg::CatalogLoaded(Ok(VersionCatalog::default())),
    );
    assert!(effects.is_empty());
    assert_eq!(state.load_error(), Some(LOAD_FAILED_MESSAGE));
}

#[test]
fn content_failure_and_empty_steps_are_load_failures() {
    init_logging();
    let (state, token, _) = start("http://localhost/");
    let (state, effects) = update(
        state,
        Msg::ContentLoaded {
            token,
            version: "v2".to_string(),
            result: Err("connection refused".to_string()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.load_error(), Some(LOAD_FAILED_MESSAGE));

    let (state, token, _) = start("http://localhost/");
    let (state, _) = content_loaded(state, token, "v2", 0);
    assert_eq!(state.load_error(), Some(LOAD_FAILED_MESSAGE));
    assert!(state.navigator().is_none());
}
