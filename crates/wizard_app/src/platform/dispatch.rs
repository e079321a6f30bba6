use std::collections::VecDeque;

use url::Url;
use wizard_core::{update, AppState, AppViewModel, Effect, Msg};
use wizard_logging::wizard_debug;

/// Screens to draw and effects to run, in the order they were produced.
#[derive(Debug, Default)]
pub struct Dispatched {
    pub renders: Vec<AppViewModel>,
    pub effects: Vec<Effect>,
}

/// Owns the wizard state on the app thread.
///
/// User input that arrives before the first content load settles is held and
/// replayed afterwards. Engine work is counted so a closed input only ends the
/// session once every load and submission has reported back.
pub struct Dispatcher {
    state: AppState,
    in_flight: usize,
    held: VecDeque<Msg>,
    input_closed: bool,
}

impl Dispatcher {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            in_flight: 0,
            held: VecDeque::new(),
            input_closed: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn start(&mut self, page_url: Option<Url>) -> Dispatched {
        let mut out = Dispatched::default();
        self.apply(Msg::Init { page_url }, &mut out);
        out
    }

    pub fn input(&mut self, msg: Msg) -> Dispatched {
        let mut out = Dispatched::default();
        if self.is_ready() {
            self.apply(msg, &mut out);
        } else {
            wizard_debug!("Holding {:?} until content is loaded", msg);
            self.held.push_back(msg);
        }
        out
    }

    /// Applies a completion of earlier engine work.
    pub fn engine_event(&mut self, msg: Msg) -> Dispatched {
        self.in_flight = self.in_flight.saturating_sub(1);
        let mut out = Dispatched::default();
        self.apply(msg, &mut out);
        while self.is_ready() {
            let Some(msg) = self.held.pop_front() else {
                break;
            };
            self.apply(msg, &mut out);
        }
        out
    }

    pub fn close_input(&mut self) {
        self.input_closed = true;
    }

    pub fn is_done(&self) -> bool {
        self.input_closed && self.in_flight == 0
    }

    fn is_ready(&self) -> bool {
        self.state.config().is_some() || self.state.load_error().is_some()
    }

    fn apply(&mut self, msg: Msg, out: &mut Dispatched) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        if state.consume_dirty() {
            out.renders.push(view);
        }
        self.state = state;

        self.in_flight += effects
            .iter()
            .filter(|effect| !matches!(effect, Effect::ReplaceUrl { .. }))
            .count();
        out.effects.extend(effects);
    }
}
