use std::sync::{mpsc, Arc};

use anyhow::{Context, Result};
use wizard_core::{Effect, Msg};
use wizard_engine::{
    ContentSource, DirContentSource, EngineEvent, EngineHandle, EventSink, HttpContentSource,
    HttpSubmitter,
};
use wizard_logging::{wizard_info, wizard_warn};

use super::app::AppEvent;
use super::config::{ContentLocation, Settings};

/// Executes core effects against the engine.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: &Settings, tx: mpsc::Sender<AppEvent>) -> Result<Self> {
        let source: Arc<dyn ContentSource> = match &settings.content {
            ContentLocation::Http(base) => Arc::new(
                HttpContentSource::new(base, settings.fetch.clone())
                    .context("configuring content source")?,
            ),
            ContentLocation::Dir(root) => {
                Arc::new(DirContentSource::new(root.clone(), &settings.fetch))
            }
        };
        let submitter = HttpSubmitter::new(&settings.submit_endpoint, &settings.fetch)
            .context("configuring feedback submitter")?;
        let engine = EngineHandle::new(
            source,
            Arc::new(submitter),
            Arc::new(MsgSink { tx }),
        )
        .context("starting engine thread")?;
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadCatalog => self.engine.load_catalog(),
                Effect::LoadContent { token, version } => {
                    wizard_info!("LoadContent token={} version={}", token.0, version);
                    self.engine.load_content(token, version);
                }
                Effect::ReplaceUrl { url } => {
                    // A terminal has no address bar; the view shows the page URL.
                    wizard_info!("ReplaceUrl {}", url);
                }
                Effect::Submit { token, payload } => {
                    wizard_info!(
                        "Submit token={} reason={} entries={}",
                        token.0,
                        payload.reason.as_str(),
                        payload.log.len()
                    );
                    self.engine.submit(token, payload);
                }
            }
        }
    }
}

struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = engine_event_to_msg(event);
        if self.tx.send(AppEvent::Engine(msg)).is_err() {
            wizard_warn!("App loop is gone; engine event dropped");
        }
    }
}

fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CatalogLoaded(result) => {
            Msg::CatalogLoaded(result.map_err(|err| err.to_string()))
        }
        EngineEvent::ContentLoaded {
            token,
            version,
            result,
        } => Msg::ContentLoaded {
            token,
            version,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::SubmissionCompleted { token, result } => Msg::SubmissionCompleted {
            token,
            result: result.map_err(|err| err.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_core::{LoadToken, SubmissionToken};
    use wizard_engine::SubmitError;

    #[test]
    fn engine_failures_become_messages() {
        let msg = engine_event_to_msg(EngineEvent::SubmissionCompleted {
            token: SubmissionToken(2),
            result: Err(SubmitError::HttpStatus(502)),
        });
        assert_eq!(
            msg,
            Msg::SubmissionCompleted {
                token: SubmissionToken(2),
                result: Err("http status 502".to_string()),
            }
        );

        let msg = engine_event_to_msg(EngineEvent::ContentLoaded {
            token: LoadToken(3),
            version: "v1".to_string(),
            result: Ok(Default::default()),
        });
        assert!(matches!(
            msg,
            Msg::ContentLoaded { token: LoadToken(3), result: Ok(_), .. }
        ));
    }
}
