use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use wizard_core::{LoadToken, SubmissionPayload, SubmissionToken};
use wizard_logging::{wizard_debug, wizard_warn};

use crate::{ContentSource, EngineEvent, Submitter};

/// Receiver of engine completions.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    LoadCatalog,
    LoadContent { token: LoadToken, version: String },
    Submit {
        token: SubmissionToken,
        payload: SubmissionPayload,
    },
}

/// Runs content loads and submissions on a background tokio runtime.
///
/// Commands are fire-and-forget; each one reports back through the sink
/// exactly once. Concurrent loads are not cancelled.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        source: Arc<dyn ContentSource>,
        submitter: Arc<dyn Submitter>,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("wizard-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let source = source.clone();
                    let submitter = submitter.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(source.as_ref(), submitter.as_ref(), command, sink.as_ref())
                            .await;
                    });
                }
                wizard_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn load_catalog(&self) {
        self.send(EngineCommand::LoadCatalog);
    }

    pub fn load_content(&self, token: LoadToken, version: impl Into<String>) {
        self.send(EngineCommand::LoadContent {
            token,
            version: version.into(),
        });
    }

    pub fn submit(&self, token: SubmissionToken, payload: SubmissionPayload) {
        self.send(EngineCommand::Submit { token, payload });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            wizard_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    source: &dyn ContentSource,
    submitter: &dyn Submitter,
    command: EngineCommand,
    sink: &dyn EventSink,
) {
    let event = match command {
        EngineCommand::LoadCatalog => EngineEvent::CatalogLoaded(source.fetch_catalog().await),
        EngineCommand::LoadContent { token, version } => {
            let result = source.fetch_content(&version).await;
            EngineEvent::ContentLoaded {
                token,
                version,
                result,
            }
        }
        EngineCommand::Submit { token, payload } => EngineEvent::SubmissionCompleted {
            token,
            result: submitter.submit(&payload).await,
        },
    };
    sink.emit(event);
}
