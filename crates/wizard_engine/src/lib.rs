//! Wizard engine: content loading, feedback submission and effect execution.
mod engine;
mod source;
mod submit;
mod types;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use source::{
    content_path, ContentSource, DirContentSource, FetchSettings, HttpContentSource,
    CATALOG_PATH,
};
pub use submit::{HttpSubmitter, Submitter, DEFAULT_SUBMIT_ENDPOINT};
pub use types::{EngineEvent, SourceError, SourceErrorKind, SubmitError};
