use std::fmt;

use thiserror::Error;
use wizard_core::{LoadToken, SubmissionToken, VersionCatalog, WizardConfig};

/// Completion of one engine command. Every command produces exactly one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CatalogLoaded(Result<VersionCatalog, SourceError>),
    ContentLoaded {
        token: LoadToken,
        version: String,
        result: Result<WizardConfig, SourceError>,
    },
    SubmissionCompleted {
        token: SubmissionToken,
        result: Result<(), SubmitError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct SourceError {
    pub kind: SourceErrorKind,
    pub message: String,
}

impl SourceError {
    pub(crate) fn new(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceErrorKind {
    InvalidUrl,
    InvalidVersion,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    Io,
    Malformed,
}

impl fmt::Display for SourceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceErrorKind::InvalidUrl => write!(f, "invalid url"),
            SourceErrorKind::InvalidVersion => write!(f, "invalid version id"),
            SourceErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            SourceErrorKind::Timeout => write!(f, "timeout"),
            SourceErrorKind::TooLarge { max_bytes, actual } => {
                write!(f, "document too large (max {max_bytes}, actual {actual:?})")
            }
            SourceErrorKind::Network => write!(f, "network error"),
            SourceErrorKind::Io => write!(f, "io error"),
            SourceErrorKind::Malformed => write!(f, "malformed document"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("could not encode payload: {0}")]
    Encode(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}
