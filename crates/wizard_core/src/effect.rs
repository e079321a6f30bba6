use crate::{LoadToken, SubmissionPayload, SubmissionToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadCatalog,
    LoadContent { token: LoadToken, version: String },
    /// Replace the page URL without adding a history entry.
    ReplaceUrl { url: String },
    Submit {
        token: SubmissionToken,
        payload: SubmissionPayload,
    },
}
