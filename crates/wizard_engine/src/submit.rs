use reqwest::header::CONTENT_TYPE;
use url::Url;
use wizard_core::SubmissionPayload;
use wizard_logging::wizard_info;

use crate::{FetchSettings, SubmitError};

pub const DEFAULT_SUBMIT_ENDPOINT: &str = "https://example.com/api/onboarding-feedback";

/// Sends a finished session to the feedback collector.
///
/// One call is one request: implementations must not retry.
#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmitError>;
}

#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpSubmitter {
    pub fn new(endpoint: &str, settings: &FetchSettings) -> Result<Self, SubmitError> {
        let endpoint =
            Url::parse(endpoint).map_err(|err| SubmitError::InvalidEndpoint(err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SubmitError::Network(err.to_string()))?;
        Ok(Self { endpoint, client })
    }
}

#[async_trait::async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmitError> {
        let body =
            serde_json::to_vec(payload).map_err(|err| SubmitError::Encode(err.to_string()))?;
        wizard_info!(
            "POST {} ({} log entries, {} bytes)",
            self.endpoint,
            payload.log.len(),
            body.len()
        );

        let response = self
            .client
            .post(self.endpoint.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    SubmitError::Timeout
                } else {
                    SubmitError::Network(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }
}
