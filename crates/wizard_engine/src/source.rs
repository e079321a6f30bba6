use std::path::PathBuf;
use std::time::Duration;

use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use url::Url;
use wizard_core::{VersionCatalog, WizardConfig};
use wizard_logging::{wizard_debug, wizard_info};

use crate::{SourceError, SourceErrorKind};

/// Location of the version catalog, relative to the content root.
pub const CATALOG_PATH: &str = "content/versions.json";

/// Location of one version's step document, relative to the content root.
pub fn content_path(version: &str) -> String {
    format!("content/{version}.json")
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
        }
    }
}

/// Provider of the catalog and step documents.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<VersionCatalog, SourceError>;

    async fn fetch_content(&self, version: &str) -> Result<WizardConfig, SourceError>;
}

/// Fetches documents relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    base: Url,
    settings: FetchSettings,
    client: reqwest::Client,
}

impl HttpContentSource {
    pub fn new(base: &str, settings: FetchSettings) -> Result<Self, SourceError> {
        let mut base = Url::parse(base)
            .map_err(|err| SourceError::new(SourceErrorKind::InvalidUrl, err.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SourceError::new(SourceErrorKind::Network, err.to_string()))?;

        Ok(Self {
            base,
            settings,
            client,
        })
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        let url = self
            .base
            .join(path)
            .map_err(|err| SourceError::new(SourceErrorKind::InvalidUrl, err.to_string()))?;
        wizard_info!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::new(
                SourceErrorKind::HttpStatus(status.as_u16()),
                format!("failed to load {path}: {status}"),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        wizard_debug!("Fetched {} bytes for {}", bytes.len(), path);
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_catalog(&self) -> Result<VersionCatalog, SourceError> {
        let bytes = self.get(CATALOG_PATH).await?;
        parse_document(&bytes, CATALOG_PATH)
    }

    async fn fetch_content(&self, version: &str) -> Result<WizardConfig, SourceError> {
        check_version_id(version)?;
        let path = content_path(version);
        let bytes = self.get(&path).await?;
        parse_document(&bytes, &path)
    }
}

/// Reads documents from a directory laid out like the served site.
#[derive(Debug, Clone)]
pub struct DirContentSource {
    root: PathBuf,
    max_bytes: u64,
}

impl DirContentSource {
    pub fn new(root: impl Into<PathBuf>, settings: &FetchSettings) -> Self {
        Self {
            root: root.into(),
            max_bytes: settings.max_bytes,
        }
    }

    async fn read(&self, relative: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.root.join(relative);
        wizard_info!("Reading {:?}", path);
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|err| SourceError::new(SourceErrorKind::Io, format!("{path:?}: {err}")))?;
        if metadata.len() > self.max_bytes {
            return Err(too_large(self.max_bytes, metadata.len()));
        }
        tokio::fs::read(&path)
            .await
            .map_err(|err| SourceError::new(SourceErrorKind::Io, format!("{path:?}: {err}")))
    }
}

#[async_trait::async_trait]
impl ContentSource for DirContentSource {
    async fn fetch_catalog(&self) -> Result<VersionCatalog, SourceError> {
        let bytes = self.read(CATALOG_PATH).await?;
        parse_document(&bytes, CATALOG_PATH)
    }

    async fn fetch_content(&self, version: &str) -> Result<WizardConfig, SourceError> {
        check_version_id(version)?;
        let path = content_path(version);
        let bytes = self.read(&path).await?;
        parse_document(&bytes, &path)
    }
}

/// Version ids become path segments; they must not escape the content directory.
fn check_version_id(version: &str) -> Result<(), SourceError> {
    let invalid =
        version.is_empty() || version.starts_with('.') || version.contains(['/', '\\']);
    if invalid {
        return Err(SourceError::new(
            SourceErrorKind::InvalidVersion,
            format!("refusing to load version {version:?}"),
        ));
    }
    Ok(())
}

fn parse_document<T: DeserializeOwned>(bytes: &[u8], path: &str) -> Result<T, SourceError> {
    serde_json::from_slice(bytes)
        .map_err(|err| SourceError::new(SourceErrorKind::Malformed, format!("{path}: {err}")))
}

fn too_large(max_bytes: u64, actual: u64) -> SourceError {
    SourceError::new(
        SourceErrorKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "document too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        return SourceError::new(SourceErrorKind::Timeout, err.to_string());
    }
    SourceError::new(SourceErrorKind::Network, err.to_string())
}
