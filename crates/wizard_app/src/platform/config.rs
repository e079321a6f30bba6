//! Application settings: an optional RON file overlaid by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use url::Url;
use wizard_core::Variant;
use wizard_engine::{FetchSettings, DEFAULT_SUBMIT_ENDPOINT};
use wizard_logging::LogDestination;

use super::cli::Cli;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub content: String,
    pub page_url: Option<String>,
    pub variant: String,
    pub submit_endpoint: String,
    pub log: String,
    pub log_file: PathBuf,
    pub debug: bool,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            content: ".".to_string(),
            page_url: None,
            variant: Variant::default().name().to_string(),
            submit_endpoint: DEFAULT_SUBMIT_ENDPOINT.to_string(),
            log: "file".to_string(),
            log_file: PathBuf::from("./wizard.log"),
            debug: false,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
        }
    }
}

/// Where step documents come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLocation {
    Http(String),
    Dir(PathBuf),
}

/// Validated settings the app runs with.
#[derive(Debug, Clone)]
pub struct Settings {
    pub content: ContentLocation,
    pub page_url: Option<Url>,
    pub variant: Variant,
    pub submit_endpoint: String,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub fetch: FetchSettings,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        ron::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Command-line values win over file values.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(content) = &cli.content {
            self.content = content.clone();
        }
        if let Some(url) = &cli.url {
            self.page_url = Some(url.clone());
        }
        if let Some(variant) = &cli.variant {
            self.variant = variant.clone();
        }
        if let Some(endpoint) = &cli.submit_endpoint {
            self.submit_endpoint = endpoint.clone();
        }
        if let Some(log) = &cli.log {
            self.log = log.clone();
        }
        self.debug |= cli.debug;
        self
    }

    pub fn into_settings(self) -> Result<Settings> {
        let variant = Variant::parse(&self.variant)
            .ok_or_else(|| anyhow!("unknown variant {:?}", self.variant))?;
        let log_destination = LogDestination::parse(&self.log)
            .ok_or_else(|| anyhow!("unknown log destination {:?}", self.log))?;
        let page_url = self
            .page_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .context("parsing page url")?;
        Url::parse(&self.submit_endpoint).context("parsing submit endpoint")?;

        Ok(Settings {
            content: content_location(&self.content),
            page_url,
            variant,
            submit_endpoint: self.submit_endpoint,
            log_destination,
            log_level: if self.debug {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            log_file: self.log_file,
            fetch: FetchSettings {
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                max_bytes: self.max_bytes,
            },
        })
    }
}

pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let file_config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    file_config.merge_cli(cli).into_settings()
}

fn content_location(raw: &str) -> ContentLocation {
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        ContentLocation::Http(raw.to_string())
    } else {
        ContentLocation::Dir(PathBuf::from(raw))
    }
}
