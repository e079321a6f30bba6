use serde::{Deserialize, Serialize};

/// Title shown when the step document does not carry one.
pub const DEFAULT_WIZARD_TITLE: &str = "Onboarding";
/// Label shown for a step link without an explicit label.
pub const DEFAULT_LINK_LABEL: &str = "Open link";

/// One version of the wizard, as described by `content/<version>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WizardConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl WizardConfig {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_WIZARD_TITLE
        } else {
            &self.title
        }
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: Option<StepLink>,
    #[serde(default)]
    pub help: Option<StepHelp>,
}

impl Step {
    /// The link to render, if it has a usable URL.
    pub fn visible_link(&self) -> Option<(&str, &str)> {
        let link = self.link.as_ref()?;
        if link.url.is_empty() {
            return None;
        }
        let label = link
            .label
            .as_deref()
            .filter(|label| !label.is_empty())
            .unwrap_or(DEFAULT_LINK_LABEL);
        Some((link.url.as_str(), label))
    }

    pub fn support_url(&self) -> Option<&str> {
        self.help
            .as_ref()
            .and_then(|help| help.support_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepLink {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepHelp {
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub support_url: Option<String>,
}
