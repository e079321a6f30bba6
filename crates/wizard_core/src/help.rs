use crate::content::StepHelp;

pub const HELP_INITIAL_LABEL: &str = "I encountered a problem and need help";
pub const HELP_CRITICAL_LABEL: &str =
    "I still have a critical problem and need to book a support call";
/// Label used by the plain toggle when escalation is disabled.
pub const HELP_TOGGLE_LABEL: &str = "Help";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HelpStage {
    #[default]
    Initial,
    Critical,
}

/// Media embedded in the help panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpMedia {
    Video { url: String },
    Embed { url: String },
}

impl HelpMedia {
    pub fn from_url(url: &str) -> Option<Self> {
        if url.is_empty() {
            return None;
        }
        let url = url.to_string();
        if is_video_url(&url) {
            Some(Self::Video { url })
        } else {
            Some(Self::Embed { url })
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Video { url } | Self::Embed { url } => url,
        }
    }
}

/// `.mp4` at the end of the URL or right before its query string.
pub fn is_video_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.match_indices(".mp4").any(|(at, needle)| {
        let rest = &lower[at + needle.len()..];
        rest.is_empty() || rest.starts_with('?')
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpOutcome {
    Revealed,
    Hidden,
    /// Help cannot resolve the problem; the session should finish.
    Escalate,
    Ignored,
}

/// Help flow for the current step. Reset on every step change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HelpTracker {
    stage: HelpStage,
    panel_visible: bool,
    media: Option<HelpMedia>,
}

impl HelpTracker {
    pub fn stage(&self) -> HelpStage {
        self.stage
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn media(&self) -> Option<&HelpMedia> {
        self.media.as_ref()
    }

    pub fn label(&self, escalation: bool) -> &'static str {
        if !escalation {
            return HELP_TOGGLE_LABEL;
        }
        match self.stage {
            HelpStage::Initial => HELP_INITIAL_LABEL,
            HelpStage::Critical => HELP_CRITICAL_LABEL,
        }
    }

    pub fn click(&mut self, help: Option<&StepHelp>, escalation: bool) -> HelpOutcome {
        let Some(help) = help else {
            return if escalation {
                HelpOutcome::Escalate
            } else {
                HelpOutcome::Ignored
            };
        };

        if escalation {
            if self.stage == HelpStage::Critical {
                return HelpOutcome::Escalate;
            }
            self.stage = HelpStage::Critical;
            self.reveal(help);
            return HelpOutcome::Revealed;
        }

        if self.panel_visible {
            self.panel_visible = false;
            HelpOutcome::Hidden
        } else {
            self.reveal(help);
            HelpOutcome::Revealed
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn reveal(&mut self, help: &StepHelp) {
        self.panel_visible = true;
        if self.media.is_none() {
            self.media = help.video.as_deref().and_then(HelpMedia::from_url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn help_with_video(video: &str) -> StepHelp {
        StepHelp {
            video: Some(video.to_string()),
            support_url: None,
        }
    }

    #[test]
    fn mp4_suffix_detected_before_query() {
        assert!(is_video_url("https://cdn.example.com/intro.mp4"));
        assert!(is_video_url("https://cdn.example.com/INTRO.MP4?t=3"));
        assert!(!is_video_url("https://cdn.example.com/intro.mp4.html"));
        assert!(!is_video_url("https://www.youtube.com/embed/xyz"));
    }

    #[test]
    fn escalating_flow_reveals_then_escalates() {
        let help = help_with_video("https://cdn.example.com/intro.mp4");
        let mut tracker = HelpTracker::default();

        assert_eq!(tracker.click(Some(&help), true), HelpOutcome::Revealed);
        assert_eq!(tracker.stage(), HelpStage::Critical);
        assert!(tracker.panel_visible());
        assert_eq!(
            tracker.media(),
            Some(&HelpMedia::Video {
                url: "https://cdn.example.com/intro.mp4".into()
            })
        );
        assert_eq!(tracker.label(true), HELP_CRITICAL_LABEL);

        assert_eq!(tracker.click(Some(&help), true), HelpOutcome::Escalate);
    }

    #[test]
    fn missing_help_escalates_immediately() {
        let mut tracker = HelpTracker::default();
        assert_eq!(tracker.click(None, true), HelpOutcome::Escalate);
        assert_eq!(tracker.click(None, false), HelpOutcome::Ignored);
    }

    #[test]
    fn plain_toggle_builds_media_once() {
        let help = help_with_video("https://www.youtube.com/embed/xyz");
        let mut tracker = HelpTracker::default();

        assert_eq!(tracker.click(Some(&help), false), HelpOutcome::Revealed);
        assert_eq!(tracker.click(Some(&help), false), HelpOutcome::Hidden);
        assert_eq!(tracker.click(Some(&help), false), HelpOutcome::Revealed);
        assert_eq!(tracker.stage(), HelpStage::Initial);
        assert!(matches!(tracker.media(), Some(HelpMedia::Embed { .. })));

        tracker.reset();
        assert_eq!(tracker, HelpTracker::default());
    }
}
