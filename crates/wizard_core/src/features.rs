/// Behaviour switches for the single wizard state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// Record clicks in the interaction log.
    pub interaction_log: bool,
    /// Only steps up to the furthest one reached are clickable.
    pub high_water_mark: bool,
    /// Clicking a step on the summary returns to navigation.
    pub exit_summary: bool,
    /// Free-text notes per step.
    pub notes: bool,
    /// Two-stage help that ends in a support escalation.
    pub help_escalation: bool,
}

impl Default for Features {
    fn default() -> Self {
        Variant::default().features()
    }
}

/// Named presets of [`Features`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    Basic,
    HighWaterMark,
    #[default]
    ChatArchive,
    NoteCapture,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Basic,
        Variant::HighWaterMark,
        Variant::ChatArchive,
        Variant::NoteCapture,
    ];

    pub fn features(self) -> Features {
        match self {
            Variant::Basic => Features {
                interaction_log: false,
                high_water_mark: false,
                exit_summary: false,
                notes: false,
                help_escalation: false,
            },
            Variant::HighWaterMark => Features {
                interaction_log: false,
                high_water_mark: true,
                exit_summary: false,
                notes: false,
                help_escalation: true,
            },
            Variant::ChatArchive => Features {
                interaction_log: true,
                high_water_mark: false,
                exit_summary: true,
                notes: true,
                help_escalation: true,
            },
            Variant::NoteCapture => Features {
                interaction_log: true,
                high_water_mark: false,
                exit_summary: false,
                notes: true,
                help_escalation: true,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Basic => "basic",
            Variant::HighWaterMark => "high-water-mark",
            Variant::ChatArchive => "chat-archive",
            Variant::NoteCapture => "note-capture",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|variant| variant.name().eq_ignore_ascii_case(raw))
    }
}
