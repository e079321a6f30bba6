use std::fmt::Write;

use wizard_core::{
    AppViewModel, HelpMedia, StepContentView, StepItemView, StepStatus, SummaryView,
};

/// Renders the whole screen as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", view.wizard_title);

    if !view.versions.is_empty() {
        let versions: Vec<String> = view
            .versions
            .iter()
            .map(|option| {
                if option.selected {
                    format!("[{}]", option.label)
                } else {
                    option.label.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "Versions: {}", versions.join(" | "));
    }
    if let Some(url) = &view.page_url {
        let _ = writeln!(out, "Page: {url}");
    }

    if let Some(error) = &view.load_error {
        let _ = writeln!(out, "\n{error}");
        return out;
    }
    if view.loading {
        let _ = writeln!(out, "\nLoading...");
    }

    if !view.steps.is_empty() {
        out.push('\n');
        for item in &view.steps {
            let _ = writeln!(out, "{}", step_line(item));
        }
    }

    if let Some(current) = &view.current {
        render_step(&mut out, current);
    }
    if let Some(summary) = &view.summary {
        render_summary(&mut out, summary);
    }
    out
}

fn step_line(item: &StepItemView) -> String {
    let marker = match item.status {
        StepStatus::Completed => "x",
        StepStatus::Current => ">",
        StepStatus::Upcoming => " ",
    };
    let suffix = if item.clickable { "" } else { " (locked)" };
    format!("[{marker}] {}{suffix}", item.label)
}

fn render_step(out: &mut String, step: &StepContentView) {
    let _ = writeln!(out, "\nStep {}: {}", step.number, step.title);
    let _ = writeln!(out, "{}", step.text);
    if let Some(link) = &step.link {
        let _ = writeln!(out, "{}: {}", link.label, link.url);
    }

    let help = &step.help;
    if let Some(label) = &help.toggle_label {
        let _ = writeln!(out, "[{label}]");
    }
    if help.panel_visible {
        match &help.media {
            Some(HelpMedia::Video { url }) => {
                let _ = writeln!(out, "  Video: {url}");
            }
            Some(HelpMedia::Embed { url }) => {
                let _ = writeln!(out, "  Embedded help: {url}");
            }
            None => {}
        }
    }
    if let Some(url) = &help.support_url {
        let _ = writeln!(out, "  Support: {url}");
    }

    if let Some(draft) = &step.note_draft {
        let _ = writeln!(out, "Note: {draft}");
    }
    let back = if step.back_enabled { "back | " } else { "" };
    let _ = writeln!(out, "({back}next)");
}

fn render_summary(out: &mut String, summary: &SummaryView) {
    let _ = writeln!(out, "\n{}", summary.title);
    let _ = writeln!(out, "{}", summary.description);
    let _ = writeln!(out, "Reason: {}", summary.reason.as_str());

    if !summary.rows.is_empty() {
        let _ = writeln!(out, "{:<28} {:<26} {:<28} Note", "Step", "Time", "Action");
        for row in &summary.rows {
            let _ = writeln!(
                out,
                "{:<28} {:<26} {:<28} {}",
                row.step_label, row.time, row.button, row.note
            );
        }
    }

    let _ = writeln!(out, "{}: {}", summary.feedback_label, summary.feedback);
    if let Some(status) = &summary.status_text {
        let _ = writeln!(out, "{status}");
    }
    if summary.submit_enabled {
        let _ = writeln!(out, "(submit)");
    }
    let _ = writeln!(out, "{} ({})", summary.disclaimer, summary.privacy_url);
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_core::{
        FinishReason, HelpView, LinkView, SubmissionStatus, SummaryRow, VersionOptionView,
    };

    fn step_view() -> StepContentView {
        StepContentView {
            number: 2,
            title: "Connect".to_string(),
            text: "Press connect".to_string(),
            link: Some(LinkView {
                url: "https://example.com/app".to_string(),
                label: "Open link".to_string(),
            }),
            help: HelpView {
                toggle_label: Some("Still stuck?".to_string()),
                panel_visible: true,
                media: Some(HelpMedia::Video {
                    url: "https://cdn.example.com/c.mp4".to_string(),
                }),
                support_url: None,
            },
            note_draft: Some("blinking".to_string()),
            back_enabled: true,
        }
    }

    #[test]
    fn renders_current_step() {
        let view = AppViewModel {
            wizard_title: "VPN setup".to_string(),
            versions: vec![VersionOptionView {
                id: "v2".to_string(),
                label: "v2 — New".to_string(),
                selected: true,
            }],
            steps: vec![
                StepItemView {
                    index: 0,
                    label: "1. Install".to_string(),
                    status: StepStatus::Completed,
                    clickable: true,
                },
                StepItemView {
                    index: 1,
                    label: "2. Connect".to_string(),
                    status: StepStatus::Current,
                    clickable: true,
                },
                StepItemView {
                    index: 2,
                    label: "3. Verify".to_string(),
                    status: StepStatus::Upcoming,
                    clickable: false,
                },
            ],
            current: Some(step_view()),
            ..AppViewModel::default()
        };

        let text = render(&view);
        assert!(text.starts_with("=== VPN setup ===\n"));
        assert!(text.contains("Versions: [v2 — New]"));
        assert!(text.contains("[x] 1. Install\n[>] 2. Connect\n[ ] 3. Verify (locked)"));
        assert!(text.contains("Step 2: Connect"));
        assert!(text.contains("Open link: https://example.com/app"));
        assert!(text.contains("[Still stuck?]"));
        assert!(text.contains("Video: https://cdn.example.com/c.mp4"));
        assert!(text.contains("Note: blinking"));
        assert!(text.contains("(back | next)"));
    }

    #[test]
    fn load_error_hides_everything_else() {
        let view = AppViewModel {
            wizard_title: "Onboarding".to_string(),
            load_error: Some("Could not load the wizard.".to_string()),
            current: Some(step_view()),
            ..AppViewModel::default()
        };
        let text = render(&view);
        assert!(text.contains("Could not load the wizard."));
        assert!(!text.contains("Step 2"));
    }

    #[test]
    fn renders_summary_with_status() {
        let view = AppViewModel {
            wizard_title: "Onboarding".to_string(),
            summary: Some(SummaryView {
                title: "Summary".to_string(),
                description: "Your steps".to_string(),
                reason: FinishReason::Completed,
                rows: vec![SummaryRow {
                    step_label: "1. Install".to_string(),
                    time: "2024-05-01--12-30-05:042".to_string(),
                    button: "Next".to_string(),
                    note: "done".to_string(),
                }],
                feedback_label: "Feedback".to_string(),
                feedback: "great".to_string(),
                status: SubmissionStatus::Failed,
                status_text: Some("Submission failed.".to_string()),
                submit_enabled: true,
                disclaimer: "Subject to our privacy policy.".to_string(),
                privacy_url: "https://example.com/privacy".to_string(),
            }),
            ..AppViewModel::default()
        };
        let text = render(&view);
        assert!(text.contains("Reason: completed"));
        assert!(text.contains("2024-05-01--12-30-05:042"));
        assert!(text.contains("Feedback: great"));
        assert!(text.contains("Submission failed."));
        assert!(text.contains("(submit)"));
        assert!(text.ends_with("Subject to our privacy policy. (https://example.com/privacy)\n"));
    }
}
