//! Line commands typed at the wizard prompt.

use wizard_core::Msg;

pub const USAGE: &str = "commands: next | back | step <n> | help | support | note <text> | \
edit-note <n> <text> | version <id> | feedback <text> | submit | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    Quit,
}

/// Parses one input line. Step numbers are 1-based as shown on screen.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let msg = match word.to_ascii_lowercase().as_str() {
        "next" | "n" => Msg::NextClicked,
        "back" | "b" => Msg::BackClicked,
        "step" => Msg::StepClicked(step_index(rest)?),
        "help" | "h" => Msg::HelpClicked,
        "support" => Msg::SupportLinkClicked,
        "note" => Msg::NoteInputChanged(rest.to_string()),
        "edit-note" => {
            let (number, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Msg::NoteEdited {
                step: step_index(number)?,
                text: text.trim().to_string(),
            }
        }
        "version" | "v" if !rest.is_empty() => Msg::VersionSelected(rest.to_string()),
        "feedback" => Msg::FeedbackChanged(rest.to_string()),
        "submit" => Msg::SubmitClicked,
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        _ => return Err(format!("unknown command {line:?}")),
    };
    Ok(Command::Msg(msg))
}

fn step_index(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(number) if number > 0 => Ok(number - 1),
        _ => Err(format!("expected a step number, got {raw:?}")),
    }
}
