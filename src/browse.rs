//! Interactive terminal browser: reads one command per line and re-renders
//! the view after every accepted action.

use std::io::{BufRead, Write};

use pandemic_types::{
    Dataset, DisplayMode, EraFilter, OverlayClick, OverlayRegion, ViewAction, ViewState,
};
use thiserror::Error;
use tracing::debug;

use crate::render::render_view;

const HELP: &str = "\
commands:
  era <label>              filter cards by era (\"all\" for every era)
  open <id|name>           open the detail panel
  close                    close the detail panel
  click panel|backdrop     click inside the panel or on the dimmed backdrop
  tab list|timeline        switch the display mode
  help                     show this text
  quit                     leave
";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?} (try \"help\")")]
    Unknown(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("expected one of {expected}, got {got:?}")]
    BadArgument { expected: &'static str, got: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(ViewAction),
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
///
/// `open` resolves names to ids against `dataset`; anything it cannot resolve
/// is passed through as an id so the state machine reports it.
pub fn parse_command(dataset: &Dataset, line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((v, r)) => (v, r.trim()),
        None => (line, ""),
    };

    let cmd = match verb {
        "era" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("era"));
            }
            let filter = if rest == EraFilter::ALL_LABEL {
                EraFilter::All
            } else {
                EraFilter::Era(rest.to_string())
            };
            Command::Action(ViewAction::SelectEra(filter))
        }
        "open" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("open"));
            }
            let id = dataset
                .find(rest)
                .map(|r| r.id.clone())
                .unwrap_or_else(|| rest.to_string());
            Command::Action(ViewAction::SelectRecord(id))
        }
        "close" => Command::Action(ViewAction::CloseDetail),
        "click" => {
            let origin = match rest {
                "panel" => OverlayRegion::Panel,
                "backdrop" => OverlayRegion::Backdrop,
                _ => {
                    return Err(CommandError::BadArgument {
                        expected: "panel, backdrop",
                        got: rest.to_string(),
                    });
                }
            };
            Command::Action(ViewAction::OverlayClick(OverlayClick::from_origin(origin)))
        }
        "tab" => {
            let mode = match rest {
                "list" => DisplayMode::List,
                "timeline" => DisplayMode::Timeline,
                _ => {
                    return Err(CommandError::BadArgument {
                        expected: "list, timeline",
                        got: rest.to_string(),
                    });
                }
            };
            Command::Action(ViewAction::ShowMode(mode))
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(cmd))
}

/// Run the browser until `quit` or end of input and return the final state.
pub fn run<R: BufRead, W: Write>(
    dataset: &Dataset,
    input: R,
    out: &mut W,
    width: usize,
) -> std::io::Result<ViewState> {
    let mut state = ViewState::new();
    write!(out, "{}", render_view(dataset, &state, width))?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_command(dataset, &line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => write!(out, "{HELP}")?,
            Ok(Some(Command::Action(action))) => {
                debug!(?action, "browse action");
                match state.apply(dataset, action) {
                    Ok(()) => write!(out, "{}", render_view(dataset, &state, width))?,
                    Err(e) => writeln!(out, "error: {e}")?,
                }
            }
            Err(e) => writeln!(out, "error: {e}")?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pandemic_types::DetailState;

    fn builtin() -> Dataset {
        Dataset::builtin().unwrap()
    }

    fn action(d: &Dataset, line: &str) -> ViewAction {
        match parse_command(d, line) {
            Ok(Some(Command::Action(a))) => a,
            other => panic!("expected an action for {line:?}, got {other:?}"),
        }
    }

    // ── parse_command ────────────────────────────────────────────────

    #[test]
    fn test_parse_blank() {
        assert_eq!(parse_command(&builtin(), "   "), Ok(None));
    }

    #[test]
    fn test_parse_era_with_spaces() {
        let d = builtin();
        assert_eq!(
            action(&d, "era 5 век до н.э."),
            ViewAction::SelectEra(EraFilter::Era("5 век до н.э.".into()))
        );
        assert_eq!(action(&d, "era all"), ViewAction::SelectEra(EraFilter::All));
        assert_eq!(
            parse_command(&d, "era"),
            Err(CommandError::MissingArgument("era"))
        );
    }

    #[test]
    fn test_parse_open_by_name_or_id() {
        let d = builtin();
        assert_eq!(
            action(&d, "open COVID-19"),
            ViewAction::SelectRecord("18".into())
        );
        assert_eq!(action(&d, "open 5"), ViewAction::SelectRecord("5".into()));
        assert_eq!(
            action(&d, "open Чума Юстиниана"),
            ViewAction::SelectRecord("3".into())
        );
        assert_eq!(
            action(&d, "open nothing"),
            ViewAction::SelectRecord("nothing".into())
        );
    }

    #[test]
    fn test_parse_click_and_tab() {
        let d = builtin();
        assert_eq!(
            action(&d, "click panel"),
            ViewAction::OverlayClick(OverlayClick::from_origin(OverlayRegion::Panel))
        );
        assert_eq!(
            action(&d, "tab timeline"),
            ViewAction::ShowMode(DisplayMode::Timeline)
        );
        assert!(matches!(
            parse_command(&d, "click header"),
            Err(CommandError::BadArgument { .. })
        ));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command(&builtin(), "zoom in"),
            Err(CommandError::Unknown("zoom".into()))
        );
        assert_eq!(parse_command(&builtin(), "q"), Ok(Some(Command::Quit)));
    }

    // ── run ──────────────────────────────────────────────────────────

    #[test]
    fn test_run_script() {
        let d = builtin();
        let script = "era 14 век\nopen COVID-19\nclick panel\nera 3 век\ntab timeline\n";
        let mut out = Vec::new();
        let state = run(&d, script.as_bytes(), &mut out, 10).unwrap();

        assert_eq!(state.active_era(), &EraFilter::Era("14 век".into()));
        assert_eq!(state.detail(), &DetailState::Open("18".into()));
        assert_eq!(state.mode(), DisplayMode::Timeline);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("error: no record has era \"3 век\""));
        assert!(text.contains("┌─ COVID-19"));
    }

    #[test]
    fn test_run_backdrop_closes_and_quit_stops() {
        let d = builtin();
        let script = "open 1\nclick backdrop\nquit\nopen 2\n";
        let mut out = Vec::new();
        let state = run(&d, script.as_bytes(), &mut out, 10).unwrap();
        assert_eq!(state.detail(), &DetailState::Closed);
    }

    #[test]
    fn test_run_unknown_record_reports_error() {
        let d = builtin();
        let mut out = Vec::new();
        let state = run(&d, "open 99\n".as_bytes(), &mut out, 10).unwrap();
        assert_eq!(state, ViewState::new());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("error: no record with id \"99\""));
    }
}
