//! Line commands for the terminal front end, and how their results print.

use focusflow_core::error::CoreError;
use focusflow_core::project::{CreateProject, NewProject, Project};
use focusflow_core::session::{Session, SessionKind};
use focusflow_core::timer::{format_clock, parse_duration_input, TimerState};

use crate::runner::TimerCommand;

pub const HELP: &str = "\
commands:
  start | pause | toggle | reset
  configure <work-seconds> <break-seconds>
  status
  history
  projects
  project <name> <beginDate> <deadline>
  help | quit";

pub const NO_SESSIONS: &str = "No sessions found";
pub const NO_PROJECTS: &str = "No projects found";
pub const SESSIONS_FAILED: &str = "Failed to load sessions";
pub const PROJECTS_FAILED: &str = "Failed to load projects";

/// A parsed input line.
#[derive(Debug)]
pub enum Command {
    /// Forwarded to the runner as-is.
    Timer(TimerCommand),
    Status,
    History,
    Projects,
    CreateProject(NewProject),
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "start" => Command::Timer(TimerCommand::Start),
        "pause" => Command::Timer(TimerCommand::Pause),
        "toggle" => Command::Timer(TimerCommand::Toggle),
        "reset" => Command::Timer(TimerCommand::Reset),
        "configure" => match args {
            [work, brk] => Command::Timer(TimerCommand::Configure {
                work_seconds: parse_duration_input(work),
                break_seconds: parse_duration_input(brk),
            }),
            _ => return Err(CommandError::Usage("configure <work-seconds> <break-seconds>")),
        },
        "status" => Command::Status,
        "history" => Command::History,
        "projects" => Command::Projects,
        "project" => {
            // The last two words are the dates; everything before is the name.
            if args.len() < 3 {
                return Err(CommandError::Usage("project <name> <beginDate> <deadline>"));
            }
            let (name_words, dates) = args.split_at(args.len() - 2);
            let input = CreateProject {
                name: Some(name_words.join(" ")),
                begin_date: Some(dates[0].to_string()),
                deadline: Some(dates[1].to_string()),
            };
            Command::CreateProject(input.validate_into()?)
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(name.to_string())),
    };

    Ok(Some(command))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn phase_title(kind: SessionKind) -> &'static str {
    match kind {
        SessionKind::Work => "Focus Time",
        SessionKind::Break => "Break Time",
    }
}

const BAR_WIDTH: usize = 20;

/// Bar that fills as the current phase elapses.
fn progress_bar(state: &TimerState) -> String {
    let elapsed = ((1.0 - state.progress()) * BAR_WIDTH as f64).round() as usize;
    let elapsed = elapsed.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(elapsed), "-".repeat(BAR_WIDTH - elapsed))
}

/// One-line timer status, e.g.
/// `Focus Time  12:30  [##########----------]  running`.
pub fn render_status(state: &TimerState) -> String {
    let run_state = if state.is_running() {
        "running"
    } else if state.is_paused() {
        "paused"
    } else {
        "idle"
    };
    format!(
        "{}  {}  {}  {run_state}",
        phase_title(state.phase()),
        format_clock(state.remaining_seconds()),
        progress_bar(state)
    )
}

/// Session history, one line per record, or the empty-state message.
pub fn render_sessions(sessions: &[Session]) -> String {
    if sessions.is_empty() {
        return NO_SESSIONS.to_string();
    }
    sessions
        .iter()
        .map(|s| {
            let title = match s.kind {
                SessionKind::Work => "Work Session",
                SessionKind::Break => "Break Session",
            };
            format!(
                "{title:<14} {}  {} minutes",
                s.date.instant().format("%Y-%m-%d %H:%M"),
                s.duration / 60
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Project list, one line per record, or the empty-state message.
pub fn render_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return NO_PROJECTS.to_string();
    }
    projects
        .iter()
        .map(|p| {
            format!(
                "{}  start {}  deadline {}",
                p.name,
                p.begin_date.instant().format("%Y-%m-%d"),
                p.deadline.instant().format("%Y-%m-%d")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
