use std::fmt;

use super::options::EngineOption;

/// A command line written to the engine's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Uci,
    SetOption(EngineOption),
    UciNewGame,
    IsReady,
    /// `position startpos [moves ...]`; the move list is stored trimmed.
    Position { moves: String },
    Go { movetime_ms: Option<u64> },
    Quit,
    Unknown(String),
}

impl EngineCommand {
    /// `position startpos moves <moves>` for a space-separated move list.
    #[must_use]
    pub fn position(moves: &str) -> Self {
        EngineCommand::Position {
            moves: moves.trim().to_string(),
        }
    }

    /// `go movetime <ms>`
    #[must_use]
    pub fn go_movetime(movetime_ms: u64) -> Self {
        EngineCommand::Go {
            movetime_ms: Some(movetime_ms),
        }
    }
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineCommand::Uci => write!(f, "uci"),
            EngineCommand::SetOption(option) => write!(f, "{option}"),
            EngineCommand::UciNewGame => write!(f, "ucinewgame"),
            EngineCommand::IsReady => write!(f, "isready"),
            EngineCommand::Position { moves } if moves.is_empty() => write!(f, "position startpos"),
            EngineCommand::Position { moves } => write!(f, "position startpos moves {moves}"),
            EngineCommand::Go {
                movetime_ms: Some(ms),
            } => write!(f, "go movetime {ms}"),
            EngineCommand::Go { movetime_ms: None } => write!(f, "go"),
            EngineCommand::Quit => write!(f, "quit"),
            EngineCommand::Unknown(line) => write!(f, "{line}"),
        }
    }
}

/// Parse a command line as the engine side sees it.
///
/// Returns `None` for blank lines. Only `position startpos` is understood;
/// anything else in a `position` line ends up as `Unknown`.
pub fn parse_engine_command(line: &str) -> Option<EngineCommand> {
    let trimmed = line.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    if parts.is_empty() {
        return None;
    }

    let cmd = match parts[0] {
        "uci" => EngineCommand::Uci,
        "isready" => EngineCommand::IsReady,
        "ucinewgame" => EngineCommand::UciNewGame,
        "quit" => EngineCommand::Quit,
        "setoption" => match parse_setoption(&parts[1..]) {
            Some(option) => EngineCommand::SetOption(option),
            None => EngineCommand::Unknown(trimmed.to_string()),
        },
        "position" => match parts.get(1) {
            Some(&"startpos") => {
                let moves = match parts.get(2) {
                    Some(&"moves") => parts[3..].join(" "),
                    _ => String::new(),
                };
                EngineCommand::Position { moves }
            }
            _ => EngineCommand::Unknown(trimmed.to_string()),
        },
        "go" => {
            let movetime_ms = parts
                .iter()
                .position(|p| *p == "movetime")
                .and_then(|i| parts.get(i + 1))
                .and_then(|v| v.parse::<u64>().ok());
            EngineCommand::Go { movetime_ms }
        }
        _ => EngineCommand::Unknown(trimmed.to_string()),
    };

    Some(cmd)
}

fn parse_setoption(parts: &[&str]) -> Option<EngineOption> {
    if parts.first() != Some(&"name") {
        return None;
    }
    let value_at = parts.iter().position(|p| *p == "value");
    let (name, value) = match value_at {
        Some(i) => (parts[1..i].join(" "), parts[i + 1..].join(" ")),
        None => (parts[1..].join(" "), String::new()),
    };
    if name.is_empty() {
        return None;
    }
    Some(EngineOption::new(name, value))
}
