use std::fmt;

/// A line read from the engine's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineReply {
    IdName(String),
    IdAuthor(String),
    UciOk,
    ReadyOk,
    BestMove { mv: String, ponder: Option<String> },
    /// Everything after `info `
    Info(String),
    /// Lines the adapter has no use for, kept verbatim
    Other(String),
}

impl fmt::Display for EngineReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineReply::IdName(name) => write!(f, "id name {name}"),
            EngineReply::IdAuthor(author) => write!(f, "id author {author}"),
            EngineReply::UciOk => write!(f, "uciok"),
            EngineReply::ReadyOk => write!(f, "readyok"),
            EngineReply::BestMove {
                mv,
                ponder: Some(ponder),
            } => write!(f, "bestmove {mv} ponder {ponder}"),
            EngineReply::BestMove { mv, ponder: None } => write!(f, "bestmove {mv}"),
            EngineReply::Info(text) => write!(f, "info {text}"),
            EngineReply::Other(line) => write!(f, "{line}"),
        }
    }
}

/// Classify one engine output line by its leading tokens.
///
/// Never fails: a line that does not match a known reply (including a bare
/// `bestmove` with no move) is returned as [`EngineReply::Other`].
#[must_use]
pub fn parse_engine_reply(line: &str) -> EngineReply {
    let mut tokens = line.split_whitespace();
    let other = || EngineReply::Other(line.to_string());

    match tokens.next() {
        Some("uciok") => EngineReply::UciOk,
        Some("readyok") => EngineReply::ReadyOk,
        Some("bestmove") => match tokens.next() {
            Some(mv) => {
                let ponder = match tokens.next() {
                    Some("ponder") => tokens.next().map(str::to_string),
                    _ => None,
                };
                EngineReply::BestMove {
                    mv: mv.to_string(),
                    ponder,
                }
            }
            None => other(),
        },
        Some("id") => {
            let field = tokens.next();
            let value = tokens.collect::<Vec<_>>().join(" ");
            match field {
                Some("name") => EngineReply::IdName(value),
                Some("author") => EngineReply::IdAuthor(value),
                _ => other(),
            }
        }
        Some("info") => EngineReply::Info(tokens.collect::<Vec<_>>().join(" ")),
        _ => other(),
    }
}
