//! Deterministic UCI engine used by the integration tests.
//!
//! Answers the handshake and replies to `go` with a fixed book move for the
//! current `position startpos moves ...`, or `0000` when out of book.
//!
//! With `SCRIPTED_ENGINE_IGNORE_QUIT` set it ignores `quit` and keeps running
//! after its input closes, so it only stops when killed.

use std::env;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use uci_adapter::uci::{parse_engine_command, EngineCommand, EngineReply};

const IGNORE_QUIT_VAR: &str = "SCRIPTED_ENGINE_IGNORE_QUIT";

const BOOK: &[(&str, &str)] = &[
    ("", "e2e4"),
    ("e2e4", "e7e5"),
    ("e2e4 e7e5", "g1f3"),
    ("e2e4 e7e5 g1f3", "b8c6"),
    ("d2d4", "d7d5"),
];

fn book_move(moves: &str) -> &'static str {
    BOOK.iter()
        .find(|(line, _)| *line == moves)
        .map_or("0000", |&(_, reply)| reply)
}

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut moves = String::new();
    let ignore_quit = env::var_os(IGNORE_QUIT_VAR).is_some();

    for line in stdin.lock().lines() {
        let Some(cmd) = parse_engine_command(&line?) else {
            continue;
        };

        let replies: Vec<EngineReply> = match cmd {
            EngineCommand::Uci => vec![
                EngineReply::IdName("Scripted Engine".to_string()),
                EngineReply::IdAuthor("uci_adapter tests".to_string()),
                EngineReply::UciOk,
            ],
            EngineCommand::IsReady => vec![EngineReply::ReadyOk],
            EngineCommand::UciNewGame => {
                moves.clear();
                Vec::new()
            }
            EngineCommand::Position { moves: played } => {
                moves = played;
                Vec::new()
            }
            EngineCommand::Go { .. } => vec![
                EngineReply::Info("depth 1 score cp 0".to_string()),
                EngineReply::BestMove {
                    mv: book_move(&moves).to_string(),
                    ponder: None,
                },
            ],
            EngineCommand::Quit if ignore_quit => Vec::new(),
            EngineCommand::Quit => break,
            EngineCommand::SetOption(_) | EngineCommand::Unknown(_) => {
                Vec::new()
            }
        };

        for reply in replies {
            writeln!(stdout, "{reply}")?;
        }
        stdout.flush()?;
    }

    if ignore_quit {
        loop {
            thread::park_timeout(Duration::from_secs(60));
        }
    }

    Ok(())
}
