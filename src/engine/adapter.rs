//! The engine adapter: handshake sequencing and move relay.

use log::{debug, error, trace, warn};

use super::config::AdapterConfig;
use super::protocol::ProtocolPhase;
use crate::board::{move_squares, BoardApi};
use crate::uci::{parse_engine_reply, EngineCommand, EngineReply};
use crate::worker::{EngineWorker, WorkerError, WorkerListener};

/// Relays moves between a board and a UCI engine worker.
///
/// Construction sends `uci`. From then on the adapter is driven by the
/// worker's output (see [`WorkerListener`]): `uciok` applies the configured
/// options and asks `isready`, `readyok` starts a warm-up search, and every
/// new `bestmove` is stored and, on the engine's turn, played on the board.
pub struct EngineAdapter<W, B> {
    worker: W,
    board: B,
    config: AdapterConfig,
    phase: ProtocolPhase,
    best_move: Option<String>,
    engine_name: Option<String>,
    engine_author: Option<String>,
}

impl<W: EngineWorker, B: BoardApi> EngineAdapter<W, B> {
    /// Create the adapter and open the handshake.
    pub fn new(worker: W, board: B, config: AdapterConfig) -> Self {
        let mut adapter = EngineAdapter {
            worker,
            board,
            config,
            phase: ProtocolPhase::Start,
            best_move: None,
            engine_name: None,
            engine_author: None,
        };
        adapter.enter(ProtocolPhase::AwaitingUciOk);
        adapter
    }

    /// Ask the engine to search the game given as moves from the start position.
    ///
    /// Returns immediately; the answer arrives later as a `bestmove` message.
    /// The move list is not validated.
    pub fn send_position(&mut self, moves: &str) {
        self.post(&EngineCommand::position(moves));
        self.post(&EngineCommand::go_movetime(self.config.search_movetime_ms));
    }

    /// React to one reply from the engine.
    pub fn handle_reply(&mut self, reply: EngineReply) {
        if let Some(next) = self.phase.advance(&reply) {
            self.enter(next);
            return;
        }

        match reply {
            EngineReply::BestMove { mv, .. } if self.phase.accepts_moves() => self.on_best_move(mv),
            EngineReply::IdName(name) => self.engine_name = Some(name),
            EngineReply::IdAuthor(author) => self.engine_author = Some(author),
            EngineReply::Info(text) => trace!("engine info: {text}"),
            other => trace!("ignoring '{}' while {}", other, self.phase),
        }
    }

    fn enter(&mut self, phase: ProtocolPhase) {
        debug!("engine protocol {} -> {}", self.phase, phase);
        self.phase = phase;

        match phase {
            ProtocolPhase::Start => {}
            ProtocolPhase::AwaitingUciOk => self.post(&EngineCommand::Uci),
            ProtocolPhase::AwaitingReady => {
                let options = self.config.options.clone();
                for option in options {
                    self.post(&EngineCommand::SetOption(option));
                }
                self.post(&EngineCommand::UciNewGame);
                self.post(&EngineCommand::IsReady);
            }
            ProtocolPhase::Idle => {
                self.post(&EngineCommand::go_movetime(self.config.warmup_movetime_ms));
            }
        }
    }

    fn on_best_move(&mut self, mv: String) {
        if self.best_move.as_deref() == Some(mv.as_str()) {
            trace!("duplicate bestmove {mv}");
            return;
        }

        let squares = move_squares(&mv);
        self.best_move = Some(mv);

        let turn = self.board.turn_color();
        if turn != self.config.engine_side {
            debug!("bestmove stored, {turn} to move");
            return;
        }

        match squares {
            Ok((from, to)) => {
                debug!("playing {from}{to} for {turn}");
                self.board.apply_move(from, to);
            }
            Err(e) => warn!("cannot play engine move {:?}: {}", self.best_move, e),
        }
    }

    fn post(&mut self, command: &EngineCommand) {
        let line = command.to_string();
        debug!("> {line}");
        if let Err(e) = self.worker.post_message(&line) {
            error!("failed to send '{line}' to engine: {e}");
        }
    }
}

impl<W, B> EngineAdapter<W, B> {
    /// Last move the engine chose, if any.
    #[must_use]
    pub fn best_move(&self) -> Option<&str> {
        self.best_move.as_deref()
    }

    #[must_use]
    pub fn phase(&self) -> ProtocolPhase {
        self.phase
    }

    /// Engine name from `id name`, once the handshake reported it.
    #[must_use]
    pub fn engine_name(&self) -> Option<&str> {
        self.engine_name.as_deref()
    }

    #[must_use]
    pub fn engine_author(&self) -> Option<&str> {
        self.engine_author.as_deref()
    }

    #[must_use]
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    #[must_use]
    pub fn worker(&self) -> &W {
        &self.worker
    }

    pub fn worker_mut(&mut self) -> &mut W {
        &mut self.worker
    }
}

impl<W: EngineWorker, B: BoardApi> WorkerListener for EngineAdapter<W, B> {
    fn on_message(&mut self, line: &str) {
        trace!("< {line}");
        self.handle_reply(parse_engine_reply(line));
    }

    fn on_error(&mut self, error: &WorkerError) {
        error!("engine worker error: {error}");
    }

    fn on_message_error(&mut self, raw: &[u8]) {
        error!(
            "undecodable engine message ({} bytes): {}",
            raw.len(),
            String::from_utf8_lossy(raw)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Side, Square};

    #[derive(Default)]
    struct RecordingWorker {
        sent: Vec<String>,
    }

    impl EngineWorker for RecordingWorker {
        fn post_message(&mut self, line: &str) -> Result<(), WorkerError> {
            self.sent.push(line.to_string());
            Ok(())
        }
    }

    struct BrokenWorker;

    impl EngineWorker for BrokenWorker {
        fn post_message(&mut self, _line: &str) -> Result<(), WorkerError> {
            Err(WorkerError::Terminated)
        }
    }

    struct FakeBoard {
        turn: Side,
        moves: Vec<(Square, Square)>,
    }

    impl FakeBoard {
        fn new(turn: Side) -> Self {
            FakeBoard {
                turn,
                moves: Vec::new(),
            }
        }
    }

    impl BoardApi for FakeBoard {
        fn turn_color(&self) -> Side {
            self.turn
        }

        fn apply_move(&mut self, from: Square, to: Square) {
            self.moves.push((from, to));
        }
    }

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn ready_adapter(turn: Side) -> EngineAdapter<RecordingWorker, FakeBoard> {
        let mut adapter = EngineAdapter::new(
            RecordingWorker::default(),
            FakeBoard::new(turn),
            AdapterConfig::default(),
        );
        adapter.on_message("uciok");
        adapter.on_message("readyok");
        adapter.worker_mut().sent.clear();
        adapter
    }

    #[test]
    fn construction_sends_uci() {
        let adapter = EngineAdapter::new(
            RecordingWorker::default(),
            FakeBoard::new(Side::White),
            AdapterConfig::default(),
        );
        assert_eq!(adapter.worker().sent, vec!["uci"]);
        assert_eq!(adapter.phase(), ProtocolPhase::AwaitingUciOk);
    }

    #[test]
    fn uciok_sets_options_then_new_game_then_isready() {
        let mut adapter = EngineAdapter::new(
            RecordingWorker::default(),
            FakeBoard::new(Side::White),
            AdapterConfig::default(),
        );
        adapter.on_message("uciok");
        assert_eq!(
            adapter.worker().sent,
            vec![
                "uci",
                "setoption name UCI_AnalyseMode value true",
                "setoption name Analysis Contempt value Off",
                "ucinewgame",
                "isready",
            ]
        );
        assert_eq!(adapter.phase(), ProtocolPhase::AwaitingReady);
    }

    #[test]
    fn readyok_starts_warmup_search_once() {
        let mut adapter = EngineAdapter::new(
            RecordingWorker::default(),
            FakeBoard::new(Side::White),
            AdapterConfig::default(),
        );
        adapter.on_message("uciok");
        adapter.on_message("readyok");
        adapter.on_message("readyok");
        let warmups = adapter
            .worker()
            .sent
            .iter()
            .filter(|l| *l == "go movetime 1500")
            .count();
        assert_eq!(warmups, 1);
        assert_eq!(adapter.phase(), ProtocolPhase::Idle);
    }

    #[test]
    fn bestmove_on_engine_turn_moves_board() {
        let mut adapter = ready_adapter(Side::Black);
        adapter.on_message("bestmove e7e5 ponder g1f3");
        assert_eq!(adapter.board().moves, vec![(sq("e7"), sq("e5"))]);
        assert_eq!(adapter.best_move(), Some("e7e5"));
    }

    #[test]
    fn duplicate_bestmove_is_suppressed() {
        let mut adapter = ready_adapter(Side::Black);
        adapter.on_message("bestmove e7e5");
        adapter.on_message("bestmove e7e5");
        assert_eq!(adapter.board().moves.len(), 1);
    }

    #[test]
    fn bestmove_off_turn_is_stored_only() {
        let mut adapter = ready_adapter(Side::White);
        adapter.on_message("bestmove e2e4");
        assert!(adapter.board().moves.is_empty());
        assert_eq!(adapter.best_move(), Some("e2e4"));

        // same move on black's turn is still a duplicate
        adapter.board_mut().turn = Side::Black;
        adapter.on_message("bestmove e2e4");
        assert!(adapter.board().moves.is_empty());
    }

    #[test]
    fn promotion_suffix_is_dropped() {
        let mut adapter = ready_adapter(Side::Black);
        adapter.on_message("bestmove a2a1q");
        assert_eq!(adapter.board().moves, vec![(sq("a2"), sq("a1"))]);
    }

    #[test]
    fn unplayable_bestmove_is_stored_without_board_call() {
        let mut adapter = ready_adapter(Side::Black);
        adapter.on_message("bestmove (none)");
        assert!(adapter.board().moves.is_empty());
        assert_eq!(adapter.best_move(), Some("(none)"));
    }

    #[test]
    fn bestmove_before_handshake_is_ignored() {
        let mut adapter = EngineAdapter::new(
            RecordingWorker::default(),
            FakeBoard::new(Side::Black),
            AdapterConfig::default(),
        );
        adapter.on_message("bestmove e7e5");
        assert!(adapter.board().moves.is_empty());
        assert_eq!(adapter.best_move(), None);
    }

    #[test]
    fn send_position_posts_position_then_go() {
        let mut adapter = ready_adapter(Side::White);
        adapter.send_position("e2e4 e7e5");
        assert_eq!(
            adapter.worker().sent,
            vec!["position startpos moves e2e4 e7e5", "go movetime 2000"]
        );
    }

    #[test]
    fn id_lines_are_recorded() {
        let mut adapter = EngineAdapter::new(
            RecordingWorker::default(),
            FakeBoard::new(Side::White),
            AdapterConfig::default(),
        );
        adapter.on_message("id name Stockfish 16");
        adapter.on_message("id author the Stockfish developers");
        assert_eq!(adapter.engine_name(), Some("Stockfish 16"));
        assert_eq!(adapter.engine_author(), Some("the Stockfish developers"));
    }

    #[test]
    fn worker_errors_leave_state_alone() {
        let mut adapter = ready_adapter(Side::Black);
        adapter.on_message("bestmove e7e5");
        adapter.on_error(&WorkerError::Disconnected);
        adapter.on_message_error(&[0xff, 0x00]);
        assert_eq!(adapter.best_move(), Some("e7e5"));
        assert_eq!(adapter.phase(), ProtocolPhase::Idle);
        assert_eq!(adapter.board().moves.len(), 1);
    }

    #[test]
    fn failed_posts_are_swallowed() {
        let mut adapter = EngineAdapter::new(
            BrokenWorker,
            FakeBoard::new(Side::Black),
            AdapterConfig::default(),
        );
        adapter.send_position("e2e4");
        adapter.on_message("uciok");
        assert_eq!(adapter.phase(), ProtocolPhase::AwaitingReady);
    }

    #[test]
    fn engine_side_comes_from_config() {
        let mut adapter = EngineAdapter::new(
            RecordingWorker::default(),
            FakeBoard::new(Side::White),
            AdapterConfig::default().with_engine_side(Side::White),
        );
        adapter.on_message("uciok");
        adapter.on_message("readyok");
        adapter.on_message("bestmove e2e4");
        assert_eq!(adapter.board().moves, vec![(sq("e2"), sq("e4"))]);
    }
}
