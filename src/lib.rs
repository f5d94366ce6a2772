//! Relay between a chess board UI and a UCI engine process.
//!
//! The adapter starts an engine, performs the `uci` / `isready` handshake,
//! sends the game as a move list whenever the board asks, and plays the
//! engine's `bestmove` back on the board when it is the engine's turn.
//!
//! # Example
//! ```no_run
//! use uci_adapter::board::{BoardApi, Side, Square};
//! use uci_adapter::engine::{AdapterConfig, EngineSession};
//!
//! struct Board {
//!     turn: Side,
//! }
//!
//! impl BoardApi for Board {
//!     fn turn_color(&self) -> Side {
//!         self.turn
//!     }
//!
//!     fn apply_move(&mut self, from: Square, to: Square) {
//!         println!("engine plays {from}{to}");
//!         self.turn = self.turn.opponent();
//!     }
//! }
//!
//! let session = EngineSession::start(AdapterConfig::default(), Board { turn: Side::White })?;
//! session.with_board(|board| board.turn = Side::Black);
//! session.send_position("e2e4");
//! # Ok::<(), uci_adapter::worker::WorkerError>(())
//! ```

pub mod board;
pub mod engine;
pub mod uci;
pub mod worker;

pub use board::{BoardApi, Side, Square};
pub use engine::{AdapterConfig, EngineAdapter, EngineSession, ProtocolPhase};
pub use worker::{EngineBundle, EngineWorker, WorkerError, WorkerEvent, WorkerListener};
