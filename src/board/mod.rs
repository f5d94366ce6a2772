//! Board collaborator contract.
//!
//! The adapter never owns a board representation. It only asks the UI
//! whose turn it is and hands it the squares of the engine's move. Move
//! legality is the board's business.
//!
//! # Example
//! ```
//! use uci_adapter::board::{BoardApi, Side, Square};
//!
//! struct Log {
//!     turn: Side,
//!     moves: Vec<(Square, Square)>,
//! }
//!
//! impl BoardApi for Log {
//!     fn turn_color(&self) -> Side {
//!         self.turn
//!     }
//!
//!     fn apply_move(&mut self, from: Square, to: Square) {
//!         self.moves.push((from, to));
//!     }
//! }
//! ```

mod error;
mod moves;
mod square;

pub use error::{MoveParseError, SquareError};
pub use moves::move_squares;
pub use square::{Side, Square};

/// What the adapter needs from the board UI.
pub trait BoardApi {
    /// Side whose turn it currently is.
    fn turn_color(&self) -> Side;

    /// Move the piece on `from` to `to`.
    fn apply_move(&mut self, from: Square, to: Square);
}

impl<B: BoardApi + ?Sized> BoardApi for Box<B> {
    fn turn_color(&self) -> Side {
        (**self).turn_color()
    }

    fn apply_move(&mut self, from: Square, to: Square) {
        (**self).apply_move(from, to);
    }
}
