//! Splitting engine moves into board squares.

use super::error::MoveParseError;
use super::square::Square;

/// Split a long algebraic move (`e2e4`, `e7e8q`) into origin and destination.
///
/// Characters 0-1 are the origin and 2-3 the destination. Anything after the
/// fourth character (a promotion piece) is ignored.
pub fn move_squares(mv: &str) -> Result<(Square, Square), MoveParseError> {
    if mv.len() < 4 {
        return Err(MoveParseError::InvalidLength {
            len: mv.chars().count(),
        });
    }

    let square_at = |range: std::ops::Range<usize>| -> Result<Square, MoveParseError> {
        let notation = mv.get(range).ok_or_else(|| MoveParseError::InvalidSquare {
            notation: mv.to_string(),
        })?;
        Ok(notation.parse::<Square>()?)
    };

    Ok((square_at(0..2)?, square_at(2..4)?))
}
