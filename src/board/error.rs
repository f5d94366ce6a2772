//! Error types for board-facing conversions.

use std::fmt;

/// Error type for square notation failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Not a two-character `a1`..`h8` square
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for splitting a long algebraic move into squares
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string is shorter than four characters
    InvalidLength { len: usize },
    /// One of the two squares is not valid notation
    InvalidSquare { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be at least 4 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

impl From<SquareError> for MoveParseError {
    fn from(e: SquareError) -> Self {
        match e {
            SquareError::InvalidNotation { notation } => MoveParseError::InvalidSquare { notation },
        }
    }
}
