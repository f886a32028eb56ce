//! Move legality for raw player input.

use crate::{Board, Position};
use derive_more::Display;
use tracing::{debug, instrument};

/// Why a typed move was refused. Always recovered by asking again.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InvalidMove {
    /// Input is not an integer.
    #[display("{_0:?} is not a number")]
    NotANumber(String),
    /// Integer outside 1-9.
    #[display("{_0} is not between 1 and 9")]
    OutOfRange(i64),
    /// Square already holds a mark.
    #[display("square {_0} is already taken")]
    Occupied(Position),
}

impl std::error::Error for InvalidMove {}

/// Parses typed input into an empty board position.
///
/// # Errors
///
/// Returns [`InvalidMove`] for non-numeric, out-of-range or occupied input.
#[instrument(skip(board))]
pub fn parse_move(board: &Board, input: &str) -> Result<Position, InvalidMove> {
    let number: i64 = input
        .trim()
        .parse()
        .map_err(|_| InvalidMove::NotANumber(input.trim().to_string()))?;
    let pos = usize::try_from(number)
        .ok()
        .and_then(Position::from_number)
        .ok_or(InvalidMove::OutOfRange(number))?;
    if !board.is_empty(pos) {
        debug!(position = %pos, "Square already occupied");
        return Err(InvalidMove::Occupied(pos));
    }
    Ok(pos)
}

/// True iff `input` names an empty square in 1-9.
pub fn is_legal_move(board: &Board, input: &str) -> bool {
    parse_move(board, input).is_ok()
}
