//! Tie detection and terminal evaluation.

use super::win::winning_mark;
use crate::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Outcome of a board that reached a terminal condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A mark completed a line.
    Winner(Mark),
    /// Board full, no line completed.
    Tie,
}

/// A full board with no winning line.
#[instrument(skip(board))]
pub fn is_tie(board: &Board) -> bool {
    board.is_full() && winning_mark(board).is_none()
}

/// Checks the terminal condition: a winner takes priority over a full board.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Option<Outcome> {
    if let Some(mark) = winning_mark(board) {
        Some(Outcome::Winner(mark))
    } else if board.is_full() {
        Some(Outcome::Tie)
    } else {
        None
    }
}
