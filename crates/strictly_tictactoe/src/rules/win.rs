//! Win detection logic for tic-tac-toe.

use crate::{Board, Mark, Player, PlayerRegistry, Position, Square};
use tracing::instrument;

/// The eight winning lines, in evaluation order: rows, columns, diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Returns the first completed line and the mark that completed it.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<([Position; 3], Mark)> {
    LINES.into_iter().find_map(|line @ [a, b, c]| match board.get(a) {
        Square::Occupied(mark)
            if board.get(b) == Square::Occupied(mark) && board.get(c) == Square::Occupied(mark) =>
        {
            Some((line, mark))
        }
        _ => None,
    })
}

/// Returns the mark holding three in a row, if any.
pub fn winning_mark(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(_, mark)| mark)
}

/// Returns the player holding three in a row, if any.
#[instrument(skip(board, registry))]
pub fn winner<'a>(board: &Board, registry: &'a PlayerRegistry) -> Option<&'a Player> {
    winning_mark(board).map(|mark| registry.player_with(mark))
}
