//! Core domain types for tic-tac-toe.

use crate::{BoardError, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A player's symbol on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Cross.
    X,
    /// Nought.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Parses a symbol choice, ignoring case and surrounding whitespace.
    pub fn parse_choice(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "X" => Some(Mark::X),
            "O" => Some(Mark::O),
            _ => None,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

/// What a renderer shows in one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayToken {
    /// A placed mark.
    Mark(Mark),
    /// The positional label (1-9) of an empty cell.
    Hint(usize),
    /// An empty cell after the game has ended.
    Blank,
}

impl std::fmt::Display for DisplayToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayToken::Mark(mark) => write!(f, "{}", mark),
            DisplayToken::Hint(n) => write!(f, "{}", n),
            DisplayToken::Blank => write!(f, " "),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
    /// Whether empty squares still show their positional label.
    labels_cleared: bool,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties every square and restores positional labels.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("Board reset");
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Checks whether the 1-based cell already holds a mark.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfRange`] if `position` is not in 1-9.
    pub fn is_occupied(&self, position: usize) -> Result<bool, BoardError> {
        let pos = Position::from_number(position).ok_or(BoardError::OutOfRange { position })?;
        Ok(!self.is_empty(pos))
    }

    /// Places a mark on an empty square.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::SquareOccupied`] if a mark is already there.
    /// Marks are never overwritten.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: Position, mark: Mark) -> Result<(), BoardError> {
        if !self.is_empty(pos) {
            return Err(BoardError::SquareOccupied { position: pos });
        }
        self.squares[pos.to_index()] = Square::Occupied(mark);
        debug!(position = %pos, %mark, "Mark placed");
        Ok(())
    }

    /// Checks if every square holds a mark.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Replaces the positional labels of the remaining empty squares with blanks.
    ///
    /// Called once when a game ends, before the final render.
    #[instrument(skip(self))]
    pub fn clear_labels(&mut self) {
        self.labels_cleared = true;
    }

    /// Returns the display tokens of all 9 squares, in row-major order.
    ///
    /// The iterator is lazy and can be cloned to walk the board again.
    pub fn display_tokens(&self) -> impl Iterator<Item = DisplayToken> + Clone + '_ {
        self.squares
            .iter()
            .enumerate()
            .map(|(i, square)| match square {
                Square::Occupied(mark) => DisplayToken::Mark(*mark),
                Square::Empty if self.labels_cleared => DisplayToken::Blank,
                Square::Empty => DisplayToken::Hint(i + 1),
            })
    }

    /// Captures the current display tokens for a renderer or a record.
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut tokens = [DisplayToken::Blank; 9];
        for (slot, token) in tokens.iter_mut().zip(self.display_tokens()) {
            *slot = token;
        }
        BoardSnapshot(tokens)
    }
}

/// Immutable view of the 9 display tokens of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot([DisplayToken; 9]);

impl BoardSnapshot {
    /// Creates a snapshot from raw tokens.
    pub fn new(tokens: [DisplayToken; 9]) -> Self {
        Self(tokens)
    }

    /// Returns the tokens in row-major order.
    pub fn tokens(&self) -> &[DisplayToken; 9] {
        &self.0
    }

    /// Iterates over the tokens.
    pub fn iter(&self) -> impl Iterator<Item = DisplayToken> + Clone + '_ {
        self.0.iter().copied()
    }

    /// Iterates over the three rows.
    pub fn rows(&self) -> impl Iterator<Item = &[DisplayToken]> {
        self.0.chunks(3)
    }

    /// Formats the board as three `a | b | c` rows separated by dividers.
    pub fn to_text(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n---------\n")
    }
}
