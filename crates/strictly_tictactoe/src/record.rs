//! Game results and the record handed to the history sink.

use crate::{BoardSnapshot, HistoryError, Player};
use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Timestamp format used in history records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width of the `=` rule that ends each record.
const RECORD_RULE_WIDTH: usize = 50;

/// How a game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// A player completed a line.
    Win(Player),
    /// Board filled with no line.
    Tie,
    /// The game stopped before a terminal condition. Never persisted.
    Abandoned,
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Win(player) => write!(f, "{} wins!", player.name()),
            GameResult::Tie => write!(f, "Tie"),
            GameResult::Abandoned => write!(f, "Abandoned"),
        }
    }
}

/// A finished game, as stored by the history sink.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameRecord {
    /// Players in seat order.
    players: [Player; 2],
    /// Final result.
    result: GameResult,
    /// Board after labels were cleared.
    board: BoardSnapshot,
    /// Local time the game finished.
    played_at: NaiveDateTime,
}

impl GameRecord {
    /// Creates a record.
    pub fn new(
        players: [Player; 2],
        result: GameResult,
        board: BoardSnapshot,
        played_at: NaiveDateTime,
    ) -> Self {
        Self {
            players,
            result,
            board,
            played_at,
        }
    }

    /// Formats the record as an append-only history entry.
    #[instrument(skip(self))]
    pub fn to_text(&self) -> String {
        let [p1, p2] = &self.players;
        format!(
            "Game played on: {}\nPlayers: {} vs {}\nResult: {}\nFinal Board:\n{}\n\n{}\n\n",
            self.played_at.format(TIMESTAMP_FORMAT),
            p1,
            p2,
            self.result,
            self.board.to_text(),
            "=".repeat(RECORD_RULE_WIDTH),
        )
    }
}

/// Append-only store of finished games.
pub trait HistorySink {
    /// Appends one record, returning a description of where it went.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the store is unavailable or unwritable.
    fn append(&mut self, record: &GameRecord) -> Result<String, HistoryError>;

    /// Returns the full store content verbatim, or `None` if no store exists.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the store exists but cannot be read.
    fn dump(&self) -> Result<Option<String>, HistoryError>;
}

/// In-memory history sink.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    content: Option<String>,
    unavailable: bool,
}

impl MemoryHistory {
    /// Creates an empty, working sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that rejects every operation.
    pub fn unavailable() -> Self {
        Self {
            content: None,
            unavailable: true,
        }
    }
}

impl HistorySink for MemoryHistory {
    fn append(&mut self, record: &GameRecord) -> Result<String, HistoryError> {
        if self.unavailable {
            return Err(HistoryError::new("history store unavailable"));
        }
        self.content
            .get_or_insert_with(String::new)
            .push_str(&record.to_text());
        Ok("memory".to_string())
    }

    fn dump(&self) -> Result<Option<String>, HistoryError> {
        if self.unavailable {
            return Err(HistoryError::new("history store unavailable"));
        }
        Ok(self.content.clone())
    }
}
