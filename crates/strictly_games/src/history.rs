//! Append-only text file of finished games.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use strictly_tictactoe::{GameRecord, HistoryError, HistorySink};
use tracing::{debug, info, instrument};

/// Held for the whole of every append.
static APPEND_LOCK: Mutex<()> = Mutex::new(());

/// Waits for any append in progress and blocks new ones while held.
///
/// Take this before exiting the process from a signal handler so a
/// record is never cut short.
pub fn hold_history_writes() -> MutexGuard<'static, ()> {
    APPEND_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// History sink backed by a text file.
///
/// The parent directory is created on the first append.
#[derive(Debug, Clone)]
pub struct FileHistory {
    path: PathBuf,
}

impl FileHistory {
    /// Creates a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The history file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistorySink for FileHistory {
    #[instrument(skip(self, record), fields(path = %self.path.display()))]
    fn append(&mut self, record: &GameRecord) -> Result<String, HistoryError> {
        let _writing = hold_history_writes();
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(record.to_text().as_bytes())?;
        info!("Game appended to history");
        Ok(self.path.display().to_string())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn dump(&self) -> Result<Option<String>, HistoryError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("No history file");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use strictly_tictactoe::{Board, GameResult, Mark, Player, Position};

    fn record(result: GameResult) -> GameRecord {
        let mut board = Board::new();
        board.place(Position::TopLeft, Mark::X).unwrap();
        board.clear_labels();
        GameRecord::new(
            [Player::new("Ann", Mark::X), Player::new("Ben", Mark::O)],
            result,
            board.snapshot(),
            NaiveDate::from_ymd_opt(2024, 1, 2)
                .and_then(|d| d.and_hms_opt(3, 4, 5))
                .unwrap(),
        )
    }

    #[test]
    fn test_missing_file_is_no_history() {
        let dir = tempfile::tempdir().unwrap();
        let history = FileHistory::new(dir.path().join("none.txt"));
        assert_eq!(history.dump().unwrap(), None);
    }

    #[test]
    fn test_append_creates_directory_and_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game_history").join("log.txt");
        let mut history = FileHistory::new(&path);

        let first = record(GameResult::Tie);
        let second = record(GameResult::Win(Player::new("Ann", Mark::X)));
        let location = history.append(&first).unwrap();
        history.append(&second).unwrap();

        assert_eq!(location, path.display().to_string());
        let dump = history.dump().unwrap().unwrap();
        assert_eq!(dump, format!("{}{}", first.to_text(), second.to_text()));
        assert!(dump.contains("Game played on: 2024-01-02 03:04:05"));
    }

    #[test]
    fn test_append_waits_for_held_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("held.txt");
        let mut history = FileHistory::new(&path);
        let entry = record(GameResult::Tie);
        let expected = entry.to_text();

        let guard = hold_history_writes();
        let writer = std::thread::spawn(move || history.append(&entry));
        std::thread::sleep(std::time::Duration::from_millis(50));
        assert!(!path.exists());

        drop(guard);
        writer.join().unwrap().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn test_unwritable_location_is_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let mut history = FileHistory::new(blocker.join("log.txt"));
        assert!(history.append(&record(GameResult::Tie)).is_err());
    }
}
