//! Error types for the tic-tac-toe core.

use crate::Position;
use derive_more::{Display, Error, From};
use tracing::instrument;

/// Board access failure.
///
/// Both variants indicate a caller bug; move input from players is
/// screened by the rules engine before it ever reaches the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Position outside 1-9.
    #[display("Position {position} is out of range (must be 1-9)")]
    OutOfRange {
        /// The rejected 1-based position.
        position: usize,
    },
    /// Attempted to overwrite a placed mark.
    #[display("Square {position} is already occupied")]
    SquareOccupied {
        /// The occupied position.
        position: Position,
    },
}

/// Player registry lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RegistryError {
    /// No player with this name is registered in the current game.
    #[display("Unknown player: {name}")]
    UnknownPlayer {
        /// The name that was looked up.
        name: String,
    },
}

/// Console input failure.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ConsoleError {
    /// The user cancelled input (Ctrl-C or end of input).
    #[display("Input interrupted by user")]
    Interrupted,
    /// The input stream failed.
    #[display("Console I/O error: {message}")]
    Io {
        /// Underlying error description.
        message: String,
    },
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::Interrupted | std::io::ErrorKind::UnexpectedEof => {
                Self::Interrupted
            }
            _ => Self::Io {
                message: err.to_string(),
            },
        }
    }
}

/// Board renderer failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Render error: {} at {}:{}", message, file, line)]
pub struct RenderError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RenderError {
    /// Creates a new render error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for RenderError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("Terminal I/O error: {}", err))
    }
}

/// History sink failure with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{}", message)]
pub struct HistoryError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl HistoryError {
    /// Creates a new history error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for HistoryError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// What went wrong inside a game session.
#[derive(Debug, Clone, Display, From)]
pub enum SessionErrorKind {
    /// The user cancelled at a prompt.
    #[display("Game interrupted by user")]
    #[from(ignore)]
    Interrupted,
    /// Board contract violation.
    #[display("{_0}")]
    Board(BoardError),
    /// Registry lookup failure.
    #[display("{_0}")]
    Registry(RegistryError),
    /// Renderer failure.
    #[display("{_0}")]
    Render(RenderError),
    /// Console failure other than an interrupt.
    #[display("{_0}")]
    #[from(ignore)]
    Console(ConsoleError),
}

/// Game session error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct SessionError {
    /// Error category.
    pub kind: SessionErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SessionError {
    /// Creates a new session error with caller location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns true if the session ended because the user cancelled.
    pub fn is_interrupted(&self) -> bool {
        matches!(self.kind, SessionErrorKind::Interrupted)
    }
}

impl From<ConsoleError> for SessionError {
    #[track_caller]
    fn from(err: ConsoleError) -> Self {
        match err {
            ConsoleError::Interrupted => Self::new(SessionErrorKind::Interrupted),
            other => Self::new(SessionErrorKind::Console(other)),
        }
    }
}

impl From<BoardError> for SessionError {
    #[track_caller]
    fn from(err: BoardError) -> Self {
        Self::new(err.into())
    }
}

impl From<RegistryError> for SessionError {
    #[track_caller]
    fn from(err: RegistryError) -> Self {
        Self::new(err.into())
    }
}

impl From<RenderError> for SessionError {
    #[track_caller]
    fn from(err: RenderError) -> Self {
        Self::new(err.into())
    }
}
