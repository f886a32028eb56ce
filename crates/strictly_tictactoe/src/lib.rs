//! Pure tic-tac-toe game logic for a two-player console game.
//!
//! # Architecture
//!
//! - **Board**: the 9-cell grid, [`Square`] per cell, display tokens for renderers
//! - **Registry**: two named players and their marks
//! - **Rules**: move legality, win lines, tie detection
//! - **Session**: the per-game state machine driving the above
//!
//! The session talks to the outside world only through the [`Console`],
//! [`BoardRenderer`], [`HistorySink`] and [`RandomSource`] traits, so a
//! whole game can be scripted in tests.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod console;
mod error;
mod position;
mod random;
mod record;
mod registry;
mod render;
pub mod rules;
mod session;
mod types;

pub use console::{ask_yes_no, Console, ScriptedConsole};
pub use error::{
    BoardError, ConsoleError, HistoryError, RegistryError, RenderError, SessionError,
    SessionErrorKind,
};
pub use position::Position;
pub use random::{RandomSource, RngSource, ScriptedRandom};
pub use record::{GameRecord, GameResult, HistorySink, MemoryHistory, TIMESTAMP_FORMAT};
pub use registry::{
    distinct_names, normalize_name, Player, PlayerRegistry, Seat, DEFAULT_PLAYER1,
    DEFAULT_PLAYER2,
};
pub use render::{BoardRenderer, PaintMode, RecordingRenderer};
pub use session::{GameSession, Phase};
pub use types::{Board, BoardSnapshot, DisplayToken, Mark, Square};
