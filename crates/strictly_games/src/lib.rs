//! Strictly Games - console tic-tac-toe
//!
//! Wires the game session from `strictly_tictactoe` to the real world:
//!
//! - **Console**: prompts on stdin/stdout
//! - **Render**: a colored 3x3 board drawn after every move
//! - **History**: finished games appended to a text file
//! - **App**: the play-again loop around single games
//! - **Config/CLI**: TOML config file with command-line overrides

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod config;
mod console;
mod history;
mod render;

pub use app::{print_history, run_terminal, show_history, App, InterruptNotice};
pub use cli::{Cli, Command};
pub use config::{ConfigError, GameConfig, DEFAULT_CONFIG_FILE};
pub use console::{LineConsole, StdConsole};
pub use history::{hold_history_writes, FileHistory};
pub use render::{
    restore_terminal, write_buffer, BoardView, TerminalRenderer, BOARD_HEIGHT, BOARD_WIDTH,
};
