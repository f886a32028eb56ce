//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating board state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the session controller can compose them.

mod draw;
mod legality;
mod win;

pub use draw::{evaluate, is_tie, Outcome};
pub use legality::{is_legal_move, parse_move, InvalidMove};
pub use win::{winner, winning_line, winning_mark, LINES};
