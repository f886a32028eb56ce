//! Board renderer capability.

use crate::{BoardSnapshot, RenderError};
use serde::{Deserialize, Serialize};

/// Whether a render starts a new board view or refreshes the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaintMode {
    /// First render of a game.
    FirstPaint,
    /// Render after a move or at game end.
    Update,
}

/// A live view of the board.
pub trait BoardRenderer {
    /// Draws the 9-token snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the view cannot be drawn.
    fn render(&mut self, snapshot: &BoardSnapshot, mode: PaintMode) -> Result<(), RenderError>;

    /// Releases the view. Further calls are no-ops.
    fn close(&mut self);
}

/// Renderer that keeps every frame it was asked to draw.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: Vec<(BoardSnapshot, PaintMode)>,
    closed: usize,
}

impl RecordingRenderer {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames drawn so far.
    pub fn frames(&self) -> &[(BoardSnapshot, PaintMode)] {
        &self.frames
    }

    /// The most recent frame.
    pub fn last_frame(&self) -> Option<&BoardSnapshot> {
        self.frames.last().map(|(snapshot, _)| snapshot)
    }

    /// How many times `close` was called.
    pub fn close_count(&self) -> usize {
        self.closed
    }
}

impl BoardRenderer for RecordingRenderer {
    fn render(&mut self, snapshot: &BoardSnapshot, mode: PaintMode) -> Result<(), RenderError> {
        self.frames.push((*snapshot, mode));
        Ok(())
    }

    fn close(&mut self) {
        self.closed += 1;
    }
}
