//! Terminal board renderer.
//!
//! The board is laid out as a ratatui widget into an off-screen buffer,
//! which is then written to the terminal line by line with crossterm
//! colors. The prompt loop keeps owning the terminal between renders.

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Print, SetAttribute, SetForegroundColor},
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::io::Write;
use std::time::Duration;
use strictly_tictactoe::{BoardRenderer, BoardSnapshot, DisplayToken, Mark, PaintMode, RenderError};
use tracing::{debug, instrument};

const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;
const GRID_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const GRID_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;

/// Width of a rendered board including its frame.
pub const BOARD_WIDTH: u16 = GRID_WIDTH + 2;
/// Height of a rendered board including its frame.
pub const BOARD_HEIGHT: u16 = GRID_HEIGHT + 2;

/// Stateless widget drawing a 3x3 board from a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    snapshot: &'a BoardSnapshot,
    mode: PaintMode,
}

impl<'a> BoardView<'a> {
    /// Creates a view of `snapshot`.
    pub fn new(snapshot: &'a BoardSnapshot, mode: PaintMode) -> Self {
        Self { snapshot, mode }
    }

    /// Renders the view into a fresh buffer of exactly board size.
    pub fn to_buffer(self) -> Buffer {
        let area = Rect::new(0, 0, BOARD_WIDTH, BOARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        self.render(area, &mut buf);
        buf
    }
}

/// Text and style of one cell.
fn token_style(token: DisplayToken) -> (String, Style) {
    match token {
        DisplayToken::Mark(Mark::X) => (
            "X".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        DisplayToken::Mark(Mark::O) => (
            "O".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        DisplayToken::Hint(n) => (n.to_string(), Style::default().fg(Color::DarkGray)),
        DisplayToken::Blank => (" ".to_string(), Style::default()),
    }
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        if self.mode == PaintMode::FirstPaint {
            block = block
                .title(Line::from(Span::styled(
                    "TIC-TAC-TOE",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )))
                .title_alignment(Alignment::Center);
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::vertical([
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
        ])
        .split(inner);
        let grid_style = Style::default().fg(Color::DarkGray);

        for (row_idx, tokens) in self.snapshot.rows().enumerate() {
            let row_area = rows[row_idx * 2];
            let cols = Layout::horizontal([
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
            ])
            .split(row_area);

            for (col_idx, token) in tokens.iter().enumerate() {
                let (symbol, style) = token_style(*token);
                let cell = Paragraph::new(vec![
                    Line::default(),
                    Line::from(Span::styled(symbol, style)),
                ])
                .alignment(Alignment::Center);
                cell.render(cols[col_idx * 2], buf);
            }
            for sep in [cols[1], cols[3]] {
                for y in sep.top()..sep.bottom() {
                    buf.set_string(sep.x, y, "│", grid_style);
                }
            }
            if row_idx < 2 {
                let divider = rows[row_idx * 2 + 1];
                let line = format!(
                    "{0}┼{0}┼{0}",
                    "─".repeat(usize::from(CELL_WIDTH))
                );
                buf.set_string(divider.x, divider.y, line, grid_style);
            }
        }
    }
}

fn to_terminal_color(color: Color) -> style::Color {
    match color {
        Color::Red => style::Color::Red,
        Color::Blue => style::Color::Blue,
        Color::Cyan => style::Color::Cyan,
        Color::DarkGray => style::Color::DarkGrey,
        _ => style::Color::Reset,
    }
}

/// Writes a buffer to `out` with colors, one terminal line per buffer row.
///
/// # Errors
///
/// Returns [`RenderError`] if writing fails.
pub fn write_buffer(out: &mut impl Write, buf: &Buffer) -> Result<(), RenderError> {
    let area = buf.area;
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let cell = &buf[(x, y)];
            queue!(out, SetForegroundColor(to_terminal_color(cell.fg)))?;
            if cell.modifier.contains(Modifier::BOLD) {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            queue!(out, Print(cell.symbol()), SetAttribute(Attribute::Reset))?;
        }
        queue!(out, style::ResetColor, Print("\n"))?;
    }
    out.flush()?;
    Ok(())
}

/// Resets colors and shows the cursor on stdout.
///
/// Safe to call from an interrupt path while a render may be half done.
pub fn restore_terminal() {
    let mut out = std::io::stdout();
    let _ = queue!(out, style::ResetColor, SetAttribute(Attribute::Reset), cursor::Show);
    let _ = out.flush();
}

/// Board renderer printing to a terminal stream.
#[derive(Debug)]
pub struct TerminalRenderer<W: Write> {
    out: W,
    pace: Duration,
    open: bool,
}

impl TerminalRenderer<std::io::Stdout> {
    /// Creates a renderer on stdout.
    pub fn stdout(pace: Duration) -> Self {
        Self::new(std::io::stdout(), pace)
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Creates a renderer that pauses for `pace` after each frame.
    pub fn new(out: W, pace: Duration) -> Self {
        Self {
            out,
            pace,
            open: false,
        }
    }

    /// Whether a frame has been drawn and the view not yet closed.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Borrows the output stream.
    pub fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> BoardRenderer for TerminalRenderer<W> {
    #[instrument(skip(self, snapshot))]
    fn render(&mut self, snapshot: &BoardSnapshot, mode: PaintMode) -> Result<(), RenderError> {
        let buf = BoardView::new(snapshot, mode).to_buffer();
        write_buffer(&mut self.out, &buf)?;
        self.open = true;
        if !self.pace.is_zero() {
            std::thread::sleep(self.pace);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn close(&mut self) {
        if !self.open {
            return;
        }
        debug!("Closing board view");
        let _ = queue!(
            self.out,
            style::ResetColor,
            SetAttribute(Attribute::Reset),
            cursor::Show
        );
        let _ = self.out.flush();
        self.open = false;
    }
}
