//! Tests for the play-again loop with scripted players.

use strictly_games::{show_history, App, FileHistory, InterruptNotice};
use strictly_tictactoe::{
    BoardRenderer, BoardSnapshot, HistorySink, MemoryHistory, PaintMode, RecordingRenderer,
    RenderError, ScriptedConsole, ScriptedRandom, Seat,
};
use tempfile::TempDir;

/// Ann picks X, moves first and wins the top row.
const ANN_WINS: [&str; 8] = ["Ann", "Ben", "x", "1", "4", "2", "5", "3"];

/// Renderer whose view broke after the first frame.
#[derive(Default)]
struct BrokenRenderer {
    closed: usize,
}

impl BoardRenderer for BrokenRenderer {
    fn render(&mut self, _snapshot: &BoardSnapshot, mode: PaintMode) -> Result<(), RenderError> {
        match mode {
            PaintMode::FirstPaint => Ok(()),
            PaintMode::Update => Err(RenderError::new("window closed")),
        }
    }

    fn close(&mut self) {
        self.closed += 1;
    }
}

fn answers(parts: &[&[&str]]) -> ScriptedConsole {
    ScriptedConsole::new(parts.iter().flat_map(|p| p.iter().copied()))
}

#[test]
fn test_one_game_then_history() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("game_history").join("tic_tac_toe_history.txt");
    let mut console = answers(&[&ANN_WINS, &["n", "y"]]);
    let mut renderer = RecordingRenderer::new();
    let mut history = FileHistory::new(&path);
    let mut random = ScriptedRandom::new([Seat::First, Seat::First]);

    let played = App::new(&mut console, &mut renderer, &mut history, &mut random)
        .run()
        .expect("players quit normally");

    assert_eq!(played, 1);
    assert_eq!(renderer.close_count(), 1);
    assert!(console.saw("Thanks for playing! You played 1 game(s)."));
    assert!(console.saw("GAME HISTORY"));
    assert!(console.saw("Players: Ann (X) vs Ben (O)"));
    assert!(console.saw(&format!("Game history saved to {}", path.display())));

    let stored = history.dump().unwrap().unwrap();
    assert!(stored.contains("Result: Ann wins!\n"));
}

#[test]
fn test_play_again_runs_fresh_game() {
    let mut console = answers(&[&ANN_WINS, &["maybe", "yes"], &ANN_WINS, &["no", "n"]]);
    let mut renderer = RecordingRenderer::new();
    let mut history = MemoryHistory::new();
    let mut random = ScriptedRandom::new([Seat::First; 4]);

    let played = App::new(&mut console, &mut renderer, &mut history, &mut random)
        .run()
        .unwrap();

    assert_eq!(played, 2);
    assert!(console.saw("Please enter 'y' for yes or 'n' for no."));
    assert!(console.saw("Starting new game..."));
    // Second game starts from a fresh board.
    let first_paints: Vec<_> = renderer
        .frames()
        .iter()
        .filter(|(_, mode)| *mode == PaintMode::FirstPaint)
        .collect();
    assert_eq!(first_paints.len(), 2);
    assert_eq!(first_paints[1].0, first_paints[0].0);

    let stored = history.dump().unwrap().unwrap();
    assert_eq!(stored.matches("Game played on:").count(), 2);
    assert!(!console.saw("GAME HISTORY"));
}

#[test]
fn test_interrupt_closes_view_and_saves_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.txt");
    let mut console = answers(&[&["Ann", "Ben", "o", "5", "1"]]);
    let mut renderer = RecordingRenderer::new();
    let mut history = FileHistory::new(&path);
    let mut random = ScriptedRandom::new([Seat::First, Seat::First]);

    let err = App::new(&mut console, &mut renderer, &mut history, &mut random)
        .run()
        .unwrap_err();

    assert!(err.is_interrupted());
    assert_eq!(renderer.close_count(), 1);
    assert!(console.saw("Game interrupted by user."));
    assert!(!path.exists());
}

#[test]
fn test_failed_game_reported_and_loop_continues() {
    let mut console = answers(&[&["Ann", "Ben", "x", "1"], &["n"]]);
    let mut renderer = BrokenRenderer::default();
    let mut history = MemoryHistory::new();
    let mut random = ScriptedRandom::new([Seat::First, Seat::First]);

    let played = App::new(&mut console, &mut renderer, &mut history, &mut random)
        .run()
        .unwrap();

    assert_eq!(played, 0);
    assert_eq!(renderer.closed, 1);
    assert!(console.saw("Error during game: Render error: window closed"));
    assert!(console.saw("Do you want to play another game? (y/n): "));
    // No completed games, so no history prompt.
    assert!(!console.saw("Do you want to see the game history?"));
    assert_eq!(history.dump().unwrap(), None);
}

#[test]
fn test_persistence_failure_still_counts_game() {
    let mut console = answers(&[&ANN_WINS, &["n", "y"]]);
    let mut renderer = RecordingRenderer::new();
    let mut history = MemoryHistory::unavailable();
    let mut random = ScriptedRandom::new([Seat::First, Seat::First]);

    let played = App::new(&mut console, &mut renderer, &mut history, &mut random)
        .run()
        .unwrap();

    assert_eq!(played, 1);
    assert!(console.saw("Error saving game history: history store unavailable"));
    assert!(console.saw("Error reading game history: history store unavailable"));
}

#[test]
fn test_missing_history_file_reported() {
    let dir = TempDir::new().unwrap();
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let history = FileHistory::new(dir.path().join("absent.txt"));

    show_history(&mut console, &history);
    assert!(console.saw("No game history file found."));
}

#[test]
fn test_empty_history_file_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "\n  \n").unwrap();
    let mut console = ScriptedConsole::new(Vec::<String>::new());
    let history = FileHistory::new(&path);

    show_history(&mut console, &history);
    assert!(console.saw("No game history found."));
}

#[test]
fn test_interrupt_at_play_again_says_goodbye() {
    let mut console = answers(&[&ANN_WINS]);
    let mut renderer = RecordingRenderer::new();
    let mut history = MemoryHistory::new();
    let mut random = ScriptedRandom::new([Seat::First, Seat::First]);
    let notice = InterruptNotice::new();

    let mut app = App::new(&mut console, &mut renderer, &mut history, &mut random)
        .with_notice(notice.clone());
    let err = app.run().unwrap_err();
    assert_eq!(app.games_played(), 1);
    drop(app);

    assert!(err.is_interrupted());
    assert_eq!(renderer.close_count(), 1);
    assert!(console.saw("Goodbye!"));
    assert!(!console.saw("Thanks for playing!"));
    assert!(notice.between_games());
    assert_eq!(notice.message(), "Goodbye!");
    // The finished game was already saved before the prompt.
    let stored = history.dump().unwrap().unwrap();
    assert_eq!(stored.matches("Game played on:").count(), 1);
}

#[test]
fn test_interrupt_at_history_prompt_closes_view() {
    let mut console = answers(&[&ANN_WINS, &["n"]]);
    let mut renderer = RecordingRenderer::new();
    let mut history = MemoryHistory::new();
    let mut random = ScriptedRandom::new([Seat::First, Seat::First]);

    let err = App::new(&mut console, &mut renderer, &mut history, &mut random)
        .run()
        .unwrap_err();

    assert!(err.is_interrupted());
    assert_eq!(renderer.close_count(), 1);
    assert!(console.saw("Thanks for playing! You played 1 game(s)."));
    assert!(!console.saw("GAME HISTORY"));
}

#[test]
fn test_notice_reports_game_in_progress() {
    let mut console = answers(&[&["Ann", "Ben", "x", "1"]]);
    let mut renderer = RecordingRenderer::new();
    let mut history = MemoryHistory::new();
    let mut random = ScriptedRandom::new([Seat::First, Seat::First]);
    let notice = InterruptNotice::new();

    App::new(&mut console, &mut renderer, &mut history, &mut random)
        .with_notice(notice.clone())
        .run()
        .unwrap_err();

    assert!(!notice.between_games());
    assert_eq!(notice.message(), "Game interrupted by user.");
}

#[test]
fn test_configured_default_names_used_for_blank_answers() {
    let mut console = answers(&[&["", "", "x", "1", "4", "2", "5", "3"], &["n", "n"]]);
    let mut renderer = RecordingRenderer::new();
    let mut history = MemoryHistory::new();
    let mut random = ScriptedRandom::new([Seat::First, Seat::First]);

    App::new(&mut console, &mut renderer, &mut history, &mut random)
        .with_default_names(["Red".to_string(), "Blue".to_string()])
        .run()
        .unwrap();

    assert!(console.saw("Red starts the game!"));
    let stored = history.dump().unwrap().unwrap();
    assert!(stored.contains("Players: Red (X) vs Blue (O)"));
}
