//! Outer game loop: play, offer another game, show history on the way out.

use crate::config::GameConfig;
use crate::console::StdConsole;
use crate::history::FileHistory;
use crate::render::TerminalRenderer;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use strictly_tictactoe::{
    ask_yes_no, BoardRenderer, Console, ConsoleError, GameSession, HistorySink, RandomSource,
    RngSource, SessionError, DEFAULT_PLAYER1, DEFAULT_PLAYER2,
};
use tracing::{error, info, instrument, warn};

const BANNER_WIDTH: usize = 40;
const HISTORY_RULE_WIDTH: usize = 50;

/// Tells an out-of-band interrupt handler whether a game is running.
///
/// Clones share one flag. The loop clears it while a game is played and
/// sets it while asking about the next game or the history.
#[derive(Debug, Clone, Default)]
pub struct InterruptNotice {
    between_games: Arc<AtomicBool>,
}

impl InterruptNotice {
    /// Creates a notice for a loop that has not started a game yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the loop is outside a game.
    pub fn between_games(&self) -> bool {
        self.between_games.load(Ordering::SeqCst)
    }

    /// Farewell matching what the loop was doing when interrupted.
    pub fn message(&self) -> &'static str {
        if self.between_games() {
            "Goodbye!"
        } else {
            "Game interrupted by user."
        }
    }

    fn set_between_games(&self, value: bool) {
        self.between_games.store(value, Ordering::SeqCst);
    }
}

/// Runs games back to back until the players decline another one.
pub struct App<'a> {
    console: &'a mut dyn Console,
    renderer: &'a mut dyn BoardRenderer,
    history: &'a mut dyn HistorySink,
    random: &'a mut dyn RandomSource,
    default_names: [String; 2],
    notice: InterruptNotice,
    games_played: usize,
}

impl<'a> App<'a> {
    /// Creates the loop around the given collaborators.
    pub fn new(
        console: &'a mut dyn Console,
        renderer: &'a mut dyn BoardRenderer,
        history: &'a mut dyn HistorySink,
        random: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            console,
            renderer,
            history,
            random,
            default_names: [DEFAULT_PLAYER1.to_string(), DEFAULT_PLAYER2.to_string()],
            notice: InterruptNotice::new(),
            games_played: 0,
        }
    }

    /// Names given to players who leave their name blank.
    pub fn with_default_names(mut self, names: [String; 2]) -> Self {
        self.default_names = names;
        self
    }

    /// Shares the loop's progress with an interrupt handler.
    pub fn with_notice(mut self, notice: InterruptNotice) -> Self {
        self.notice = notice;
        self
    }

    /// Games completed so far.
    pub fn games_played(&self) -> usize {
        self.games_played
    }

    /// Plays until the players decline to continue.
    ///
    /// The renderer is closed exactly once on every way out.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the user interrupts or the console
    /// breaks outside a game. Failed games are reported and do not end the loop.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<usize, SessionError> {
        let result = self.run_loop();
        self.renderer.close();
        result
    }

    fn run_loop(&mut self) -> Result<usize, SessionError> {
        self.console.say("🎮 Welcome to TIC-TAC-TOE Game! 🎮");
        self.console.say(&"=".repeat(BANNER_WIDTH));

        loop {
            self.notice.set_between_games(false);
            self.play_one()?;
            self.notice.set_between_games(true);

            match ask_yes_no(&mut *self.console, "\nDo you want to play another game? (y/n): ") {
                Ok(true) => {
                    let rule = "=".repeat(BANNER_WIDTH);
                    self.console.say(&format!("\n{}", rule));
                    self.console.say("Starting new game...");
                    self.console.say(&rule);
                }
                Ok(false) => break,
                Err(ConsoleError::Interrupted) => {
                    self.console.say("\nGoodbye!");
                    return Err(ConsoleError::Interrupted.into());
                }
                Err(err) => return Err(err.into()),
            }
        }

        self.console.say(&format!(
            "\nThanks for playing! You played {} game(s).",
            self.games_played
        ));
        if self.games_played > 0
            && ask_yes_no(&mut *self.console, "Do you want to see the game history? (y/n): ")?
        {
            show_history(&mut *self.console, &*self.history);
        }
        info!(games_played = self.games_played, "Players left");
        Ok(self.games_played)
    }

    /// Plays one game with a fresh session; only an interrupt is fatal.
    fn play_one(&mut self) -> Result<(), SessionError> {
        let outcome = GameSession::new(
            &mut *self.console,
            &mut *self.renderer,
            &mut *self.history,
            &mut *self.random,
        )
        .with_default_names(self.default_names.clone())
        .play();

        match outcome {
            Ok(record) => {
                self.games_played += 1;
                info!(
                    result = %record.result(),
                    games_played = self.games_played,
                    "Game completed"
                );
                Ok(())
            }
            Err(err) if err.is_interrupted() => {
                self.console.say("\nGame interrupted by user.");
                Err(err)
            }
            Err(err) => {
                error!(error = %err, "Game did not complete");
                self.console.say(&format!("Error during game: {}", err.kind));
                Ok(())
            }
        }
    }
}

/// Prints the whole history store verbatim.
#[instrument(skip_all)]
pub fn show_history(console: &mut dyn Console, history: &dyn HistorySink) {
    match history.dump() {
        Ok(Some(content)) => {
            let rule = "=".repeat(HISTORY_RULE_WIDTH);
            console.say(&format!("\n{}", rule));
            console.say("GAME HISTORY");
            console.say(&rule);
            if content.trim().is_empty() {
                console.say("No game history found.");
            } else {
                console.say(&content);
            }
        }
        Ok(None) => console.say("No game history file found."),
        Err(err) => {
            warn!(error = %err, "History unreadable");
            console.say(&format!("Error reading game history: {}", err));
        }
    }
}

/// Runs the interactive game on the real terminal.
///
/// # Errors
///
/// Returns a [`SessionError`] if the user interrupts or the console fails.
#[instrument(skip(config, notice))]
pub fn run_terminal(config: &GameConfig, notice: InterruptNotice) -> Result<usize, SessionError> {
    let mut console = StdConsole::stdio();
    let mut renderer = TerminalRenderer::stdout(Duration::from_millis(*config.pace_ms()));
    let mut history = FileHistory::new(config.history_path());
    let mut random: Box<dyn RandomSource> = match config.seed() {
        Some(seed) => {
            info!(seed, "Using seeded random source");
            Box::new(RngSource::seeded(*seed))
        }
        None => Box::new(RngSource::from_entropy()),
    };

    App::new(&mut console, &mut renderer, &mut history, random.as_mut())
        .with_default_names(config.default_names().clone())
        .with_notice(notice)
        .run()
}

/// Prints the history file and returns.
#[instrument(skip(config))]
pub fn print_history(config: &GameConfig) {
    let mut console = StdConsole::stdio();
    let history = FileHistory::new(config.history_path());
    show_history(&mut console, &history);
}
