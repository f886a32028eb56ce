//! Game session controller: drives one game from names to result.

use crate::registry::{distinct_names, normalize_name, DEFAULT_PLAYER1, DEFAULT_PLAYER2};
use crate::rules;
use crate::{
    Board, BoardRenderer, Console, ConsoleError, GameRecord, GameResult, HistorySink, PaintMode,
    PlayerRegistry, Position, RandomSource, Seat, SessionError,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for both player names.
    AwaitingNames,
    /// First chooser is picking a symbol.
    AssigningSymbols,
    /// Moves are being played.
    InProgress,
    /// A terminal condition was reached.
    Finished,
}

/// One game of tic-tac-toe and the collaborators it talks to.
///
/// The session exclusively owns its board and registry. A new session
/// is created for every game.
pub struct GameSession<'a> {
    console: &'a mut dyn Console,
    renderer: &'a mut dyn BoardRenderer,
    history: &'a mut dyn HistorySink,
    random: &'a mut dyn RandomSource,
    default_names: [String; 2],
    board: Board,
    registry: Option<PlayerRegistry>,
    result: Option<GameResult>,
    phase: Phase,
}

impl<'a> GameSession<'a> {
    /// Creates a session with a fresh board.
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
            board: Board::new(),
            registry: None,
            result: None,
            phase: Phase::AwaitingNames,
        }
    }

    /// Replaces the names given to players who leave their name blank.
    pub fn with_default_names(mut self, names: [String; 2]) -> Self {
        self.default_names = names;
        self
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The board of this game.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The players, once symbols have been assigned.
    pub fn registry(&self) -> Option<&PlayerRegistry> {
        self.registry.as_ref()
    }

    /// The result, once the game has finished or been abandoned.
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Plays one complete game.
    ///
    /// Returns the record that was handed to the history sink. A failure
    /// to persist is reported on the console and does not fail the game.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the user interrupts a prompt or an
    /// internal failure abandons the game. Nothing is persisted in either case.
    #[instrument(skip(self))]
    pub fn play(&mut self) -> Result<GameRecord, SessionError> {
        self.board.reset();
        self.result = None;
        match self.run() {
            Ok(record) => Ok(record),
            Err(err) => {
                warn!(error = %err, phase = ?self.phase, "Game abandoned");
                self.result = Some(GameResult::Abandoned);
                Err(err)
            }
        }
    }

    fn run(&mut self) -> Result<GameRecord, SessionError> {
        self.phase = Phase::AwaitingNames;
        let (name1, name2) = self.collect_names()?;

        self.phase = Phase::AssigningSymbols;
        let registry = self.assign_symbols(&name1, &name2)?;
        self.registry = Some(registry.clone());

        self.phase = Phase::InProgress;
        let mut active = registry.seat(self.random.pick_seat()).name().clone();
        info!(first = %active, "First mover chosen");
        self.console.say(&format!("\n{} starts the game!", active));
        self.console.say("\nInitial Board:");
        self.renderer.render(&self.board.snapshot(), PaintMode::FirstPaint)?;

        let result = loop {
            let mark = registry.mark_of(&active)?;
            self.console.say(&format!("\n{}'s turn ({})", active, mark));
            let pos = self.read_move()?;

            self.board.place(pos, mark)?;
            info!(player = %active, %mark, position = %pos, "Move applied");
            self.console.say(&format!("\nBoard after {}'s move:", active));
            self.renderer.render(&self.board.snapshot(), PaintMode::Update)?;

            if let Some(winner) = rules::winner(&self.board, &registry) {
                self.console.say(&format!("\n🎉 {} wins! 🎉", winner.name()));
                break GameResult::Win(winner.clone());
            }
            if rules::is_tie(&self.board) {
                self.console.say("\n🤝 It's a tie! 🤝");
                break GameResult::Tie;
            }
            active = registry.other_of(&active)?.name().clone();
        };

        self.board.clear_labels();
        self.console.say("\nFinal Board:");
        self.renderer.render(&self.board.snapshot(), PaintMode::Update)?;
        self.phase = Phase::Finished;
        info!(result = %result, "Game finished");

        let record = GameRecord::new(
            registry.seats().clone(),
            result.clone(),
            self.board.snapshot(),
            Local::now().naive_local(),
        );
        self.result = Some(result);

        match self.history.append(&record) {
            Ok(location) => self.console.say(&format!("Game history saved to {}", location)),
            Err(err) => {
                warn!(error = %err, "Failed to persist game");
                self.console.say(&format!("Error saving game history: {}", err));
            }
        }

        Ok(record)
    }

    /// Asks for both player names. Blank answers get the default names.
    ///
    /// A broken input stream falls back to both defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] only if the user interrupts.
    #[instrument(skip(self))]
    pub fn collect_names(&mut self) -> Result<(String, String), SessionError> {
        let answers = self
            .console
            .prompt("Enter Player 1 name: ")
            .and_then(|first| {
                let second = self.console.prompt("Enter Player 2 name: ")?;
                Ok((first, second))
            });

        let [default1, default2] = &self.default_names;
        let (name1, name2) = match answers {
            Ok((first, second)) => (
                normalize_name(&first, default1),
                normalize_name(&second, default2),
            ),
            Err(ConsoleError::Interrupted) => return Err(ConsoleError::Interrupted.into()),
            Err(err) => {
                warn!(error = %err, "Could not read player names, using defaults");
                (default1.clone(), default2.clone())
            }
        };
        let names = distinct_names(name1, name2);
        debug!(name1 = %names.0, name2 = %names.1, "Names collected");
        Ok(names)
    }

    /// Lets a randomly chosen player pick X or O; the other gets the rest.
    ///
    /// A broken input stream falls back to `name1` as X and `name2` as O.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] only if the user interrupts.
    #[instrument(skip(self))]
    pub fn assign_symbols(
        &mut self,
        name1: &str,
        name2: &str,
    ) -> Result<PlayerRegistry, SessionError> {
        let chooser = self.random.pick_seat();
        let chooser_name = match chooser {
            Seat::First => name1,
            Seat::Second => name2,
        };
        self.console.say(&format!(
            "\n{} gets to choose their symbol first!",
            chooser_name
        ));

        let prompt = format!("{}, choose your symbol (X or O): ", chooser_name);
        let choice = loop {
            match self.console.prompt(&prompt) {
                Ok(answer) => match crate::Mark::parse_choice(&answer) {
                    Some(mark) => break Ok(mark),
                    None => self.console.say("Please enter only X or O"),
                },
                Err(err) => break Err(err),
            }
        };

        let registry = match choice {
            Ok(mark) => PlayerRegistry::from_choice(name1, name2, chooser, mark),
            Err(ConsoleError::Interrupted) => return Err(ConsoleError::Interrupted.into()),
            Err(err) => {
                warn!(error = %err, "Symbol choice failed, using fixed assignment");
                self.console.say(&format!("Error assigning symbols: {}", err));
                PlayerRegistry::fallback(name1, name2)
            }
        };

        for player in registry.seats() {
            self.console.say(&format!("{}: {}", player.name(), player.mark()));
        }
        Ok(registry)
    }

    /// Prompts until the active player names an empty square.
    fn read_move(&mut self) -> Result<Position, SessionError> {
        loop {
            let input = self.console.prompt("Enter position (1-9): ")?;
            match rules::parse_move(&self.board, &input) {
                Ok(pos) => return Ok(pos),
                Err(reason) => {
                    debug!(%reason, "Move rejected");
                    self.console.say("Invalid move! Choose an empty position between 1-9.");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DisplayToken, Mark, MemoryHistory, RecordingRenderer, ScriptedConsole, ScriptedRandom,
    };

    struct Harness {
        console: ScriptedConsole,
        renderer: RecordingRenderer,
        history: MemoryHistory,
        random: ScriptedRandom,
    }

    impl Harness {
        fn new(answers: &[&str], picks: &[Seat]) -> Self {
            Self {
                console: ScriptedConsole::new(answers.iter().copied()),
                renderer: RecordingRenderer::new(),
                history: MemoryHistory::new(),
                random: ScriptedRandom::new(picks.iter().copied()),
            }
        }

        fn session(&mut self) -> GameSession<'_> {
            GameSession::new(
                &mut self.console,
                &mut self.renderer,
                &mut self.history,
                &mut self.random,
            )
        }
    }

    #[test]
    fn test_blank_names_get_defaults() {
        let mut h = Harness::new(&["  ", ""], &[]);
        let names = h.session().collect_names().unwrap();
        assert_eq!(names, ("Player1".to_string(), "Player2".to_string()));
    }

    #[test]
    fn test_blank_names_use_configured_defaults() {
        let mut h = Harness::new(&["", "Ben"], &[]);
        let names = h
            .session()
            .with_default_names(["Red".to_string(), "Blue".to_string()])
            .collect_names()
            .unwrap();
        assert_eq!(names, ("Red".to_string(), "Ben".to_string()));
    }

    #[test]
    fn test_name_io_failure_falls_back() {
        let mut h = Harness::new(&[], &[]);
        h.console.push_error(ConsoleError::Io {
            message: "closed".into(),
        });
        let names = h.session().collect_names().unwrap();
        assert_eq!(names, ("Player1".to_string(), "Player2".to_string()));
    }

    #[test]
    fn test_symbol_choice_reprompts_until_x_or_o() {
        let mut h = Harness::new(&["z", "xo", "o"], &[Seat::Second]);
        let registry = h.session().assign_symbols("Ann", "Ben").unwrap();
        assert_eq!(registry.mark_of("Ben"), Ok(Mark::O));
        assert_eq!(registry.mark_of("Ann"), Ok(Mark::X));
        assert!(h.console.saw("Ben gets to choose their symbol first!"));
        assert!(h.console.saw("Please enter only X or O"));
    }

    #[test]
    fn test_symbol_io_failure_uses_fixed_assignment() {
        let mut h = Harness::new(&[], &[Seat::Second]);
        h.console.push_error(ConsoleError::Io {
            message: "broken pipe".into(),
        });
        let registry = h.session().assign_symbols("Ann", "Ben").unwrap();
        assert_eq!(registry.mark_of("Ann"), Ok(Mark::X));
        assert_eq!(registry.turn_order()[0].name(), "Ann");
    }

    #[test]
    fn test_interrupt_during_moves_skips_history() {
        let mut h = Harness::new(&["Ann", "Ben", "x", "1"], &[Seat::First, Seat::First]);
        let mut session = h.session();
        let err = session.play().unwrap_err();
        assert!(err.is_interrupted());
        assert_eq!(session.result(), Some(&GameResult::Abandoned));
        assert_eq!(session.phase(), Phase::InProgress);
        let registry = session.registry().expect("symbols were assigned");
        assert_eq!(registry.mark_of("Ann"), Ok(Mark::X));
        drop(session);
        assert_eq!(h.history.dump().unwrap(), None);
    }

    #[test]
    fn test_interrupt_before_symbols_leaves_no_registry() {
        let mut h = Harness::new(&["Ann", "Ben"], &[Seat::First]);
        let mut session = h.session();
        assert!(session.play().unwrap_err().is_interrupted());
        assert_eq!(session.phase(), Phase::AssigningSymbols);
        assert!(session.registry().is_none());
    }

    #[test]
    fn test_invalid_moves_do_not_change_turn() {
        let mut h = Harness::new(
            &["Ann", "Ben", "x", "1", "1", "nine", "0", "4", "2", "5", "3"],
            &[Seat::First, Seat::First],
        );
        let record = h.session().play().unwrap();
        assert_eq!(record.result(), &GameResult::Win(crate::Player::new("Ann", Mark::X)));
        let rejections = h
            .console
            .transcript()
            .iter()
            .filter(|l| l.starts_with("Invalid move!"))
            .count();
        assert_eq!(rejections, 3);
    }

    #[test]
    fn test_render_sequence() {
        let mut h = Harness::new(
            &["Ann", "Ben", "x", "1", "4", "2", "5", "3"],
            &[Seat::First, Seat::First],
        );
        h.session().play().unwrap();
        let frames = h.renderer.frames();
        // initial + five moves + final
        assert_eq!(frames.len(), 7);
        assert_eq!(frames[0].1, PaintMode::FirstPaint);
        assert!(frames[1..].iter().all(|(_, mode)| *mode == PaintMode::Update));
        assert_eq!(frames[5].0.tokens()[5], DisplayToken::Hint(6));
        assert_eq!(frames[6].0.tokens()[5], DisplayToken::Blank);
        assert_eq!(h.renderer.close_count(), 0);
    }
}
