//! Console capability: where prompts go and answers come from.

use crate::ConsoleError;
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Blocking text input and output for the prompt loop.
pub trait Console {
    /// Shows `prompt` and waits for one line of input (without the newline).
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Interrupted`] when the user cancels,
    /// or [`ConsoleError::Io`] when the input stream fails.
    fn prompt(&mut self, prompt: &str) -> Result<String, ConsoleError>;

    /// Prints a message line.
    fn say(&mut self, message: &str);
}

/// Asks a yes/no question until the answer is one of y, yes, n, no.
///
/// # Errors
///
/// Propagates console failures.
#[instrument(skip(console))]
pub fn ask_yes_no(console: &mut dyn Console, question: &str) -> Result<bool, ConsoleError> {
    loop {
        let answer = console.prompt(question)?;
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => {
                debug!(answer = other, "Unrecognized yes/no answer");
                console.say("Please enter 'y' for yes or 'n' for no.");
            }
        }
    }
}

/// Console driven by a fixed list of answers.
///
/// Everything shown is captured in a transcript. Running out of answers
/// behaves like the user pressing Ctrl-C.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<Result<String, ConsoleError>>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    /// Creates a console that answers prompts with `answers` in order.
    pub fn new<S: Into<String>>(answers: impl IntoIterator<Item = S>) -> Self {
        Self {
            answers: answers.into_iter().map(|a| Ok(a.into())).collect(),
            transcript: Vec::new(),
        }
    }

    /// Queues a failure as the next answer.
    pub fn push_error(&mut self, err: ConsoleError) {
        self.answers.push_back(Err(err));
    }

    /// Queues another answer.
    pub fn push_answer(&mut self, answer: impl Into<String>) {
        self.answers.push_back(Ok(answer.into()));
    }

    /// Every prompt and message shown so far, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Returns true if any transcript line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }

    /// Number of answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn prompt(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.transcript.push(prompt.to_string());
        self.answers
            .pop_front()
            .unwrap_or(Err(ConsoleError::Interrupted))
    }

    fn say(&mut self, message: &str) {
        self.transcript.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_no_accepts_variants() {
        let mut console = ScriptedConsole::new(["YES", "n", "Y", "No"]);
        assert_eq!(ask_yes_no(&mut console, "?"), Ok(true));
        assert_eq!(ask_yes_no(&mut console, "?"), Ok(false));
        assert_eq!(ask_yes_no(&mut console, "?"), Ok(true));
        assert_eq!(ask_yes_no(&mut console, "?"), Ok(false));
    }

    #[test]
    fn test_yes_no_reprompts() {
        let mut console = ScriptedConsole::new(["maybe", "", "yes"]);
        assert_eq!(ask_yes_no(&mut console, "Again?"), Ok(true));
        let reminders = console
            .transcript()
            .iter()
            .filter(|l| l.contains("Please enter 'y'"))
            .count();
        assert_eq!(reminders, 2);
    }

    #[test]
    fn test_exhausted_console_interrupts() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        assert_eq!(ask_yes_no(&mut console, "?"), Err(ConsoleError::Interrupted));
    }
}
