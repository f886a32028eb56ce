//! Console on the process's stdin and stdout.

use std::io::{BufRead, Write};
use strictly_tictactoe::{Console, ConsoleError};
use tracing::{debug, instrument};

/// Line-based console over any reader and writer.
///
/// End of input is reported as [`ConsoleError::Interrupted`], the same as Ctrl-C.
#[derive(Debug)]
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

/// Console bound to the real terminal.
pub type StdConsole = LineConsole<std::io::StdinLock<'static>, std::io::Stdout>;

impl StdConsole {
    /// Creates a console on stdin and stdout.
    pub fn stdio() -> Self {
        LineConsole::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    /// Creates a console over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the console, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    #[instrument(skip(self))]
    fn prompt(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            debug!("End of input");
            return Err(ConsoleError::Interrupted);
        }
        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        debug!(answer = %answer, "Input received");
        Ok(answer)
    }

    fn say(&mut self, message: &str) {
        // A closed stdout is noticed by the next prompt.
        let _ = writeln!(self.output, "{}", message);
    }
}
