//! Command-line interface for strictly_games.

use crate::config::GameConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::instrument;

/// Strictly Games - two-player tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_games")]
#[command(about = "Two-player tic-tac-toe with a live board and game history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// History file to append finished games to
    #[arg(long, global = true)]
    pub history: Option<PathBuf>,

    /// Pause after each board render, in milliseconds
    #[arg(long, global = true)]
    pub pace_ms: Option<u64>,

    /// Seed for the random picks (who chooses a symbol, who moves first)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// File to write logs to
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play games until you decline another one
    Play,
    /// Print the game history and exit
    History,
}

impl Cli {
    /// The chosen command.
    pub fn chosen_command(&self) -> Command {
        self.command.unwrap_or(Command::Play)
    }

    /// Applies command-line overrides on top of file configuration.
    #[instrument(skip(self))]
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(path) = &self.history {
            config = config.with_history_path(path.clone());
        }
        if let Some(pace) = self.pace_ms {
            config = config.with_pace_ms(pace);
        }
        if self.seed.is_some() {
            config = config.with_seed(self.seed);
        }
        if let Some(path) = &self.log_file {
            config = config.with_log_file(path.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_play() {
        let cli = Cli::parse_from(["strictly_games"]);
        assert_eq!(cli.chosen_command(), Command::Play);
        assert_eq!(cli.apply(GameConfig::default()), GameConfig::default());
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::parse_from([
            "strictly_games",
            "--pace-ms",
            "0",
            "--seed",
            "5",
            "--history",
            "games.txt",
            "history",
        ]);
        assert_eq!(cli.chosen_command(), Command::History);
        let config = cli.apply(GameConfig::default());
        assert_eq!(*config.pace_ms(), 0);
        assert_eq!(*config.seed(), Some(5));
        assert_eq!(config.history_path(), &PathBuf::from("games.txt"));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        <Cli as CommandFactory>::command().debug_assert();
    }
}
