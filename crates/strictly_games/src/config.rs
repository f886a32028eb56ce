//! Game configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_tictactoe::{DEFAULT_PLAYER1, DEFAULT_PLAYER2};
use tracing::{debug, info, instrument};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "strictly_games.toml";

/// Settings for the console game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Text file finished games are appended to.
    #[serde(default = "default_history_path")]
    history_path: PathBuf,

    /// Pause after each board render, in milliseconds.
    #[serde(default = "default_pace_ms")]
    pace_ms: u64,

    /// Seed for symbol-chooser and first-mover picks. Random if unset.
    #[serde(default)]
    seed: Option<u64>,

    /// File that tracing output is written to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Names given to players who leave their name blank.
    #[serde(default = "default_names")]
    default_names: [String; 2],
}

fn default_history_path() -> PathBuf {
    PathBuf::from("game_history").join("tic_tac_toe_history.txt")
}

fn default_pace_ms() -> u64 {
    10
}

fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_games.log")
}

fn default_names() -> [String; 2] {
    [DEFAULT_PLAYER1.to_string(), DEFAULT_PLAYER2.to_string()]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            history_path: default_history_path(),
            pace_ms: default_pace_ms(),
            seed: None,
            log_file: default_log_file(),
            default_names: default_names(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid TOML for this schema.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(
            history = %config.history_path.display(),
            pace_ms = config.pace_ms,
            "Config loaded"
        );
        Ok(config)
    }

    /// Loads `explicit` if given, else [`DEFAULT_CONFIG_FILE`] if present,
    /// else defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a chosen file cannot be read or parsed.
    #[instrument]
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
