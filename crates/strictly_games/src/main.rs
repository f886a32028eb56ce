//! Strictly Games - console tic-tac-toe
//!
//! Runs the synchronous game loop on a blocking task and races it
//! against Ctrl-C.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use strictly_games::{Cli, Command, GameConfig, InterruptNotice};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit code after the user pressed Ctrl-C (128 + SIGINT).
const INTERRUPTED_EXIT: u8 = 130;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.apply(GameConfig::discover(cli.config.as_deref())?);
    init_tracing(config.log_file())?;

    info!(command = ?cli.chosen_command(), ?config, "Starting strictly_games");

    match cli.chosen_command() {
        Command::History => {
            strictly_games::print_history(&config);
            Ok(ExitCode::SUCCESS)
        }
        Command::Play => run_game(config).await,
    }
}

/// Plays until the players quit; Ctrl-C ends the process without waiting for input.
async fn run_game(config: GameConfig) -> Result<ExitCode> {
    let notice = InterruptNotice::new();
    let game_notice = notice.clone();
    let game =
        tokio::task::spawn_blocking(move || strictly_games::run_terminal(&config, game_notice));

    tokio::select! {
        joined = game => {
            match joined.context("Game loop panicked")? {
                Ok(games_played) => {
                    info!(games_played, "Exiting normally");
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) if err.is_interrupted() => {
                    info!("Exiting after interrupt");
                    Ok(ExitCode::from(INTERRUPTED_EXIT))
                }
                Err(err) => {
                    error!(error = %err, "Game loop failed");
                    Err(err).context("Game loop failed")
                }
            }
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            // A record being written is finished; none is started after this.
            let _writes = strictly_games::hold_history_writes();
            strictly_games::restore_terminal();
            println!("\n{}", notice.message());
            info!(between_games = notice.between_games(), "Interrupted by Ctrl-C");
            // The blocking task is parked on stdin and cannot be joined.
            std::process::exit(i32::from(INTERRUPTED_EXIT));
        }
    }
}

/// Sends tracing output to a file so it never interleaves with prompts.
fn init_tracing(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}
