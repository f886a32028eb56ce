//! Player registry: who plays which mark in the current game.

use crate::{Mark, RegistryError};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Default name for the first seat.
pub const DEFAULT_PLAYER1: &str = "Player1";
/// Default name for the second seat.
pub const DEFAULT_PLAYER2: &str = "Player2";

/// Which of the two name prompts a player answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// Answered "Player 1 name".
    First,
    /// Answered "Player 2 name".
    Second,
}

impl Seat {
    /// Returns the other seat.
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

/// A named player with an assigned mark.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    name: String,
    /// Assigned mark.
    mark: Mark,
}

impl Player {
    /// Creates a player.
    pub fn new(name: impl Into<String>, mark: Mark) -> Self {
        Self {
            name: name.into(),
            mark,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.mark)
    }
}

/// Normalizes a raw name answer, falling back to `default` when blank.
pub fn normalize_name(raw: &str, default: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Makes the second name distinct from the first so lookups stay unambiguous.
pub fn distinct_names(name1: String, name2: String) -> (String, String) {
    if name1 == name2 {
        let renamed = format!("{} (2)", name2);
        (name1, renamed)
    } else {
        (name1, name2)
    }
}

/// The two players of one game and their marks.
///
/// Built once per game and immutable thereafter. Marks are always
/// distinct and cover both `X` and `O`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRegistry {
    seats: [Player; 2],
    first_assigned: Seat,
    marks: HashMap<String, Mark>,
}

impl PlayerRegistry {
    /// Builds the registry from the first chooser's symbol choice.
    ///
    /// The player in `chooser` takes `mark`, the other player takes the
    /// complementary mark. Names must be distinct.
    #[instrument]
    pub fn from_choice(name1: &str, name2: &str, chooser: Seat, mark: Mark) -> Self {
        let chooser_mark = |seat: Seat| {
            if seat == chooser { mark } else { mark.opponent() }
        };
        let seats = [
            Player::new(name1, chooser_mark(Seat::First)),
            Player::new(name2, chooser_mark(Seat::Second)),
        ];
        let marks = seats
            .iter()
            .map(|p| (p.name.clone(), p.mark))
            .collect();
        info!(
            player1 = %seats[0],
            player2 = %seats[1],
            "Symbols assigned"
        );
        Self {
            seats,
            first_assigned: chooser,
            marks,
        }
    }

    /// Deterministic assignment used when the symbol choice cannot be read:
    /// first seat plays X, second plays O.
    #[instrument]
    pub fn fallback(name1: &str, name2: &str) -> Self {
        Self::from_choice(name1, name2, Seat::First, Mark::X)
    }

    /// Looks up a player's mark.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownPlayer`] if `name` is not registered.
    pub fn mark_of(&self, name: &str) -> Result<Mark, RegistryError> {
        self.marks
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownPlayer {
                name: name.to_string(),
            })
    }

    /// Returns the player holding `mark`.
    pub fn player_with(&self, mark: Mark) -> &Player {
        if self.seats[0].mark == mark {
            &self.seats[0]
        } else {
            &self.seats[1]
        }
    }

    /// Returns the opponent of the named player.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownPlayer`] if `name` is not registered.
    pub fn other_of(&self, name: &str) -> Result<&Player, RegistryError> {
        let mark = self.mark_of(name)?;
        Ok(self.player_with(mark.opponent()))
    }

    /// Players in seat order (the order their names were entered).
    pub fn seats(&self) -> &[Player; 2] {
        &self.seats
    }

    /// Player in the given seat.
    pub fn seat(&self, seat: Seat) -> &Player {
        &self.seats[seat.index()]
    }

    /// Players in assignment order: the first chooser comes first.
    pub fn turn_order(&self) -> [&Player; 2] {
        [
            self.seat(self.first_assigned),
            self.seat(self.first_assigned.other()),
        ]
    }
}
