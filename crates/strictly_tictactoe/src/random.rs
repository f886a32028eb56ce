//! Random source for the coin flips a game needs.

use crate::Seat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Source of the two random decisions in a game: who picks a symbol
/// first, and who moves first.
pub trait RandomSource {
    /// Picks one of the two seats uniformly at random.
    fn pick_seat(&mut self) -> Seat;
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wraps a generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Creates a reproducible source from a seed.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Creates a source seeded from the operating system.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick_seat(&mut self) -> Seat {
        let seat = if self.rng.random_bool(0.5) {
            Seat::First
        } else {
            Seat::Second
        };
        debug!(?seat, "Random seat picked");
        seat
    }
}

/// Replays a fixed sequence of picks, then repeats [`Seat::First`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    picks: VecDeque<Seat>,
}

impl ScriptedRandom {
    /// Creates a source that returns `picks` in order.
    pub fn new(picks: impl IntoIterator<Item = Seat>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn pick_seat(&mut self) -> Seat {
        self.picks.pop_front().unwrap_or(Seat::First)
    }
}
