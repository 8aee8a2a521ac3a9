use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::card::{Card, Rank};

/// Every random decision a session makes goes through this trait.
pub trait RandomSource: Send {
    fn shuffle(
        &mut self,
        cards: &mut [Card],
    );

    /// One of [`Rank::REQUIRED`].
    fn required_rank(&mut self) -> Rank;

    /// Bullet chamber in `1..=chambers`.
    fn bullet_position(
        &mut self,
        chambers: u8,
    ) -> u8;
}

pub struct SeededRandom {
    inner: StdRng,
}

impl SeededRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for SeededRandom {
    fn shuffle(
        &mut self,
        cards: &mut [Card],
    ) {
        cards.shuffle(&mut self.inner);
    }

    fn required_rank(&mut self) -> Rank {
        Rank::REQUIRED[self.inner.gen_range(0..Rank::REQUIRED.len())]
    }

    fn bullet_position(
        &mut self,
        chambers: u8,
    ) -> u8 {
        self.inner.gen_range(1..=chambers.max(1))
    }
}
