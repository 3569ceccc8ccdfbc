//! Dice
//!
//! The session rolls through the `Dice` trait so games can be replayed with
//! a fixed seed or scripted faces.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::DIE_FACES;

/// Source of die faces in `1..=DIE_FACES`
pub trait Dice {
    fn roll(&mut self) -> u8;
}

/// A fair six-sided die
#[derive(Debug, Clone)]
pub struct Die {
    rng: Pcg32,
}

impl Die {
    /// Die with a reproducible sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Die seeded from the thread RNG
    pub fn random() -> Self {
        Self::seeded(rand::rng().random())
    }
}

impl Dice for Die {
    fn roll(&mut self) -> u8 {
        self.rng.random_range(1..=DIE_FACES)
    }
}

/// Dice that return a fixed list of faces, then panic
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct LoadedDice {
    faces: std::collections::VecDeque<u8>,
}

#[cfg(test)]
impl LoadedDice {
    pub fn new(faces: &[u8]) -> Self {
        Self {
            faces: faces.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl Dice for LoadedDice {
    fn roll(&mut self) -> u8 {
        self.faces.pop_front().expect("loaded dice ran out of faces")
    }
}
