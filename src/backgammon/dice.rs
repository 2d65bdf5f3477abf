use std::fmt::Display;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::misc::TinyVec;

/// Move distances granted by a roll: two values, or four on a double.
pub type Distances = TinyVec<u8, 4>;

/// One throw of the two dice together with the distances it grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roll {
    pub d1: u8,
    pub d2: u8,
    pub distances: Distances,
}

impl Roll {
    /// Builds the roll for two die faces. Doubles grant the value four times.
    pub fn new(d1: u8, d2: u8) -> Self {
        let distances = if d1 == d2 {
            Distances::from_slice(&[d1; 4])
        } else {
            Distances::from_slice(&[d1, d2])
        };
        Roll { d1, d2, distances }
    }

    pub fn is_double(&self) -> bool {
        self.d1 == self.d2
    }
}

impl Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.d1, self.d2)
    }
}

impl Serialize for Roll {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Roll", 3)?;
        state.serialize_field("d1", &self.d1)?;
        state.serialize_field("d2", &self.d2)?;
        state.serialize_field("distances", &*self.distances)?;
        state.end()
    }
}

/// A pair of six-sided dice backed by a seedable ChaCha8 stream.
///
/// Reseeding with the same value replays the same sequence of rolls. This is
/// meant for reproducible games and tests, not for anything adversarial.
#[derive(Debug, Clone)]
pub struct Dice {
    seed: Option<u64>,
    rng: ChaCha8Rng,
    last_roll: Option<Roll>,
}

impl Dice {
    /// Dice seeded from the thread-local entropy source.
    pub fn new() -> Self {
        Dice {
            seed: None,
            rng: ChaCha8Rng::seed_from_u64(rand::random()),
            last_roll: None,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Dice {
            seed: Some(seed),
            rng: ChaCha8Rng::seed_from_u64(seed),
            last_roll: None,
        }
    }

    pub fn roll(&mut self) -> Roll {
        let d1 = self.rng.random_range(1..=6);
        let d2 = self.rng.random_range(1..=6);
        let roll = Roll::new(d1, d2);
        self.last_roll = Some(roll);
        roll
    }

    /// Restarts the stream from `seed` and forgets the last roll.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.last_roll = None;
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn last_roll(&self) -> Option<Roll> {
        self.last_roll
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_distances() {
        for i in 1..=6 {
            for j in 1..=6 {
                let roll = Roll::new(i, j);
                if i == j {
                    assert!(roll.is_double());
                    assert_eq!(&*roll.distances, &[i; 4]);
                } else {
                    assert!(!roll.is_double());
                    assert_eq!(&*roll.distances, &[i, j]);
                }
            }
        }
    }

    #[test]
    fn test_dice_roll() {
        let mut dice = Dice::new();
        for _ in 1..=100 {
            let roll = dice.roll();
            assert!((1..=6).contains(&roll.d1));
            assert!((1..=6).contains(&roll.d2));
            assert_eq!(dice.last_roll(), Some(roll));
        }
    }

    #[test]
    fn last_roll_is_empty_until_first_roll() {
        let mut dice = Dice::with_seed(7);
        assert_eq!(dice.last_roll(), None);
        let roll = dice.roll();
        assert_eq!(dice.last_roll(), Some(roll));
        dice.set_seed(7);
        assert_eq!(dice.last_roll(), None);
    }

    #[test]
    fn same_seed_replays_same_rolls() {
        let mut a = Dice::with_seed(42);
        let mut b = Dice::new();
        b.set_seed(42);
        for _ in 0..50 {
            assert_eq!(a.roll(), b.roll());
        }
        assert_eq!(a.seed(), Some(42));
    }

    #[test]
    fn reseed_restarts_the_stream() {
        let mut dice = Dice::with_seed(9);
        let first: Vec<Roll> = (0..5).map(|_| dice.roll()).collect();
        dice.set_seed(9);
        let second: Vec<Roll> = (0..5).map(|_| dice.roll()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn roll_displays_both_faces() {
        assert_eq!(Roll::new(3, 5).to_string(), "3/5");
        assert_eq!(Roll::new(2, 2).to_string(), "2/2");
    }
}
