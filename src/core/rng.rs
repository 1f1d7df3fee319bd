//! Dice randomness.
//!
//! The roll engine never reaches for a global RNG; it draws from a
//! [`DiceSource`] supplied by the caller.
//!
//! - [`DiceRng`]: seeded ChaCha8 stream, forkable so each batch worker gets
//!   an independent sequence.
//! - [`ScriptedDice`]: replays fixed faces, for tests and demonstrations.
//!
//! ```
//! use craps_sim::core::{DiceRng, DiceSource};
//!
//! let mut rng = DiceRng::new(42);
//! let mut worker = rng.fork();
//!
//! let face = worker.roll_die();
//! assert!((1..=6).contains(&face));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Anything that can roll one fair six-sided die.
pub trait DiceSource {
    /// Return a face in `1..=6`.
    fn roll_die(&mut self) -> u8;
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }
}

/// Deterministic dice stream with forking.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl DiceRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this stream started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }
}

impl DiceSource for DiceRng {
    fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }
}

/// Dice that replay a fixed list of faces, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    next: usize,
}

impl ScriptedDice {
    /// Replay individual die faces in order.
    ///
    /// # Panics
    ///
    /// Panics if `faces` is empty or any face is outside `1..=6`.
    #[must_use]
    pub fn new(faces: Vec<u8>) -> Self {
        assert!(!faces.is_empty(), "Scripted dice need at least one face");
        assert!(
            faces.iter().all(|f| (1..=6).contains(f)),
            "Die faces must be 1-6"
        );
        Self { faces, next: 0 }
    }

    /// Replay whole rolls given as `(die1, die2)` pairs.
    #[must_use]
    pub fn from_rolls(rolls: &[(u8, u8)]) -> Self {
        Self::new(rolls.iter().flat_map(|&(a, b)| [a, b]).collect())
    }

    /// Replay dice totals, splitting each into a valid pair of faces.
    ///
    /// # Panics
    ///
    /// Panics if a total is outside `2..=12`.
    #[must_use]
    pub fn from_totals(totals: &[u8]) -> Self {
        let faces = totals
            .iter()
            .flat_map(|&total| {
                assert!((2..=12).contains(&total), "Dice totals must be 2-12");
                let first = (total - 1).min(6);
                [first, total - first]
            })
            .collect();
        Self::new(faces)
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        let face = self.faces[self.next];
        self.next = (self.next + 1) % self.faces.len();
        face
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = DiceRng::new(42);
        let mut rng2 = DiceRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_die(), rng2.roll_die());
        }
    }

    #[test]
    fn test_faces_in_range() {
        let mut rng = DiceRng::new(7);
        let mut seen = [false; 6];
        for _ in 0..600 {
            let face = rng.roll_die();
            assert!((1..=6).contains(&face));
            seen[(face - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = DiceRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..20).map(|_| rng.roll_die()).collect();
        let seq2: Vec<_> = (0..20).map(|_| forked.roll_die()).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = DiceRng::new(42);
        let mut rng2 = DiceRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();

        assert_eq!(forked1.seed(), forked2.seed());
    }

    #[test]
    fn test_scripted_rolls_cycle() {
        let mut dice = ScriptedDice::from_rolls(&[(5, 6), (1, 1)]);
        assert_eq!((dice.roll_die(), dice.roll_die()), (5, 6));
        assert_eq!((dice.roll_die(), dice.roll_die()), (1, 1));
        assert_eq!((dice.roll_die(), dice.roll_die()), (5, 6));
    }

    #[test]
    fn test_scripted_totals() {
        for total in 2..=12u8 {
            let mut dice = ScriptedDice::from_totals(&[total]);
            let (a, b) = (dice.roll_die(), dice.roll_die());
            assert!((1..=6).contains(&a) && (1..=6).contains(&b));
            assert_eq!(a + b, total);
        }
    }

    #[test]
    #[should_panic(expected = "Die faces must be 1-6")]
    fn test_scripted_rejects_bad_face() {
        let _ = ScriptedDice::new(vec![7]);
    }
}
