//! RNG module - uniform random piece generation
//!
//! Each spawn picks a piece kind uniformly from the seven catalog entries and,
//! independently, a color id uniformly from `1..=7`. There is no bag or
//! history: consecutive repeats are as likely as any other pair.
//!
//! Seeded with `StdRng::seed_from_u64` so a seed reproduces the whole sequence
//! (useful for tests and replays).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pieces::Piece;
use crate::types::{Cell, PieceKind, COLOR_COUNT};

/// Seeded source of piece kinds and colors
#[derive(Debug, Clone)]
pub struct PieceRng {
    rng: StdRng,
    seed: u64,
}

impl PieceRng {
    /// Create a new generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Pick a piece kind uniformly at random
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    /// Pick a color id uniformly from `1..=COLOR_COUNT`
    pub fn next_color(&mut self) -> Cell {
        self.rng.gen_range(1..=COLOR_COUNT)
    }

    /// Draw a fresh colored piece
    pub fn next_piece(&mut self) -> Piece {
        let kind = self.next_kind();
        let color = self.next_color();
        Piece::new(kind, color)
    }

    /// The seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for PieceRng {
    fn default() -> Self {
        Self::new(1)
    }
}
