//! RNG module - random piece kind selection
//!
//! The engine draws kinds through the [`KindSource`] trait so that games can
//! be replayed from a seed and tests can script exact piece sequences.
//! [`SimpleRng`] picks uniformly over the seven kinds; [`ScriptedKinds`]
//! cycles through a fixed list.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Supplier of piece kinds for spawning
pub trait KindSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // high 16 bits
        (self.next_u32() >> 16) % max
    }

    /// Current generator state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl KindSource for SimpleRng {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::from_index(self.next_range(PieceKind::ALL.len() as u32) as usize)
    }
}

/// Kind source that repeats a fixed sequence
#[derive(Debug, Clone)]
pub struct ScriptedKinds {
    kinds: ArrayVec<PieceKind, 32>,
    cursor: usize,
}

impl ScriptedKinds {
    /// Cycle through `kinds`; at most 32 are kept, an empty list yields `I`
    pub fn new(kinds: &[PieceKind]) -> Self {
        let mut list = ArrayVec::new();
        for &kind in kinds.iter().take(32) {
            list.push(kind);
        }
        Self {
            kinds: list,
            cursor: 0,
        }
    }

    /// The same kind forever
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(&[kind])
    }
}

impl KindSource for ScriptedKinds {
    fn next_kind(&mut self) -> PieceKind {
        if self.kinds.is_empty() {
            return PieceKind::I;
        }
        let kind = self.kinds[self.cursor % self.kinds.len()];
        self.cursor = (self.cursor + 1) % self.kinds.len();
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        assert_eq!(SimpleRng::new(0).state(), 1);
    }

    #[test]
    fn test_rng_covers_all_kinds() {
        let mut rng = SimpleRng::new(42);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[rng.next_kind().index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing kinds: {:?}", seen);
    }

    #[test]
    fn test_scripted_kinds_cycle() {
        let mut source = ScriptedKinds::new(&[PieceKind::O, PieceKind::T]);
        assert_eq!(source.next_kind(), PieceKind::O);
        assert_eq!(source.next_kind(), PieceKind::T);
        assert_eq!(source.next_kind(), PieceKind::O);
    }

    #[test]
    fn test_scripted_kinds_empty_defaults_to_i() {
        let mut source = ScriptedKinds::new(&[]);
        assert_eq!(source.next_kind(), PieceKind::I);
    }
}
