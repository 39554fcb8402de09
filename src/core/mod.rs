//! Core deterministic primitives.
//!
//! Randomness and hashing live here so the match logic above them stays
//! reproducible from a seed or a scripted sequence.

pub mod rng;
pub mod hash;

// Re-export core types
pub use rng::{DeterministicRng, RandomSource, ScriptedRandom};
pub use hash::{compute_state_hash, StateHash, StateHasher};
