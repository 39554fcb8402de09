//! Deterministic Random Number Generation
//!
//! Every random draw the match engine makes (coin toss, opponent number)
//! goes through the [`RandomSource`] capability, so a match can be replayed
//! exactly from a seed or driven by a scripted sequence in tests.

use serde::{Serialize, Deserialize};
use sha2::{Sha256, Digest};

/// Source of randomness consumed by the match controller.
pub trait RandomSource {
    /// Draw one uniform random bit.
    fn coin_flip(&mut self) -> bool;

    /// Draw a uniform integer in range [min, max].
    fn next_int_range(&mut self, min: i32, max: i32) -> i32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn coin_flip(&mut self) -> bool {
        (**self).coin_flip()
    }

    fn next_int_range(&mut self, min: i32, max: i32) -> i32 {
        (**self).next_int_range(min, max)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn coin_flip(&mut self) -> bool {
        (**self).coin_flip()
    }

    fn next_int_range(&mut self, min: i32, max: i32) -> i32 {
        (**self).next_int_range(min, max)
    }
}

/// Deterministic PRNG using Xorshift128+ algorithm.
///
/// Given the same seed, this RNG produces the exact same sequence on any
/// platform.
///
/// # Example
///
/// ```
/// use hand_cricket::core::rng::{DeterministicRng, RandomSource};
///
/// let mut a = DeterministicRng::new(12345);
/// let mut b = DeterministicRng::new(12345);
/// assert_eq!(a.next_int_range(1, 6), b.next_int_range(1, 6));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random integer in range [0, max).
    #[inline]
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Modulo bias is negligible for the tiny ranges used here
        (self.next_u64() % max as u64) as u32
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> [u64; 2] {
        self.state
    }

    /// Restore from saved state.
    pub fn set_state(&mut self, state: [u64; 2]) {
        self.state = state;
    }
}

impl RandomSource for DeterministicRng {
    #[inline]
    fn coin_flip(&mut self) -> bool {
        // Top bit; the low bit of xorshift+ is the weakest
        self.next_u64() >> 63 == 1
    }

    #[inline]
    fn next_int_range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        // Widened: the full i32 span does not fit in u32
        let range = (max as i64 - min as i64 + 1) as u64;
        (min as i64 + (self.next_u64() % range) as i64) as i32
    }
}

/// Fixed-sequence random source for tests and replays.
///
/// Coin flips and integers are served from two independent scripts. Each
/// script cycles once exhausted; an empty script yields `false` / `min`.
/// Scripted integers are clamped into the requested range.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScriptedRandom {
    coins: Vec<bool>,
    ints: Vec<i32>,
    coin_cursor: usize,
    int_cursor: usize,
}

impl ScriptedRandom {
    /// Create a script from coin results and integer draws.
    pub fn new(coins: Vec<bool>, ints: Vec<i32>) -> Self {
        Self {
            coins,
            ints,
            coin_cursor: 0,
            int_cursor: 0,
        }
    }

    /// Script only coin results.
    pub fn with_coins(coins: Vec<bool>) -> Self {
        Self::new(coins, Vec::new())
    }

    /// Script only integer draws.
    pub fn with_ints(ints: Vec<i32>) -> Self {
        Self::new(Vec::new(), ints)
    }

    /// Number of coin flips served so far.
    pub fn coins_drawn(&self) -> usize {
        self.coin_cursor
    }

    /// Number of integers served so far.
    pub fn ints_drawn(&self) -> usize {
        self.int_cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn coin_flip(&mut self) -> bool {
        if self.coins.is_empty() {
            return false;
        }
        let value = self.coins[self.coin_cursor % self.coins.len()];
        self.coin_cursor += 1;
        value
    }

    fn next_int_range(&mut self, min: i32, max: i32) -> i32 {
        if self.ints.is_empty() || min >= max {
            return min;
        }
        let value = self.ints[self.int_cursor % self.ints.len()];
        self.int_cursor += 1;
        value.clamp(min, max)
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive a match seed from the match id and the two team names.
///
/// Team names are hashed in the order given (player 1 first).
pub fn derive_match_seed(match_id: &[u8; 16], team_names: &[&str]) -> u64 {
    let mut hasher = Sha256::new();

    // Domain separator
    hasher.update(b"HAND_CRICKET_SEED_V1");
    hasher.update(match_id);

    for name in team_names {
        hasher.update((name.len() as u32).to_le_bytes());
        hasher.update(name.as_bytes());
    }

    let hash = hasher.finalize();
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&hash[0..8]);
    u64::from_le_bytes(seed)
}

// =============================================================================
// TESTS
// =============================================================================
