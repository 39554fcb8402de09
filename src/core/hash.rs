//! State Hashing for Verification
//!
//! Provides deterministic hashing of match state for replay validation.

use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for match state.
///
/// Wraps SHA-256 with helpers for the primitive types the scoreboard uses.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for match state.
    pub fn for_match_state() -> Self {
        Self::new(b"HAND_CRICKET_STATE_V1")
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Update with a length-prefixed string.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.update_u32(value.len() as u32);
        self.update_bytes(value.as_bytes());
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute state hash for match verification.
///
/// This function is called by `MatchState::compute_hash()`.
/// The parameter is a closure that adds state-specific data.
pub fn compute_state_hash<F>(deliveries: u32, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_match_state();

    // Always hash the delivery counter first
    hasher.update_u32(deliveries);

    add_state(&mut hasher);

    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_determinism() {
        let a = compute_state_hash(7, |h| {
            h.update_str("India");
            h.update_u32(42);
        });
        let b = compute_state_hash(7, |h| {
            h.update_str("India");
            h.update_u32(42);
        });

        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_sensitive_to_order_and_counter() {
        let base = compute_state_hash(1, |h| {
            h.update_u8(1);
            h.update_u8(2);
        });
        let swapped = compute_state_hash(1, |h| {
            h.update_u8(2);
            h.update_u8(1);
        });
        let other_counter = compute_state_hash(2, |h| {
            h.update_u8(1);
            h.update_u8(2);
        });

        assert_ne!(base, swapped);
        assert_ne!(base, other_counter);
    }

    #[test]
    fn test_length_prefix_separates_strings() {
        let a = compute_state_hash(0, |h| {
            h.update_str("ab");
            h.update_str("c");
        });
        let b = compute_state_hash(0, |h| {
            h.update_str("a");
            h.update_str("bc");
        });

        assert_ne!(a, b);
    }
}
