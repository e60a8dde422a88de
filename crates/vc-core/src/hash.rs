//! Deterministic hashing helpers for candidate values.

use siphasher::sip::SipHasher13;
use std::hash::{Hash, Hasher};

/// Hashes a value with SipHash-1-3 under fixed zero keys.
///
/// Unlike `RandomState`, the result is stable across runs and platforms for
/// the same `Hash` implementation.
pub fn stable_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    value.hash(&mut hasher);
    hasher.finish()
}

/// Field-by-field hash accumulator for hand written hash functions.
///
/// Mirrors the classic `31 * result + field` recipe but feeds every field
/// into a single SipHash state instead.
#[derive(Debug, Clone)]
pub struct HashBuilder {
    hasher: SipHasher13,
}

impl HashBuilder {
    /// Starts a new accumulator.
    pub fn new() -> Self {
        Self {
            hasher: SipHasher13::new_with_keys(0, 0),
        }
    }

    /// Mixes one field into the hash.
    pub fn field<T: Hash + ?Sized>(mut self, value: &T) -> Self {
        value.hash(&mut self.hasher);
        self
    }

    /// Returns the accumulated hash.
    pub fn finish(&self) -> u64 {
        self.hasher.finish()
    }
}

impl Default for HashBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_matches_tuple_hash() {
        let built = HashBuilder::new().field(&707u16).field(&867u16).finish();
        let mut hasher = SipHasher13::new_with_keys(0, 0);
        707u16.hash(&mut hasher);
        867u16.hash(&mut hasher);
        assert_eq!(built, hasher.finish());
    }

    #[test]
    fn field_order_matters() {
        let a = HashBuilder::new().field("x").field("y").finish();
        let b = HashBuilder::new().field("y").field("x").finish();
        assert_ne!(a, b);
    }
}
