//! Seedable random number helpers.
//!
//! All sampling in the crate goes through a caller-supplied [`Rng`]; these
//! helpers only build reproducible generators and shuffle slices.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a fast, reproducible RNG from a 64-bit seed.
pub fn create_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Creates an RNG from the given seed, or from OS entropy when absent.
pub fn rng_from_seed(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Fisher-Yates shuffle in place.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}
