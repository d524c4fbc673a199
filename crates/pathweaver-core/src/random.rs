//! Seedable randomness shared by layout, clustering and journey generation

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG when `seed` is set, entropy-seeded otherwise
pub fn rng_from_seed(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
