use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Derives a deterministic child seed from the world's root seed, a stable
/// subsystem label, and a day/index pair.
///
/// Mirrors the teacher crate's pattern of reseeding a fresh `StdRng` per
/// operation (`Airport::generate_random`, `Order::new`) rather than carrying
/// live RNG state: every subsystem reconstructs its stream on demand from
/// `(root_seed, label, day, index)`, so nothing but the root seed ever needs
/// to be persisted for a bit-identical replay.
pub fn derive_seed(root_seed: u64, label: &str, day: u64, index: u64) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    label.hash(&mut hasher);
    day.hash(&mut hasher);
    index.hash(&mut hasher);
    root_seed.wrapping_add(hasher.finish())
}

/// Convenience wrapper: build the `StdRng` for a given subsystem/day/index.
pub fn child_rng(root_seed: u64, label: &str, day: u64, index: u64) -> StdRng {
    StdRng::seed_from_u64(derive_seed(root_seed, label, day, index))
}
