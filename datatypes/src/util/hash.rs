use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Deterministic 32 bit hash of an 8 byte value.
pub(crate) fn hash_i64(value: i64) -> u32 {
    let mut hasher = FxHasher::default();
    hasher.write_i64(value);
    let hash = hasher.finish();
    (hash ^ (hash >> 32)) as u32
}

/// Hashes a float so that `0.0` and `-0.0` collide, matching `==`.
pub(crate) fn hash_f64(value: f64) -> u32 {
    let normalized = if value == 0.0 { 0.0_f64 } else { value };
    hash_i64(normalized.to_bits() as i64)
}
