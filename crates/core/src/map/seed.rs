//! Deterministic seed mixing and uniform draws for map generation.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub(crate) const STREAM_ROOM_X: u64 = 1;
pub(crate) const STREAM_ROOM_Y: u64 = 2;
pub(crate) const STREAM_ROOM_DIMENSION: u64 = 3;

/// Uniform draw in the inclusive range `[min_value, max_value]`.
pub(crate) fn random_in_range(rng: &mut ChaCha8Rng, min_value: i32, max_value: i32) -> i32 {
    debug_assert!(min_value <= max_value);
    let range_size = (i64::from(max_value) - i64::from(min_value) + 1) as u64;
    (i64::from(min_value) + (rng.next_u64() % range_size) as i64) as i32
}

/// Uniform index in `0..len`. `len` must be non-zero.
pub(crate) fn random_index(rng: &mut ChaCha8Rng, len: usize) -> usize {
    debug_assert!(len > 0);
    (rng.next_u64() % len as u64) as usize
}

/// Child generator for one independent stream, seeded from the parent's next draw.
pub(crate) fn split_stream(rng: &mut ChaCha8Rng, stream: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(mix_seed_stream(rng.next_u64(), stream))
}

pub(crate) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}
