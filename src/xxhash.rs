//! XXH32 helpers used by optional frame checksum verification.
//!
//! The LZ4 frame format protects three regions with XXH32 (seed 0): the
//! frame descriptor (second byte of the digest), each block payload as
//! stored, and the full decoded content. All three go through the
//! `xxhash-rust` implementation re-exported here.

pub use xxhash_rust::xxh32::Xxh32 as Xxh32State;

/// Seed used by every checksum in the LZ4 frame format.
pub const LZ4F_XXH_SEED: u32 = 0;

/// One-shot XXH32 digest of `data`.
#[inline]
pub fn xxh32_oneshot(data: &[u8], seed: u32) -> u32 {
    xxhash_rust::xxh32::xxh32(data, seed)
}

/// Fresh streaming state for the content checksum.
#[inline]
pub fn content_hasher() -> Xxh32State {
    Xxh32State::new(LZ4F_XXH_SEED)
}
