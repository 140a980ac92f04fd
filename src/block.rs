//! LZ4 block decompression seam.
//!
//! The frame decoder never decodes LZ4 sequences itself. Every compressed
//! block is handed to a [`BlockDecompressor`], which receives the raw block
//! payload and an output slice whose length is the frame's maximum block
//! size. The default implementation, [`Lz4BlockDecompressor`], delegates to
//! the safe decoder in `lz4_flex`.
//!
//! Any `Fn(&[u8], &mut [u8]) -> Result<usize, BlockError>` closure is also a
//! `BlockDecompressor`, which lets callers plug in an instrumented or
//! alternative block decoder without defining a type.

use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// A compressed block could not be decoded.
///
/// Covers malformed sequences, truncated input, out-of-range match offsets,
/// and output that would not fit in the destination slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockError {
    detail: String,
}

impl BlockError {
    /// Build an error for a block rejected as corrupt or malformed.
    pub fn malformed(detail: impl Into<String>) -> Self {
        BlockError {
            detail: detail.into(),
        }
    }

    /// Human-readable reason reported by the block decoder.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed LZ4 block: {}", self.detail)
    }
}

impl std::error::Error for BlockError {}

// ─────────────────────────────────────────────────────────────────────────────
// Decompressor trait
// ─────────────────────────────────────────────────────────────────────────────

/// Decodes a single LZ4 block.
pub trait BlockDecompressor {
    /// Decompress the block in `src` into `dst`.
    ///
    /// `dst.len()` is the maximum number of bytes the block may expand to.
    /// Returns the number of bytes written at the start of `dst`.
    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, BlockError>;
}

impl<F> BlockDecompressor for F
where
    F: Fn(&[u8], &mut [u8]) -> Result<usize, BlockError>,
{
    #[inline]
    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, BlockError> {
        self(src, dst)
    }
}

/// Default block decoder backed by `lz4_flex`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4BlockDecompressor;

impl BlockDecompressor for Lz4BlockDecompressor {
    #[inline]
    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, BlockError> {
        lz4_flex::block::decompress_into(src, dst).map_err(|e| BlockError::malformed(e.to_string()))
    }
}
