//! Frame header parsing and the byte-level read helpers it relies on.
//!
//! Covers:
//! - LE read helpers (`read_le32`, `read_le64`)
//! - [`read_fully`]: the only place short reads of the source are handled
//! - [`header_checksum`]: the descriptor checksum byte
//! - [`decode_prefix`]: magic/version validation and FLG/BD decoding
//! - [`read_frame_header`]: reads a complete header from a source

use std::io::{self, Read};

use crate::frame::types::{
    FrameDescriptor, FrameError, FLG_VERSION, FLG_VERSION_MASK, HEADER_PREFIX_SIZE,
    LZ4F_MAGICNUMBER,
};
use crate::xxhash::{xxh32_oneshot, LZ4F_XXH_SEED};

/// Largest header: prefix + content size + header checksum.
const MAX_HEADER_SIZE: usize = 15;

// ─────────────────────────────────────────────────────────────────────────────
// Byte-order helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Read a little-endian `u32` from `src` at byte `offset`.
#[inline]
pub fn read_le32(src: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        src[offset],
        src[offset + 1],
        src[offset + 2],
        src[offset + 3],
    ])
}

/// Read a little-endian `u64` from `src` at byte `offset`.
#[inline]
pub fn read_le64(src: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&src[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}

// ─────────────────────────────────────────────────────────────────────────────
// Fully-fills-buffer helper
// ─────────────────────────────────────────────────────────────────────────────

/// Fill `dst` completely from `src`, looping over partial reads.
///
/// `Interrupted` reads are retried. End-of-input before `dst` is full yields
/// [`FrameError::TruncatedStream`]; any other I/O failure is returned as
/// [`FrameError::Io`].
pub fn read_fully<R: Read + ?Sized>(src: &mut R, dst: &mut [u8]) -> Result<(), FrameError> {
    let mut filled = 0;
    while filled < dst.len() {
        match src.read(&mut dst[filled..]) {
            Ok(0) => return Err(FrameError::TruncatedStream),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FrameError::Io(e)),
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Header checksum
// ─────────────────────────────────────────────────────────────────────────────

/// Header checksum over the descriptor bytes (FLG through the last byte
/// before the checksum): second byte of their XXH32 digest.
#[inline]
pub fn header_checksum(descriptor: &[u8]) -> u8 {
    ((xxh32_oneshot(descriptor, LZ4F_XXH_SEED) >> 8) & 0xFF) as u8
}

// ─────────────────────────────────────────────────────────────────────────────
// Header decoding
// ─────────────────────────────────────────────────────────────────────────────

/// Validate the 6-byte header prefix (magic, FLG, BD) and decode its flags.
///
/// Fails with [`FrameError::BadMagic`] when the magic number does not match
/// and [`FrameError::UnsupportedVersion`] when FLG bits 6-7 are not `01`.
/// Reserved bits and the dictionary-ID flag are ignored.
pub fn decode_prefix(prefix: &[u8; HEADER_PREFIX_SIZE]) -> Result<FrameDescriptor, FrameError> {
    let magic = read_le32(prefix, 0);
    if magic != LZ4F_MAGICNUMBER {
        return Err(FrameError::BadMagic(magic));
    }

    let flg = prefix[4];
    if flg & FLG_VERSION_MASK != FLG_VERSION {
        return Err(FrameError::UnsupportedVersion(flg >> 6));
    }

    Ok(FrameDescriptor::from_flags(flg, prefix[5]))
}

/// Read a complete frame header from `src`.
///
/// Reads the 6-byte prefix, then the optional 8-byte content size and the
/// header checksum byte. The checksum is compared against the descriptor
/// only when `verify_checksum` is set; otherwise it is consumed unchecked.
pub fn read_frame_header<R: Read + ?Sized>(
    src: &mut R,
    verify_checksum: bool,
) -> Result<FrameDescriptor, FrameError> {
    let mut header = [0u8; MAX_HEADER_SIZE];

    let mut prefix = [0u8; HEADER_PREFIX_SIZE];
    read_fully(src, &mut prefix)?;
    let mut descriptor = decode_prefix(&prefix)?;
    header[..HEADER_PREFIX_SIZE].copy_from_slice(&prefix);

    let header_len = descriptor.header_len();
    read_fully(src, &mut header[HEADER_PREFIX_SIZE..header_len])?;

    if descriptor.has_content_size() {
        descriptor.content_size = Some(read_le64(&header, HEADER_PREFIX_SIZE));
    }
    descriptor.header_checksum = header[header_len - 1];

    if verify_checksum {
        // Checksum covers FLG .. last byte before the checksum itself.
        let computed = header_checksum(&header[4..header_len - 1]);
        if computed != descriptor.header_checksum {
            return Err(FrameError::HeaderChecksumMismatch {
                expected: descriptor.header_checksum,
                actual: computed,
            });
        }
    }

    Ok(descriptor)
}
