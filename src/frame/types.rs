//! LZ4 frame format constants, descriptor types, decoder state, and errors.
//!
//! Covers:
//! - Wire-format constants (magic number, block header flag, field sizes)
//! - [`BlockMaxSize`]: the block-size ceiling encoded in the BD byte
//! - [`FrameDescriptor`]: everything the header tells the decoder
//! - [`FrameState`]: the decoder lifecycle
//! - [`FrameError`] with `Display` + `Error` impls and `io::Error` conversions

use core::fmt;
use std::io;

use crate::block::BlockError;

// ─────────────────────────────────────────────────────────────────────────────
// Frame format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Frame magic number; appears on the wire as `04 22 4D 18`.
pub const LZ4F_MAGICNUMBER: u32 = 0x184D_2204;

/// High bit of a block header: the block payload is stored uncompressed.
pub const LZ4F_BLOCKUNCOMPRESSED_FLAG: u32 = 0x8000_0000;

/// Magic number + FLG + BD, read unconditionally at the start of a frame.
pub const HEADER_PREFIX_SIZE: usize = 6;

/// Optional content-size field following BD.
pub const CONTENT_SIZE_FIELD_SIZE: usize = 8;

/// Header checksum byte closing the frame descriptor.
pub const HEADER_CHECKSUM_SIZE: usize = 1;

/// Block header size in bytes (payload length + uncompressed flag).
pub const BH_SIZE: usize = 4;

/// Block footer (checksum) size in bytes, present when block checksums are enabled.
pub const BF_SIZE: usize = 4;

/// Content checksum size in bytes, following the end marker when enabled.
pub const CONTENT_CHECKSUM_SIZE: usize = 4;

/// FLG bits 6-7 must hold this value.
pub const FLG_VERSION: u8 = 0x40;
pub const FLG_VERSION_MASK: u8 = 0xC0;
pub const FLG_BLOCK_INDEPENDENCE: u8 = 0x20;
pub const FLG_BLOCK_CHECKSUM: u8 = 0x10;
pub const FLG_CONTENT_SIZE: u8 = 0x08;
pub const FLG_CONTENT_CHECKSUM: u8 = 0x04;

/// BD bits 4-6 hold the block-max-size code.
pub const BD_BLOCK_MAX_SIZE_MASK: u8 = 0x70;

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

// ─────────────────────────────────────────────────────────────────────────────
// Block maximum size
// ─────────────────────────────────────────────────────────────────────────────

/// Block-size ceiling declared by a frame. Fixes the output buffer capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BlockMaxSize {
    Max64Kb = 4,
    Max256Kb = 5,
    Max1Mb = 6,
    /// Also used for every code outside 4..=7.
    #[default]
    Max4Mb = 7,
}

impl BlockMaxSize {
    /// Decode the BD byte. Codes outside 4..=7 fall back to 4 MiB.
    pub fn from_bd(bd: u8) -> Self {
        match (bd & BD_BLOCK_MAX_SIZE_MASK) >> 4 {
            4 => BlockMaxSize::Max64Kb,
            5 => BlockMaxSize::Max256Kb,
            6 => BlockMaxSize::Max1Mb,
            _ => BlockMaxSize::Max4Mb,
        }
    }

    /// Capacity in bytes.
    pub const fn size_bytes(self) -> usize {
        match self {
            BlockMaxSize::Max64Kb => 64 * KB,
            BlockMaxSize::Max256Kb => 256 * KB,
            BlockMaxSize::Max1Mb => MB,
            BlockMaxSize::Max4Mb => 4 * MB,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FrameDescriptor
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters decoded from a frame header. Immutable for the frame's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameDescriptor {
    /// Raw FLG byte.
    pub flg: u8,
    /// Raw BD byte.
    pub bd: u8,
    /// Blocks were written without cross-block back-references.
    pub block_independent: bool,
    /// A 4-byte checksum follows each block payload.
    pub block_checksum: bool,
    /// A 4-byte checksum follows the end marker.
    pub content_checksum: bool,
    /// Declared uncompressed size; `Some` iff the content-size flag is set.
    pub content_size: Option<u64>,
    /// Block-size ceiling from BD.
    pub block_max_size: BlockMaxSize,
    /// Header checksum byte as read from the stream.
    pub header_checksum: u8,
}

impl FrameDescriptor {
    /// Decode the flag fields of FLG and BD. Content size and header
    /// checksum are filled in once the trailing header bytes are read.
    pub fn from_flags(flg: u8, bd: u8) -> Self {
        FrameDescriptor {
            flg,
            bd,
            block_independent: flg & FLG_BLOCK_INDEPENDENCE != 0,
            block_checksum: flg & FLG_BLOCK_CHECKSUM != 0,
            content_checksum: flg & FLG_CONTENT_CHECKSUM != 0,
            content_size: None,
            block_max_size: BlockMaxSize::from_bd(bd),
            header_checksum: 0,
        }
    }

    /// Whether FLG announces the 8-byte content-size field.
    #[inline]
    pub fn has_content_size(&self) -> bool {
        self.flg & FLG_CONTENT_SIZE != 0
    }

    /// Output buffer capacity for this frame.
    #[inline]
    pub fn max_block_size(&self) -> usize {
        self.block_max_size.size_bytes()
    }

    /// Bytes following BD: optional content size, then the header checksum.
    #[inline]
    pub fn trailing_header_len(&self) -> usize {
        let content_size = if self.has_content_size() {
            CONTENT_SIZE_FIELD_SIZE
        } else {
            0
        };
        content_size + HEADER_CHECKSUM_SIZE
    }

    /// Total header length on the wire.
    #[inline]
    pub fn header_len(&self) -> usize {
        HEADER_PREFIX_SIZE + self.trailing_header_len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decoder lifecycle
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle of a [`FrameDecoder`](crate::frame::FrameDecoder).
///
/// `NotStarted → InFrame` once the header is consumed; `InFrame → Ended` at
/// the end marker; any state `→ Ended` on close or on a decoding error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameState {
    #[default]
    NotStarted,
    InFrame,
    Ended,
}

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors produced while decoding a frame. All of them are fatal for the
/// frame; the decoder does not attempt to resynchronise.
#[derive(Debug)]
pub enum FrameError {
    /// The first four bytes are not the frame magic number.
    BadMagic(u32),
    /// FLG version bits are not `01`. Holds the two-bit version field.
    UnsupportedVersion(u8),
    /// The source reached end-of-input in the middle of a field.
    TruncatedStream,
    /// A block header announces more bytes than the frame's block ceiling.
    BlockTooLarge { size: usize, max: usize },
    /// The block decompressor rejected a compressed block.
    Decompression(BlockError),
    /// Header checksum mismatch (only with checksum verification enabled).
    HeaderChecksumMismatch { expected: u8, actual: u8 },
    /// Block checksum mismatch (only with checksum verification enabled).
    BlockChecksumMismatch { expected: u32, actual: u32 },
    /// Content checksum mismatch (only with checksum verification enabled).
    ContentChecksumMismatch { expected: u32, actual: u32 },
    /// Decoded length differs from the declared content size
    /// (only with checksum verification enabled).
    ContentSizeMismatch { expected: u64, actual: u64 },
    /// The underlying source failed.
    Io(io::Error),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::BadMagic(magic) => {
                write!(f, "illegal LZ4 magic number: {magic:#010x}")
            }
            FrameError::UnsupportedVersion(v) => write!(f, "unsupported LZ4 frame version: {v}"),
            FrameError::TruncatedStream => write!(f, "stream ended prematurely"),
            FrameError::BlockTooLarge { size, max } => {
                write!(f, "block of {size} bytes exceeds the frame maximum of {max} bytes")
            }
            FrameError::Decompression(e) => write!(f, "{e}"),
            FrameError::HeaderChecksumMismatch { expected, actual } => write!(
                f,
                "header checksum mismatch: stored {expected:#04x}, computed {actual:#04x}"
            ),
            FrameError::BlockChecksumMismatch { expected, actual } => write!(
                f,
                "block checksum mismatch: stored {expected:#010x}, computed {actual:#010x}"
            ),
            FrameError::ContentChecksumMismatch { expected, actual } => write!(
                f,
                "content checksum mismatch: stored {expected:#010x}, computed {actual:#010x}"
            ),
            FrameError::ContentSizeMismatch { expected, actual } => write!(
                f,
                "content size mismatch: header declares {expected} bytes, decoded {actual}"
            ),
            FrameError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrameError::Decompression(e) => Some(e),
            FrameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BlockError> for FrameError {
    fn from(e: BlockError) -> Self {
        FrameError::Decompression(e)
    }
}

/// Recovers a `FrameError` that travelled through an `io::Error` (for
/// example out of the decoder's `Read` impl); wraps anything else as `Io`.
impl From<io::Error> for FrameError {
    fn from(err: io::Error) -> Self {
        if !err
            .get_ref()
            .is_some_and(|inner| inner.is::<FrameError>())
        {
            return FrameError::Io(err);
        }
        let kind = err.kind();
        match err.into_inner().map(|inner| inner.downcast::<FrameError>()) {
            Some(Ok(frame_err)) => *frame_err,
            Some(Err(other)) => FrameError::Io(io::Error::new(kind, other)),
            None => FrameError::Io(io::Error::from(kind)),
        }
    }
}

/// Truncation maps to `UnexpectedEof`, format and data errors to
/// `InvalidData`; the original `FrameError` stays reachable through
/// `io::Error::get_ref`.
impl From<FrameError> for io::Error {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Io(e) => e,
            truncated @ FrameError::TruncatedStream => {
                io::Error::new(io::ErrorKind::UnexpectedEof, truncated)
            }
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
