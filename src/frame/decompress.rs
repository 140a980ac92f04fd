//! Incremental LZ4 frame decoder.
//!
//! [`FrameDecoder`] wraps any [`Read`] source and exposes the decoded frame
//! content through [`Read`], [`BufRead`], and a handful of inherent methods
//! (`read_byte`, `skip`, `available`, `close`).
//!
//! # Decoding model
//!
//! The decoder is pull-based. Decoded bytes are served from a single output
//! buffer whose capacity is the frame's maximum block size; the buffer is
//! allocated once, when the header is parsed, and its content is replaced
//! wholesale by every refill. A refill parses the header if the frame has
//! not started yet, then exactly one block:
//!
//! - a zero block size is the end marker; the optional content checksum is
//!   consumed and the decoder enters [`FrameState::Ended`];
//! - a block with the high size bit set is stored and is read straight into
//!   the output buffer;
//! - any other block is read into a reusable scratch buffer and handed to
//!   the [`BlockDecompressor`].
//!
//! Once ended, the decoder never produces another byte, whatever remains in
//! the source. Every decoding error also ends the frame: the failed call
//! returns the error and later calls report end of frame. The source is left positioned right after the frame, so a
//! caller holding it by `&mut` can continue with a following frame.

use core::fmt;
use std::io::{self, BufRead, Read};

use crate::block::{BlockDecompressor, BlockError, Lz4BlockDecompressor};
use crate::config::DecoderConfig;
use crate::frame::header::{read_frame_header, read_fully};
use crate::frame::types::{
    FrameDescriptor, FrameError, FrameState, BF_SIZE, BH_SIZE, CONTENT_CHECKSUM_SIZE,
    LZ4F_BLOCKUNCOMPRESSED_FLAG,
};
use crate::xxhash::{content_hasher, xxh32_oneshot, Xxh32State, LZ4F_XXH_SEED};

// ─────────────────────────────────────────────────────────────────────────────
// FrameDecoder
// ─────────────────────────────────────────────────────────────────────────────

/// Pull-based decoder for a single LZ4 frame.
pub struct FrameDecoder<R, D = Lz4BlockDecompressor> {
    /// Underlying source; `None` once the decoder has been closed.
    inner: Option<R>,
    decompressor: D,
    config: DecoderConfig,
    state: FrameState,
    /// Set together with the `NotStarted → InFrame` transition.
    descriptor: Option<FrameDescriptor>,
    /// Output buffer, `max_block_size` bytes once the header is parsed.
    buffer: Vec<u8>,
    /// Next unread offset in `buffer`.
    cursor: usize,
    /// Valid bytes in `buffer`.
    len: usize,
    /// Compressed payload of the current block.
    scratch: Vec<u8>,
    /// Running content checksum; only maintained when verifying.
    content_hash: Option<Xxh32State>,
    decoded_bytes: u64,
    blocks: u64,
}

impl<R: Read> FrameDecoder<R> {
    /// Decoder with the default (permissive) configuration.
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, DecoderConfig::default())
    }

    pub fn with_config(inner: R, config: DecoderConfig) -> Self {
        Self::with_decompressor(inner, config, Lz4BlockDecompressor)
    }
}

impl<R: Read, D: BlockDecompressor> FrameDecoder<R, D> {
    /// Decoder that hands compressed blocks to `decompressor`.
    pub fn with_decompressor(inner: R, config: DecoderConfig, decompressor: D) -> Self {
        FrameDecoder {
            inner: Some(inner),
            decompressor,
            config,
            state: FrameState::NotStarted,
            descriptor: None,
            buffer: Vec::new(),
            cursor: 0,
            len: 0,
            scratch: Vec::new(),
            content_hash: None,
            decoded_bytes: 0,
            blocks: 0,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        self.state == FrameState::Ended
    }

    /// Header parameters, available once the frame has started.
    pub fn descriptor(&self) -> Option<&FrameDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Total bytes decoded so far, including bytes not yet read out.
    pub fn decoded_bytes(&self) -> u64 {
        self.decoded_bytes
    }

    /// Number of data blocks decoded so far.
    pub fn blocks(&self) -> u64 {
        self.blocks
    }

    /// The underlying source, or `None` after [`close`](Self::close).
    pub fn get_ref(&self) -> Option<&R> {
        self.inner.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut R> {
        self.inner.as_mut()
    }

    /// Give back the underlying source. Bytes already pulled from it stay
    /// consumed; after the end marker it is positioned right after the frame.
    pub fn into_inner(self) -> Option<R> {
        self.inner
    }

    // ── Byte-source surface ──────────────────────────────────────────────────

    /// Next decoded byte, or `None` at end of frame.
    pub fn read_byte(&mut self) -> Result<Option<u8>, FrameError> {
        if !self.ensure_data()? {
            return Ok(None);
        }
        let byte = self.buffer[self.cursor];
        self.cursor += 1;
        Ok(Some(byte))
    }

    /// Skip up to `n` decoded bytes.
    ///
    /// Refills at most once: a skip never crosses into the next block, so
    /// the return value is `min(n, bytes left in the current block)`.
    /// Returns 0 at end of frame.
    pub fn skip(&mut self, n: u64) -> Result<u64, FrameError> {
        if !self.ensure_data()? {
            return Ok(0);
        }
        let readable = self.len - self.cursor;
        let step = usize::try_from(n).map_or(readable, |n| n.min(readable));
        self.cursor += step;
        Ok(step as u64)
    }

    /// Decoded bytes that can be served without touching the source.
    pub fn available(&self) -> usize {
        if self.is_ended() {
            0
        } else {
            self.len - self.cursor
        }
    }

    /// Release the underlying source and end the frame.
    ///
    /// Valid in every state and idempotent.
    pub fn close(&mut self) {
        if self.inner.take().is_some() {
            crate::displaylevel!(4, "frame decoder closed after {} blocks\n", self.blocks);
        }
        self.state = FrameState::Ended;
        self.cursor = 0;
        self.len = 0;
    }

    // ── Refill state machine ─────────────────────────────────────────────────

    /// Make sure unread bytes are buffered. Returns `false` at end of frame.
    ///
    /// Blocks that decode to zero bytes are skipped, so `true` always means
    /// at least one byte is available.
    fn ensure_data(&mut self) -> Result<bool, FrameError> {
        while self.cursor >= self.len {
            if self.is_ended() {
                return Ok(false);
            }
            if let Err(err) = self.refill() {
                self.fail(&err);
                return Err(err);
            }
        }
        Ok(true)
    }

    /// Position in the source is unknown after an error, so the frame ends.
    fn fail(&mut self, err: &FrameError) {
        crate::displaylevel!(4, "frame decoding stopped after {} blocks: {}\n", self.blocks, err);
        self.state = FrameState::Ended;
        self.cursor = 0;
        self.len = 0;
    }

    /// Parse the header if needed, then decode exactly one block (or the
    /// end marker) into the output buffer.
    fn refill(&mut self) -> Result<(), FrameError> {
        let Some(src) = self.inner.as_mut() else {
            self.state = FrameState::Ended;
            return Ok(());
        };

        let descriptor = match self.descriptor {
            Some(descriptor) => descriptor,
            None => {
                let descriptor = read_frame_header(src, self.config.verify_checksums)?;
                crate::displaylevel!(
                    4,
                    "frame header: block max {} KB, block checksum {}, content size {:?}, content checksum {}\n",
                    descriptor.max_block_size() >> 10,
                    descriptor.block_checksum,
                    descriptor.content_size,
                    descriptor.content_checksum
                );
                self.buffer = vec![0u8; descriptor.max_block_size()];
                if self.config.verify_checksums && descriptor.content_checksum {
                    self.content_hash = Some(content_hasher());
                }
                self.descriptor = Some(descriptor);
                self.state = FrameState::InFrame;
                descriptor
            }
        };

        let mut block_header = [0u8; BH_SIZE];
        read_fully(src, &mut block_header)?;
        let raw_size = u32::from_le_bytes(block_header);
        let stored = raw_size & LZ4F_BLOCKUNCOMPRESSED_FLAG != 0;
        let size = (raw_size & !LZ4F_BLOCKUNCOMPRESSED_FLAG) as usize;

        // End marker.
        if size == 0 {
            let stored_checksum = if descriptor.content_checksum {
                let mut checksum = [0u8; CONTENT_CHECKSUM_SIZE];
                read_fully(src, &mut checksum)?;
                Some(u32::from_le_bytes(checksum))
            } else {
                None
            };
            self.cursor = 0;
            self.len = 0;
            self.state = FrameState::Ended;
            crate::displaylevel!(
                4,
                "end of frame: {} blocks, {} bytes decoded\n",
                self.blocks,
                self.decoded_bytes
            );
            if self.config.verify_checksums {
                self.verify_frame_end(&descriptor, stored_checksum)?;
            }
            return Ok(());
        }

        if size > self.buffer.len() {
            return Err(FrameError::BlockTooLarge {
                size,
                max: self.buffer.len(),
            });
        }

        // Stored blocks land directly in the output buffer.
        let payload: &[u8] = if stored {
            read_fully(src, &mut self.buffer[..size])?;
            &self.buffer[..size]
        } else {
            self.scratch.resize(size, 0);
            read_fully(src, &mut self.scratch)?;
            &self.scratch
        };

        if descriptor.block_checksum {
            let mut checksum = [0u8; BF_SIZE];
            read_fully(src, &mut checksum)?;
            if self.config.verify_checksums {
                let expected = u32::from_le_bytes(checksum);
                let actual = xxh32_oneshot(payload, LZ4F_XXH_SEED);
                if expected != actual {
                    return Err(FrameError::BlockChecksumMismatch { expected, actual });
                }
            }
        }

        let decoded = if stored {
            crate::displaylevel!(4, "load {} bytes, uncompressed.\n", size);
            size
        } else {
            let decoded = self
                .decompressor
                .decompress(&self.scratch, &mut self.buffer)
                .map_err(FrameError::Decompression)?;
            if decoded > self.buffer.len() {
                return Err(FrameError::Decompression(BlockError::malformed(format!(
                    "decompressor reported {} bytes for a {}-byte block buffer",
                    decoded,
                    self.buffer.len()
                ))));
            }
            crate::displaylevel!(4, "load {} bytes, lz4, decompressed to {} bytes.\n", size, decoded);
            decoded
        };

        if let Some(hash) = self.content_hash.as_mut() {
            hash.update(&self.buffer[..decoded]);
        }
        self.cursor = 0;
        self.len = decoded;
        self.decoded_bytes += decoded as u64;
        self.blocks += 1;
        Ok(())
    }

    /// Content checksum and content size checks at the end marker.
    fn verify_frame_end(
        &self,
        descriptor: &FrameDescriptor,
        stored_checksum: Option<u32>,
    ) -> Result<(), FrameError> {
        if let Some(expected) = descriptor.content_size {
            if expected != self.decoded_bytes {
                return Err(FrameError::ContentSizeMismatch {
                    expected,
                    actual: self.decoded_bytes,
                });
            }
        }
        if let (Some(expected), Some(hash)) = (stored_checksum, self.content_hash.as_ref()) {
            let actual = hash.digest();
            if expected != actual {
                return Err(FrameError::ContentChecksumMismatch { expected, actual });
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::io integration
// ─────────────────────────────────────────────────────────────────────────────

impl<R: Read, D: BlockDecompressor> Read for FrameDecoder<R, D> {
    /// Copies at most the rest of the current block; returns `Ok(0)` at end
    /// of frame. Decoding errors surface as `io::Error`s wrapping the
    /// [`FrameError`].
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if !self.ensure_data()? {
            return Ok(0);
        }
        let n = buf.len().min(self.len - self.cursor);
        buf[..n].copy_from_slice(&self.buffer[self.cursor..self.cursor + n]);
        self.cursor += n;
        Ok(n)
    }
}

impl<R: Read, D: BlockDecompressor> BufRead for FrameDecoder<R, D> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if !self.ensure_data()? {
            return Ok(&[]);
        }
        Ok(&self.buffer[self.cursor..self.len])
    }

    fn consume(&mut self, amt: usize) {
        self.cursor = (self.cursor + amt).min(self.len);
    }
}

impl<R, D> fmt::Debug for FrameDecoder<R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameDecoder")
            .field("state", &self.state)
            .field("descriptor", &self.descriptor)
            .field("cursor", &self.cursor)
            .field("len", &self.len)
            .field("decoded_bytes", &self.decoded_bytes)
            .field("closed", &self.inner.is_none())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot helper
// ─────────────────────────────────────────────────────────────────────────────

/// Decode the single frame at the start of `src` into a `Vec`.
///
/// Bytes after the frame's end marker are ignored.
pub fn decompress_frame_to_vec(src: &[u8]) -> Result<Vec<u8>, FrameError> {
    let mut decoder = FrameDecoder::new(src);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
