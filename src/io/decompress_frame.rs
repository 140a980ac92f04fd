// decompress_frame.rs: Decoding LZ4 frame streams into a writer.
//
// A stream is one or more frames laid end to end, as produced by
// concatenating `.lz4` files. Each frame gets its own `FrameDecoder`
// borrowing the source; because the decoder never reads past a frame's end
// marker, the source is positioned on the next frame (or at end-of-input)
// once a decoder finishes.

use std::io::{self, BufRead, Read, Write};

use crate::block::BlockDecompressor;
use crate::config::DecoderConfig;
use crate::frame::{FrameDecoder, FrameError};

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Totals for one decoded stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Frames decoded.
    pub frames: u64,
    /// Decoded bytes written to the destination.
    pub decoded_bytes: u64,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Decodes every frame in `src` into `dst` until `src` is exhausted.
///
/// At least one frame is required: an empty source fails with a truncation
/// error. Data after a complete frame that does not start a new frame fails
/// with the decoder's `BadMagic` error.
///
/// # Errors
///
/// I/O failures on either side, and every [`FrameError`], wrapped in
/// `io::Error` (recoverable with `FrameError::from`).
pub fn decompress_stream<R, W>(src: &mut R, dst: &mut W, config: DecoderConfig) -> io::Result<DecodeStats>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let mut stats = DecodeStats::default();
    loop {
        {
            let mut decoder = FrameDecoder::with_config(&mut *src, config);
            match copy_frame(&mut decoder, dst) {
                Ok(n) => {
                    stats.frames += 1;
                    stats.decoded_bytes += n;
                    crate::displaylevel!(4, "frame {} : {} bytes decoded\n", stats.frames, n);
                }
                Err(e) => {
                    if stats.frames > 0 && is_bad_magic(&e) {
                        crate::displaylevel!(
                            2,
                            "Stream followed by undecodable data after {} frame(s)\n",
                            stats.frames
                        );
                    }
                    return Err(e);
                }
            }
        }
        if src.fill_buf()?.is_empty() {
            break;
        }
    }
    dst.flush()?;
    Ok(stats)
}

/// [`decompress_stream`] with the default configuration.
pub fn decompress_stream_default<R, W>(src: &mut R, dst: &mut W) -> io::Result<DecodeStats>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    decompress_stream(src, dst, DecoderConfig::default())
}

/// Drain one frame's decoded content into `dst`, returning bytes written.
pub fn copy_frame<R, D, W>(decoder: &mut FrameDecoder<R, D>, dst: &mut W) -> io::Result<u64>
where
    R: Read,
    D: BlockDecompressor,
    W: Write + ?Sized,
{
    let mut total = 0u64;
    loop {
        let chunk = decoder.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        dst.write_all(chunk)?;
        let n = chunk.len();
        decoder.consume(n);
        total += n as u64;
    }
    Ok(total)
}

fn is_bad_magic(err: &io::Error) -> bool {
    matches!(
        err.get_ref().and_then(|inner| inner.downcast_ref::<FrameError>()),
        Some(FrameError::BadMagic(_))
    )
}
