// Frame builders shared by the frame decoder tests.

#![allow(dead_code)]

use unlz4r::frame::header_checksum;
use unlz4r::xxhash::xxh32_oneshot;

/// One stored block holding `"abcd\n"`, with a content checksum.
pub const SCENARIO_A: [u8; 24] = [
    0x04, 0x22, 0x4D, 0x18, 0x64, 0x40, 0xA7, 0x05, 0x00, 0x00, 0x80, 0x61, 0x62, 0x63, 0x64,
    0x0A, 0x00, 0x00, 0x00, 0x00, 0xFD, 0xC0, 0xE2, 0x70,
];

/// LZ4 block expanding to [`SCENARIO_B_TEXT`].
pub const SCENARIO_B_BLOCK: [u8; 26] = [
    0xF8, 0x01, 0x61, 0x61, 0x61, 0x61, 0x62, 0x62, 0x62, 0x62, 0x63, 0x63, 0x63, 0x63, 0x64,
    0x64, 0x64, 0x64, 0x10, 0x00, 0x50, 0x64, 0x64, 0x64, 0x64, 0x0A,
];

pub const SCENARIO_B_TEXT: &[u8] = b"aaaabbbbccccddddaaaabbbbccccdddd\n";

/// Scenario A's header followed by one compressed block and the matching
/// content checksum.
pub fn scenario_b() -> Vec<u8> {
    let mut frame = SCENARIO_A[..7].to_vec();
    frame.extend_from_slice(&(SCENARIO_B_BLOCK.len() as u32).to_le_bytes());
    frame.extend_from_slice(&SCENARIO_B_BLOCK);
    frame.extend_from_slice(&[0, 0, 0, 0]);
    frame.extend_from_slice(&[0x94, 0x5C, 0x06, 0x5C]);
    frame
}

pub enum Block<'a> {
    /// Stored verbatim with the uncompressed bit set.
    Stored(&'a [u8]),
    /// Plain bytes, compressed with lz4_flex.
    Compressed(&'a [u8]),
    /// A ready-made payload and the bytes it decodes to.
    Payload { payload: &'a [u8], decoded: &'a [u8] },
}

#[derive(Debug, Clone, Copy)]
pub struct FrameOpts {
    pub bd_code: u8,
    pub block_checksum: bool,
    pub content_checksum: bool,
    pub content_size: Option<u64>,
}

impl Default for FrameOpts {
    fn default() -> Self {
        FrameOpts {
            bd_code: 4,
            block_checksum: false,
            content_checksum: true,
            content_size: None,
        }
    }
}

pub fn header(opts: FrameOpts) -> Vec<u8> {
    let mut flg = 0x40 | 0x20;
    if opts.block_checksum {
        flg |= 0x10;
    }
    if opts.content_size.is_some() {
        flg |= 0x08;
    }
    if opts.content_checksum {
        flg |= 0x04;
    }
    let mut out = vec![0x04, 0x22, 0x4D, 0x18, flg, opts.bd_code << 4];
    if let Some(size) = opts.content_size {
        out.extend_from_slice(&size.to_le_bytes());
    }
    let hc = header_checksum(&out[4..]);
    out.push(hc);
    out
}

pub fn build_frame(opts: FrameOpts, blocks: &[Block<'_>]) -> Vec<u8> {
    let mut out = header(opts);
    let mut content = Vec::new();
    for block in blocks {
        let (word, payload) = match block {
            Block::Stored(data) => {
                content.extend_from_slice(data);
                (data.len() as u32 | 0x8000_0000, data.to_vec())
            }
            Block::Compressed(data) => {
                content.extend_from_slice(data);
                let payload = lz4_flex::block::compress(data);
                (payload.len() as u32, payload)
            }
            Block::Payload { payload, decoded } => {
                content.extend_from_slice(decoded);
                (payload.len() as u32, payload.to_vec())
            }
        };
        out.extend_from_slice(&word.to_le_bytes());
        out.extend_from_slice(&payload);
        if opts.block_checksum {
            out.extend_from_slice(&xxh32_oneshot(&payload, 0).to_le_bytes());
        }
    }
    out.extend_from_slice(&[0, 0, 0, 0]);
    if opts.content_checksum {
        out.extend_from_slice(&xxh32_oneshot(&content, 0).to_le_bytes());
    }
    out
}

/// Deterministic, moderately compressible text.
pub fn sample_text(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog; "
        .iter()
        .cycle()
        .zip((0u32..).map(|i| (i % 251) as u8))
        .map(|(c, n)| if n % 17 == 0 { b'\n' } else { *c })
        .take(len)
        .collect()
}
