//! LZ4 frame format: streaming decompression.
//!
//! Format reference: <https://github.com/lz4/lz4/blob/dev/doc/lz4_Frame_format.md>

pub mod decompress;
pub mod header;
pub mod types;

// Re-export key public API items at the module level.
pub use decompress::{decompress_frame_to_vec, FrameDecoder};
pub use header::{decode_prefix, header_checksum, read_frame_header, read_fully};
pub use types::{
    BlockMaxSize, FrameDescriptor, FrameError, FrameState, LZ4F_BLOCKUNCOMPRESSED_FLAG,
    LZ4F_MAGICNUMBER,
};
