//! `unlz4r`: streaming decoder for the LZ4 frame format.
//!
//! The core is [`FrameDecoder`], a pull-based reader that turns one LZ4
//! frame from any [`std::io::Read`] source into its decoded bytes. Block
//! payloads are handed to a [`BlockDecompressor`]; the default
//! [`Lz4BlockDecompressor`] is backed by `lz4_flex`.
//!
//! [`io`] layers concatenated-frame streams and file handling on top, and
//! [`cli`] holds the argument surface of the `unlz4r` binary.
//!
//! ```
//! use std::io::Read;
//! use unlz4r::FrameDecoder;
//!
//! let frame = [
//!     0x04, 0x22, 0x4D, 0x18, 0x64, 0x40, 0xA7, 0x05, 0x00, 0x00, 0x80, 0x61, 0x62, 0x63,
//!     0x64, 0x0A, 0x00, 0x00, 0x00, 0x00, 0xFD, 0xC0, 0xE2, 0x70,
//! ];
//! let mut out = String::new();
//! FrameDecoder::new(&frame[..]).read_to_string(&mut out).unwrap();
//! assert_eq!(out, "abcd\n");
//! ```

pub mod block;
pub mod cli;
pub mod config;
pub mod frame;
pub mod io;
pub mod util;
pub mod xxhash;

pub use block::{BlockDecompressor, BlockError, Lz4BlockDecompressor};
pub use config::DecoderConfig;
pub use frame::{
    decompress_frame_to_vec, BlockMaxSize, FrameDecoder, FrameDescriptor, FrameError, FrameState,
};

/// Crate version, as recorded in Cargo.toml.
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");
