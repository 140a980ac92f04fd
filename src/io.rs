//! File and stream decompression built on [`crate::frame::FrameDecoder`].
//!
//! This module assembles the I/O sub-modules and re-exports the symbols
//! consumed by the CLI and library users.

pub mod decompress_dispatch;
pub mod decompress_frame;
pub mod file_io;
pub mod prefs;

// ── Core type re-exports ─────────────────────────────────────────────────────
pub use prefs::Prefs;

// ── Special I/O sentinels ────────────────────────────────────────────────────
pub use file_io::{NUL_MARK, STDIN_MARK, STDOUT_MARK};

// ── Stream decoding ──────────────────────────────────────────────────────────
/// Decode every concatenated frame of a buffered source into a writer.
pub use decompress_frame::{decompress_stream, decompress_stream_default, DecodeStats};

// ── File decoding ────────────────────────────────────────────────────────────
/// Decompress a single file.
pub use decompress_dispatch::decompress_filename;

/// Decompress multiple files with a given suffix.
pub use decompress_dispatch::decompress_multiple_filenames;

pub use decompress_dispatch::{BatchSummary, DecompressStats};

pub use file_io::output_filename;
