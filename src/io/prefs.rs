// prefs.rs: Preferences for file-level decompression.
//
// `Prefs` is a plain value type owned by the caller; the CLI builds one from
// its arguments and the library helpers in `crate::io` only read it.

use crate::config::{nb_workers_default, DecoderConfig};

// ---------------------------------------------------------------------------
// Preferences struct
// ---------------------------------------------------------------------------

/// Tunable parameters for decompressing files and streams.
#[derive(Clone, Debug)]
pub struct Prefs {
    /// Overwrite existing destination files. Default: false.
    pub overwrite: bool,
    /// Test mode: decode but discard output. Default: false.
    pub test_mode: bool,
    /// Remove the source file after a successful decode. Default: false.
    pub remove_src_file: bool,
    /// Copy the source's modification time and permissions onto the
    /// decoded file. Default: true.
    pub preserve_file_stat: bool,
    /// Verify header, block and content checksums and the declared content
    /// size. Default: false.
    pub verify_checksums: bool,
    /// Number of files decoded concurrently. Default: one per logical core.
    pub nb_workers: usize,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            overwrite: false,
            test_mode: false,
            remove_src_file: false,
            preserve_file_stat: true,
            verify_checksums: false,
            nb_workers: nb_workers_default(),
        }
    }
}

impl Prefs {
    /// Creates a new `Prefs` with all defaults applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame decoder configuration derived from these preferences.
    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig::new().verify_checksums(self.verify_checksums)
    }
}
