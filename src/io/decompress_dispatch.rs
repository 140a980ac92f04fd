//! File-level decompression entry points.
//!
//! - [`decompress_filename`] decodes one source into one destination.
//! - [`decompress_multiple_filenames`] decodes a list of sources, deriving
//!   each destination by stripping a suffix (e.g. `.lz4`). Files are spread
//!   over a rayon pool sized by `Prefs::nb_workers`; when every file goes to
//!   stdout the list is processed in order on the calling thread instead.
//!
//! Partial outputs of a failed decode are removed. On success the source's
//! modification time and permissions are copied onto the output, and the
//! source is removed when `Prefs::remove_src_file` is set.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use rayon::prelude::*;

use crate::io::decompress_frame::decompress_stream;
use crate::io::file_io::{
    is_dev_null, is_stdin, is_stdout, open_dst_file, open_src_file, output_filename, NUL_MARK,
    STDOUT_MARK,
};
use crate::io::prefs::Prefs;
use crate::util::{copy_file_stat, is_reg_file};

// ---------------------------------------------------------------------------
// Public stats
// ---------------------------------------------------------------------------

/// Statistics returned by [`decompress_filename`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecompressStats {
    /// Total number of decompressed bytes written to the output.
    pub decompressed_bytes: u64,
    /// Number of frames decoded from the source.
    pub frames: u64,
}

/// Outcome of [`decompress_multiple_filenames`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub decoded_files: usize,
    pub failed_files: usize,
    pub skipped_files: usize,
    pub decompressed_bytes: u64,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed_files == 0 && self.skipped_files == 0
    }
}

// ---------------------------------------------------------------------------
// Single file
// ---------------------------------------------------------------------------

/// Decompress `src` into `dst`.
///
/// In test mode the output is discarded whatever `dst` says. `src` may be
/// [`crate::io::STDIN_MARK`]; `dst` may be [`STDOUT_MARK`] or [`NUL_MARK`].
pub fn decompress_filename(src: &str, dst: &str, prefs: &Prefs) -> io::Result<DecompressStats> {
    let dst = if prefs.test_mode { NUL_MARK } else { dst };

    let mut input = open_src_file(src)?;
    let mut output = open_dst_file(dst, prefs)?;

    let result = decompress_stream(&mut input, &mut output, prefs.decoder_config())
        .and_then(|stats| output.flush().map(|()| stats));
    let created = output.path.take();
    drop(output);

    let stats = match result {
        Ok(stats) => stats,
        Err(e) => {
            crate::displaylevel!(1, "Error decoding {} : {}\n", src, e);
            if let Some(path) = created {
                if let Err(rm) = fs::remove_file(&path) {
                    crate::displaylevel!(2, "could not remove {} : {}\n", path.display(), rm);
                }
            }
            return Err(e);
        }
    };

    if prefs.preserve_file_stat && !is_stdin(src) {
        if let Some(path) = created.as_deref() {
            if let Err(e) = copy_file_stat(Path::new(src), path) {
                crate::displaylevel!(2, "{}: could not copy file attributes: {}\n", dst, e);
            }
        }
    }

    if prefs.remove_src_file && !prefs.test_mode && !is_stdin(src) && is_reg_file(Path::new(src)) {
        fs::remove_file(src).map_err(|e| {
            crate::displaylevel!(1, "Remove error : {}: {}\n", src, e);
            e
        })?;
    }

    crate::displaylevel!(2, "{:<30}: decoded {} bytes \n", src, stats.decoded_bytes);
    Ok(DecompressStats {
        decompressed_bytes: stats.decoded_bytes,
        frames: stats.frames,
    })
}

// ---------------------------------------------------------------------------
// Multiple files
// ---------------------------------------------------------------------------

enum Job<'a> {
    Decode { src: &'a str, dst: String },
    Skip,
}

fn plan_job<'a>(src: &'a str, suffix: &str) -> Job<'a> {
    if is_stdout(suffix) || is_dev_null(suffix) {
        return Job::Decode {
            src,
            dst: suffix.to_string(),
        };
    }
    match output_filename(src, suffix) {
        Ok(dst) => Job::Decode { src, dst },
        Err(_) => {
            crate::displaylevel!(
                1,
                "File extension doesn't match expected extension ({}); will not process file: {}\n",
                suffix,
                src
            );
            Job::Skip
        }
    }
}

fn run_job(job: Job<'_>, prefs: &Prefs) -> Option<io::Result<DecompressStats>> {
    match job {
        Job::Decode { src, dst } => Some(decompress_filename(src, &dst, prefs)),
        Job::Skip => None,
    }
}

/// Decompress every file in `srcs`.
///
/// `suffix` is either an extension stripped from each source name to form
/// its destination, or one of [`STDOUT_MARK`] / [`NUL_MARK`] to send every
/// file there. Per-file failures are reported and counted; the call only
/// fails outright when the worker pool cannot be built.
pub fn decompress_multiple_filenames(
    srcs: &[String],
    suffix: &str,
    prefs: &Prefs,
) -> io::Result<BatchSummary> {
    let results: Vec<Option<io::Result<DecompressStats>>> =
        if suffix == STDOUT_MARK || prefs.nb_workers <= 1 || srcs.len() <= 1 {
            srcs.iter()
                .map(|src| run_job(plan_job(src, suffix), prefs))
                .collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(prefs.nb_workers)
                .build()
                .map_err(io::Error::other)?;
            crate::displaylevel!(4, "decoding {} files with {} workers\n", srcs.len(), prefs.nb_workers);
            pool.install(|| {
                srcs.par_iter()
                    .map(|src| run_job(plan_job(src, suffix), prefs))
                    .collect()
            })
        };

    let mut summary = BatchSummary::default();
    for result in results {
        match result {
            Some(Ok(stats)) => {
                summary.decoded_files += 1;
                summary.decompressed_bytes += stats.decompressed_bytes;
            }
            Some(Err(_)) => summary.failed_files += 1,
            None => summary.skipped_files += 1,
        }
    }

    if srcs.len() > 1 {
        crate::displaylevel!(
            2,
            "{} files decoded : {} bytes total\n",
            summary.decoded_files,
            summary.decompressed_bytes
        );
    }
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
