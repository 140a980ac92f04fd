//! Binary entry point for the `unlz4r` command-line tool.
//!
//! # Control flow
//!
//! 1. [`parse_args`] reads argv through clap.
//! 2. `Args::into_plan` validates the flags against the environment and
//!    produces an [`Invocation`].
//! 3. [`run`] dispatches to the I/O layer and reports whether every input
//!    decoded cleanly.
//!
//! Exit status is 0 when every input decoded, 1 otherwise.

use std::process::ExitCode;

use unlz4r::cli::args::{parse_args, Destination, Invocation};
use unlz4r::cli::constants::{set_display_level, PROGRAM_NAME};
use unlz4r::io::{decompress_filename, decompress_multiple_filenames};
use unlz4r::{display, displaylevel};

/// Execute a resolved invocation. Returns `Ok(false)` when at least one
/// input failed or was skipped; per-file errors are already reported.
fn run(inv: Invocation) -> anyhow::Result<bool> {
    set_display_level(inv.display_level);
    displaylevel!(
        3,
        "*** {} v{} {}-bit, LZ4 frame decoder ***\n",
        PROGRAM_NAME,
        unlz4r::VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8
    );
    displaylevel!(
        4,
        "checksum verification {}, {} worker(s)\n",
        if inv.prefs.verify_checksums { "enabled" } else { "disabled" },
        inv.prefs.nb_workers
    );

    match &inv.destination {
        Destination::File(out) => {
            Ok(decompress_filename(&inv.inputs[0], out, &inv.prefs).is_ok())
        }
        dest => {
            let summary = decompress_multiple_filenames(&inv.inputs, dest.suffix(), &inv.prefs)?;
            if !summary.is_success() {
                displaylevel!(
                    1,
                    "{} file(s) could not be decoded; {} file(s) skipped\n",
                    summary.failed_files,
                    summary.skipped_files
                );
            }
            Ok(summary.is_success())
        }
    }
}

fn main() -> ExitCode {
    match parse_args().into_plan().and_then(run) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            display!("{}: {:#}\n", PROGRAM_NAME, e);
            ExitCode::FAILURE
        }
    }
}
