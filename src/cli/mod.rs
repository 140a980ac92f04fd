//! Command-line interface for the `unlz4r` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings and the shared display level (`DISPLAY_LEVEL`, `displaylevel!`). |
//! | [`args`]      | clap argument surface and its resolution into an [`args::Invocation`]. |
//!
//! Typical call sequence: `parse_args` → `Args::into_plan` → dispatch to the I/O layer.

pub mod args;
pub mod constants;
