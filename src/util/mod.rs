//! Filesystem helpers shared by the I/O layer and the CLI.
//!
//! - [`file_status`]: regular-file and directory checks, attribute copying
//! - [`file_list`]: recursive input expansion

pub mod file_list;
pub mod file_status;

pub use file_list::create_file_list;
pub use file_status::{copy_file_stat, is_directory, is_reg_file};
