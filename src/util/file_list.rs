//! Input list expansion for recursive mode.
//!
//! [`create_file_list`] turns a mixed list of files and directories into a
//! flat list of source paths. Directories are walked with [`walkdir`]
//! without following symlinks, so cyclic links cannot loop the walk.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Expand `inputs` into a flat list of files.
///
/// - Non-directory inputs are forwarded unchanged, whatever their name.
/// - Directories are walked recursively. Only regular files are collected,
///   and when `suffix` is given only those whose name ends with it.
/// - The first unreadable directory entry aborts the walk with its error.
///
/// Entries found under each directory are sorted so the output order does
/// not depend on the filesystem.
pub fn create_file_list<P: AsRef<Path>>(inputs: &[P], suffix: Option<&str>) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if !input.is_dir() {
            result.push(input.to_path_buf());
            continue;
        }
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.map_err(|e| match e.io_error() {
                Some(err) => io::Error::new(err.kind(), err.to_string()),
                None => io::Error::other(e.to_string()),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = suffix.map_or(true, |s| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.ends_with(s))
            });
            if matches {
                result.push(entry.into_path());
            } else {
                crate::displaylevel!(4, "skipping {}\n", entry.path().display());
            }
        }
    }
    Ok(result)
}
