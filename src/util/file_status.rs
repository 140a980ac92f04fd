//! File status helpers.
//!
//! Type checks on paths plus [`copy_file_stat`], which carries a source
//! file's modification time and permission bits over to its decoded output
//! using the `filetime` crate.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;

/// Copies the modification time and permissions of `src` onto `dst`.
///
/// The access time of `dst` is set to now. Returns `Err` if `dst` is not a
/// regular file or either path cannot be stat'ed.
pub fn copy_file_stat(src: &Path, dst: &Path) -> io::Result<()> {
    if !is_reg_file(dst) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "copy_file_stat: destination is not a regular file",
        ));
    }
    let meta = fs::metadata(src)?;

    let atime = FileTime::from_system_time(SystemTime::now());
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(dst, atime, mtime)?;

    fs::set_permissions(dst, meta.permissions())
}

/// Returns `true` if `path` refers to a regular file.
///
/// Returns `false` for directories, special files, and paths that do not
/// exist.
pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

/// Returns `true` if `path` refers to a directory.
pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}
