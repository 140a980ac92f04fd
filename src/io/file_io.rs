// file_io.rs: Opening sources and destinations for file decompression.
//
// Special names:
//   STDIN_MARK  → standard input
//   STDOUT_MARK → standard output
//   NUL_MARK    → discard sink (no file is created)

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::io::prefs::Prefs;
use crate::util::is_directory;

// ---------------------------------------------------------------------------
// Special I/O sentinels
// ---------------------------------------------------------------------------

pub const STDIN_MARK: &str = "stdin";

pub const STDOUT_MARK: &str = "stdout";

#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

/// Read/write buffer size for file sources and destinations.
const FILE_BUF_SIZE: usize = 64 * 1024;

#[inline]
pub fn is_stdin(path: &str) -> bool {
    path == STDIN_MARK
}

#[inline]
pub fn is_stdout(path: &str) -> bool {
    path == STDOUT_MARK
}

#[inline]
pub fn is_dev_null(path: &str) -> bool {
    path == NUL_MARK
}

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Opens a source for reading.
///
/// - [`STDIN_MARK`] returns buffered standard input.
/// - A directory is rejected with [`io::ErrorKind::InvalidInput`].
/// - Anything else is opened as a file behind a [`BufReader`].
pub fn open_src_file(path: &str) -> io::Result<Box<dyn BufRead>> {
    if is_stdin(path) {
        crate::displaylevel!(4, "Using stdin for input\n");
        return Ok(Box::new(BufReader::with_capacity(FILE_BUF_SIZE, io::stdin())));
    }

    if is_directory(Path::new(path)) {
        crate::displaylevel!(1, "unlz4r: {} is a directory -- ignored\n", path);
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: is a directory", path),
        ));
    }

    let f = File::open(path).map_err(|e| {
        crate::displaylevel!(1, "{}: {}\n", path, e);
        e
    })?;
    Ok(Box::new(BufReader::with_capacity(FILE_BUF_SIZE, f)))
}

// ---------------------------------------------------------------------------
// Destination file
// ---------------------------------------------------------------------------

/// A write-capable destination produced by [`open_dst_file`].
///
/// Wraps a regular file, stdout, or a discard sink. `path` is set only for
/// regular files, so callers know what to clean up after a failed decode.
pub struct DstFile {
    inner: Box<dyn Write>,
    pub path: Option<PathBuf>,
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Opens a destination for writing.
///
/// - [`STDOUT_MARK`] → stdout.
/// - [`NUL_MARK`] → [`io::sink`]; no file is created.
/// - Otherwise a regular file. When `prefs.overwrite` is false and the file
///   already exists the call fails with [`io::ErrorKind::AlreadyExists`].
pub fn open_dst_file(path: &str, prefs: &Prefs) -> io::Result<DstFile> {
    if is_stdout(path) {
        crate::displaylevel!(4, "Using stdout for output\n");
        return Ok(DstFile {
            inner: Box::new(BufWriter::with_capacity(FILE_BUF_SIZE, io::stdout())),
            path: None,
        });
    }

    if is_dev_null(path) {
        return Ok(DstFile {
            inner: Box::new(io::sink()),
            path: None,
        });
    }

    if !prefs.overwrite && Path::new(path).exists() {
        crate::displaylevel!(1, "{} already exists; not overwritten  \n", path);
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{}: already exists; not overwritten", path),
        ));
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            crate::displaylevel!(1, "{}: {}\n", path, e);
            e
        })?;

    Ok(DstFile {
        inner: Box::new(BufWriter::with_capacity(FILE_BUF_SIZE, f)),
        path: Some(PathBuf::from(path)),
    })
}

// ---------------------------------------------------------------------------
// Output naming
// ---------------------------------------------------------------------------

/// Derive the output name by stripping `suffix` from `src`.
///
/// Fails with [`io::ErrorKind::InvalidInput`] when `src` does not end with
/// `suffix` or consists of nothing but the suffix.
pub fn output_filename(src: &str, suffix: &str) -> io::Result<String> {
    match src.strip_suffix(suffix) {
        Some(stem) if !stem.is_empty() && !stem.ends_with(std::path::MAIN_SEPARATOR) => {
            Ok(stem.to_string())
        }
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: unknown suffix -- expected {}", src, suffix),
        )),
    }
}
