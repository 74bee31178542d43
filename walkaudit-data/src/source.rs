//! Capability-based access to input files.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// What an existing input path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A regular file.
    File,
    /// A directory or other non-file entry.
    NotFile,
}

/// Open a UTF-8 file path using ambient authority.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Inspect an input path without opening it.
///
/// A missing path surfaces as an [`io::ErrorKind::NotFound`] error.
pub fn inspect_source(path: &Utf8Path) -> io::Result<SourceKind> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "path has no file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    let metadata = dir.metadata(name)?;
    Ok(if metadata.is_file() {
        SourceKind::File
    } else {
        SourceKind::NotFile
    })
}
