//! Publishing generated headers to disk.
//!
//! A header is staged in a temporary file next to its destination and
//! renamed over it, so readers see either the previous complete file or the
//! new complete file, never a partial write.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::GenError;

/// What [`write_if_changed`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The destination was created or replaced.
    Written,
    /// The destination already held identical bytes and was not touched.
    Unchanged,
}

/// State of an existing output relative to freshly generated contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The file matches byte for byte.
    Fresh,
    /// The file exists but differs.
    Stale,
    /// There is no file at the path.
    Missing,
}

/// Replace `path` with `contents` unless it already holds exactly that.
///
/// Leaving an identical file alone keeps its mtime, so build systems that
/// track the header do not rebuild dependents needlessly.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<WriteOutcome, GenError> {
    if check_up_to_date(path, contents)? == Freshness::Fresh {
        info!(path = %path.display(), "generated header unchanged");
        return Ok(WriteOutcome::Unchanged);
    }

    let output_err = |source: io::Error| GenError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(output_err)?;

    let mut staged = staging_file(dir).map_err(output_err)?;
    // A replaced header keeps the mode it had.
    if let Ok(existing) = fs::metadata(path) {
        staged
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(output_err)?;
    }
    staged.write_all(contents.as_bytes()).map_err(output_err)?;
    staged.as_file().sync_all().map_err(output_err)?;
    staged.persist(path).map_err(|e| output_err(e.error))?;

    info!(path = %path.display(), bytes = contents.len(), "wrote generated header");
    Ok(WriteOutcome::Written)
}

// tempfile defaults to 0600; headers are read by other build steps.
#[cfg(unix)]
fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o644))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

/// Compare the file at `path` with `contents`.
pub fn check_up_to_date(path: &Path, contents: &str) -> Result<Freshness, GenError> {
    match fs::read(path) {
        Ok(existing) if existing == contents.as_bytes() => Ok(Freshness::Fresh),
        Ok(_) => Ok(Freshness::Stale),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Freshness::Missing),
        Err(source) => Err(GenError::Output {
            path: path.to_path_buf(),
            source,
        }),
    }
}
