//! Moving and copying single files into destination folders.
//!
//! Both operations keep the source file name and create the destination folder on demand.
//! Neither is transactional: a failure leaves the source untouched only when the failure
//! happens before any byte is written.

use crate::{FilesError, FilesResult};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Computes `<dest_dir>/<file name of source>`.
///
/// # Errors
///
/// Returns `FilesError::NoFileName` if `source` ends in `..` or is a root.
pub fn destination_for(source: &Path, dest_dir: &Path) -> FilesResult<PathBuf> {
    let name = source
        .file_name()
        .ok_or_else(|| FilesError::NoFileName(source.to_path_buf()))?;
    Ok(dest_dir.join(name))
}

/// Creates `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> FilesResult<()> {
    fs::create_dir_all(dir).map_err(|source| FilesError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Moves `source` into `dest_dir`, keeping its file name.
///
/// A plain `rename` is tried first. Only when that fails because the destination is on
/// another filesystem is the file copied and the original removed. An existing file at the
/// destination is replaced.
///
/// # Arguments
///
/// * `source` - The file to move.
/// * `dest_dir` - The folder to move it into. Created if missing.
///
/// # Returns
///
/// The new path of the file.
///
/// # Errors
///
/// Returns `FilesError::CreateDir` if `dest_dir` cannot be created, or `FilesError::Move` if
/// the file cannot be relocated. After a `Move` error the file exists only at `source`.
pub fn move_into(source: &Path, dest_dir: &Path) -> FilesResult<PathBuf> {
    let dest = destination_for(source, dest_dir)?;
    ensure_dir(dest_dir)?;

    let moved = match fs::rename(source, &dest) {
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            tracing::debug!(
                "{} and {} are on different filesystems, moving by copy",
                source.display(),
                dest.display()
            );
            copy_then_remove(source, &dest, |p| fs::remove_file(p))
        }
        other => other,
    };

    moved.map_err(|e| FilesError::Move {
        from: source.to_path_buf(),
        to: dest.clone(),
        source: e,
    })?;

    Ok(dest)
}

/// Copies `source` to `dest`, then removes `source` with `remove`. If either step fails,
/// `dest` is deleted again so the file is never left in both places.
fn copy_then_remove(
    source: &Path,
    dest: &Path,
    remove: impl FnOnce(&Path) -> io::Result<()>,
) -> io::Result<()> {
    let result = fs::copy(source, dest).and_then(|_| remove(source));
    if result.is_err() {
        if let Err(e) = fs::remove_file(dest) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!("failed to clean up {}: {}", dest.display(), e);
            }
        }
    }
    result
}

/// Copies `source` into `dest_dir`, keeping its file name.
///
/// Uses `std::fs::copy`: an existing destination is overwritten and permission bits are
/// carried over. Timestamps are not preserved. When `source` already is the destination file
/// nothing is written and its path is returned as is.
///
/// # Arguments
///
/// * `source` - The file to copy.
/// * `dest_dir` - The folder to copy it into. Created if missing.
///
/// # Returns
///
/// The path of the copy.
///
/// # Errors
///
/// Returns `FilesError::CreateDir` if `dest_dir` cannot be created, or `FilesError::Copy` if
/// the bytes cannot be copied.
pub fn copy_into(source: &Path, dest_dir: &Path) -> FilesResult<PathBuf> {
    let dest = destination_for(source, dest_dir)?;
    ensure_dir(dest_dir)?;

    if is_same_file(source, &dest) {
        tracing::debug!("{} is already in {}", source.display(), dest_dir.display());
        return Ok(dest);
    }

    fs::copy(source, &dest).map_err(|e| FilesError::Copy {
        from: source.to_path_buf(),
        to: dest.clone(),
        source: e,
    })?;

    Ok(dest)
}

/// Whether both paths name the same existing file, once links and `.` segments are resolved.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
