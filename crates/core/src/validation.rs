//! Input validation utilities.
//!
//! Both mutating endpoints take a folder-name field and a list of files. A missing field, an
//! empty string and an empty list are all the same error to the caller.

use crate::{AlbumError, AlbumResult};
use studio_types::{FolderName, TextError};

/// Checks that `name` and `files` are both present and non-empty, then validates `name` as a
/// single folder name.
///
/// # Errors
///
/// - `AlbumError::MissingFields` with `missing_message` if either input is absent or empty.
/// - `AlbumError::InvalidFolderName` if `name` contains a separator or is `.`/`..`.
pub fn require_name_and_files(
    field: &'static str,
    name: Option<String>,
    files: Option<Vec<String>>,
    missing_message: &'static str,
) -> AlbumResult<(FolderName, Vec<String>)> {
    let (Some(name), Some(files)) = (name, files) else {
        return Err(AlbumError::MissingFields(missing_message));
    };

    if files.is_empty() {
        return Err(AlbumError::MissingFields(missing_message));
    }

    match FolderName::new(&name) {
        Ok(folder) => Ok((folder, files)),
        Err(TextError::Empty) => Err(AlbumError::MissingFields(missing_message)),
        Err(source) => Err(AlbumError::InvalidFolderName { field, source }),
    }
}
