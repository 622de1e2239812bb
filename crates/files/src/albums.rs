//! Recursive album listing.
//!
//! Albums are plain directories under the media root: upload dates, client subfolders,
//! `validated/<email>` folders and anything else an operator drops in. The lister flattens the
//! whole tree into one list of images and leaves grouping to the caller via `folder`.

use crate::constants::IMAGE_EXTENSIONS;
use crate::media_paths::{to_url_path, MediaPaths};
use walkdir::WalkDir;

/// One image found under the media root.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AlbumImage {
    /// Parent directory relative to the media root, forward-slash separated. Empty at the root.
    pub folder: String,
    /// Externally visible path: media URL prefix followed by the relative file path.
    pub path: String,
}

/// Returns `true` if the file name ends in one of the image extensions, ignoring case.
pub fn is_image_file_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Lists every image under the media root, depth-first in directory listing order.
///
/// A missing media root yields an empty list. Entries that cannot be read (permissions,
/// symlink loops, files vanishing mid-walk) are logged and skipped; the walk never fails.
///
/// # Arguments
///
/// * `media` - The media root to walk and the URL prefix used to build each `path`.
///
/// # Returns
///
/// One `AlbumImage` per image file, in walk order.
pub fn list_albums(media: &MediaPaths) -> Vec<AlbumImage> {
    let root = media.root();
    if !root.is_dir() {
        tracing::debug!("media root {} does not exist, no albums", root.display());
        return Vec::new();
    }

    let mut images = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable media entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!("skipping non UTF-8 file name: {}", entry.path().display());
            continue;
        };

        if !is_image_file_name(name) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        images.push(AlbumImage {
            folder: relative.parent().map(to_url_path).unwrap_or_default(),
            path: media.external_for_relative(relative),
        });
    }

    images
}
