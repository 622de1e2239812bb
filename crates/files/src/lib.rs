//! Studio media storage
//!
//! Filesystem layer for the studio album service. Everything here operates on one media root
//! directory and the URL prefix that stands in for it in externally visible paths.
//!
//! ## Layout
//!
//! ```text
//! <media_root>/
//! ├── <upload folders>/          # any depth, created by the uploader
//! │   ├── photo.jpg
//! │   └── <client>/              # created by the client folder creator
//! │       └── moved.jpg
//! └── validated/
//!     └── <email>/               # created by the cart confirmer
//!         └── copied.jpg
//! ```
//!
//! ## Modules
//!
//! - [`media_paths`]: external path ↔ filesystem path mapping with traversal checks
//! - [`albums`]: recursive image listing
//! - [`transfer`]: move and copy into a destination folder
//! - [`locks`]: per-path mutual exclusion around mutations
//!
//! ## Example Usage
//!
//! ```no_run
//! use studio_files::{list_albums, MediaPaths};
//!
//! let media = MediaPaths::new("/srv/media", "/media/");
//! for image in list_albums(&media) {
//!     println!("{} in {}", image.path, image.folder);
//! }
//! ```

pub mod albums;
mod constants;
pub mod locks;
pub mod media_paths;
pub mod transfer;

pub use albums::{is_image_file_name, list_albums, AlbumImage};
pub use constants::IMAGE_EXTENSIONS;
pub use locks::{PathGuard, PathLocks};
pub use media_paths::MediaPaths;
pub use transfer::{copy_into, destination_for, ensure_dir, move_into};

use std::path::PathBuf;

/// Why an external path could not be mapped onto the media root.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MediaPathError {
    /// The path does not start with the media URL prefix
    #[error("path is outside the media URL prefix: {0}")]
    OutsidePrefix(String),

    /// Nothing is left once the prefix is stripped
    #[error("path names no file: {0}")]
    Empty(String),

    /// A segment would step outside the media root
    #[error("path escapes the media root: {0}")]
    Traversal(String),
}

/// Errors that can occur while mutating the media tree
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    #[error("path has no file name: {}", .0.display())]
    NoFileName(PathBuf),

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move {} to {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type FilesResult<T> = std::result::Result<T, FilesError>;
