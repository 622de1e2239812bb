//! Mapping between externally visible media paths and filesystem paths.
//!
//! The outside world never sees the media root. Every image is addressed by the media URL prefix
//! followed by its path relative to the root, always with forward slashes:
//!
//! ```text
//! external:   /media/2024-01-01/Acme/img.jpg
//! relative:   2024-01-01/Acme/img.jpg
//! filesystem: <media_root>/2024-01-01/Acme/img.jpg
//! ```
//!
//! # Security Model
//!
//! Paths supplied by callers are parsed segment by segment. A path is rejected if it does not
//! start with the prefix, is empty after stripping it, or contains a segment that is not a
//! plain name (`..`, a drive prefix, a root). A resolved path is therefore always inside the
//! media root, lexically. Symlinks placed inside the root by an operator are followed.

use crate::constants::URL_SEPARATOR;
use crate::MediaPathError;
use std::path::{Component, Path, PathBuf};

/// Bidirectional mapping between external media paths and the media root on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPaths {
    root: PathBuf,
    /// Normalised prefix: leading `/`, no trailing `/`. Empty when media is served at `/`.
    url_prefix: String,
}

impl MediaPaths {
    /// Creates a new mapping.
    ///
    /// The URL prefix is normalised so that `"media"`, `"/media"` and `"/media/"` are
    /// equivalent. A prefix of `"/"` maps media to the site root.
    pub fn new(root: impl Into<PathBuf>, url_prefix: &str) -> Self {
        let trimmed = url_prefix.trim().trim_matches(URL_SEPARATOR);
        let url_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{URL_SEPARATOR}{trimmed}")
        };

        Self {
            root: root.into(),
            url_prefix,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The normalised media URL prefix, e.g. `/media`.
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Strips the URL prefix from `external` and returns the validated relative path.
    ///
    /// # Errors
    ///
    /// Returns `MediaPathError` if:
    /// - the path does not start with the media URL prefix,
    /// - nothing remains after the prefix,
    /// - a segment would step outside the media root.
    pub fn to_relative(&self, external: &str) -> Result<PathBuf, MediaPathError> {
        let rest = external
            .strip_prefix(self.url_prefix.as_str())
            .filter(|rest| rest.starts_with(URL_SEPARATOR))
            .ok_or_else(|| MediaPathError::OutsidePrefix(external.to_owned()))?;

        let mut relative = PathBuf::new();
        for segment in rest.split(URL_SEPARATOR) {
            if segment.is_empty() || segment == "." {
                continue;
            }

            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(name)), None) if !segment.contains('\0') => {
                    relative.push(name)
                }
                _ => return Err(MediaPathError::Traversal(external.to_owned())),
            }
        }

        if relative.as_os_str().is_empty() {
            return Err(MediaPathError::Empty(external.to_owned()));
        }

        Ok(relative)
    }

    /// Resolves an external path to its location on disk. The file need not exist.
    ///
    /// # Errors
    ///
    /// Same as [`MediaPaths::to_relative`].
    pub fn resolve(&self, external: &str) -> Result<PathBuf, MediaPathError> {
        Ok(self.root.join(self.to_relative(external)?))
    }

    /// Builds the external path for a path relative to the media root.
    pub fn external_for_relative(&self, relative: &Path) -> String {
        format!(
            "{}{}{}",
            self.url_prefix,
            URL_SEPARATOR,
            to_url_path(relative)
        )
    }

    /// Re-expresses a filesystem path under the media root as an external path.
    ///
    /// Returns `None` for paths outside the media root.
    pub fn to_external(&self, fs_path: &Path) -> Option<String> {
        fs_path
            .strip_prefix(&self.root)
            .ok()
            .map(|relative| self.external_for_relative(relative))
    }
}

/// Joins the components of `path` with forward slashes, regardless of the host separator.
pub fn to_url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().replace('\\', "/")),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
