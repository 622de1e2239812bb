//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handlers never read the environment; they only see the
//! `StudioConfig` they were built with, which keeps them testable against temporary directories.

use crate::constants::{DEFAULT_MEDIA_ROOT, DEFAULT_MEDIA_URL, VALIDATED_DIR_NAME};
use crate::{AlbumError, AlbumResult};
use std::path::{Path, PathBuf};
use studio_files::MediaPaths;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct StudioConfig {
    media: MediaPaths,
}

impl StudioConfig {
    /// Create a new `StudioConfig`.
    ///
    /// The media root does not need to exist yet: listing an absent root yields no albums and the
    /// first confirmed cart creates it.
    pub fn new(media_root: PathBuf, media_url: &str) -> AlbumResult<Self> {
        if media_root.as_os_str().is_empty() {
            return Err(AlbumError::InvalidConfig(
                "media root cannot be empty".into(),
            ));
        }

        if media_url.chars().any(char::is_whitespace) || media_url.split('/').any(|s| s == "..")
        {
            return Err(AlbumError::InvalidConfig(format!(
                "media URL prefix is not a plain path: {media_url:?}"
            )));
        }

        Ok(Self {
            media: MediaPaths::new(media_root, media_url),
        })
    }

    pub fn media_root(&self) -> &Path {
        self.media.root()
    }

    /// Normalised media URL prefix, e.g. `/media`.
    pub fn media_url(&self) -> &str {
        self.media.url_prefix()
    }

    pub fn media(&self) -> &MediaPaths {
        &self.media
    }

    pub fn validated_dir(&self) -> PathBuf {
        self.media.root().join(VALIDATED_DIR_NAME)
    }
}

/// Resolve the media root from an optional environment value.
///
/// Unset or blank values fall back to [`DEFAULT_MEDIA_ROOT`]. Relative paths are made absolute
/// against `cwd` so that later changes of working directory do not move the media tree.
pub fn media_root_from_env_value(value: Option<String>, cwd: &Path) -> PathBuf {
    let raw = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_MEDIA_ROOT.to_string());

    let path = PathBuf::from(raw);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Resolve the media URL prefix from an optional environment value.
pub fn media_url_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_MEDIA_URL.to_string())
}

/// Parse a boolean flag such as `STUDIO_SERVE_MEDIA`. Unset or blank means `default`.
pub fn flag_from_env_value(value: Option<String>, default: bool) -> AlbumResult<bool> {
    let Some(value) = value.map(|v| v.trim().to_ascii_lowercase()) else {
        return Ok(default);
    };

    match value.as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AlbumError::InvalidConfig(format!(
            "expected a boolean flag, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalises_media_url() {
        let cfg = StudioConfig::new(PathBuf::from("/srv/media"), "/media/").unwrap();
        assert_eq!(cfg.media_url(), "/media");
        assert_eq!(cfg.media_root(), Path::new("/srv/media"));
        assert_eq!(cfg.validated_dir(), PathBuf::from("/srv/media/validated"));
    }

    #[test]
    fn test_new_rejects_empty_root() {
        let result = StudioConfig::new(PathBuf::new(), "/media/");
        assert!(matches!(result, Err(AlbumError::InvalidConfig(_))));
    }

    #[test]
    fn test_new_rejects_odd_prefixes() {
        for bad in ["/me dia/", "/media/../x", "/ media"] {
            assert!(
                StudioConfig::new(PathBuf::from("/srv/media"), bad).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_media_root_from_env_value() {
        let cwd = Path::new("/srv/app");
        assert_eq!(
            media_root_from_env_value(None, cwd),
            PathBuf::from("/srv/app/media")
        );
        assert_eq!(
            media_root_from_env_value(Some("  ".into()), cwd),
            PathBuf::from("/srv/app/media")
        );
        assert_eq!(
            media_root_from_env_value(Some("uploads".into()), cwd),
            PathBuf::from("/srv/app/uploads")
        );
        assert_eq!(
            media_root_from_env_value(Some("/data/media".into()), cwd),
            PathBuf::from("/data/media")
        );
    }

    #[test]
    fn test_media_url_from_env_value() {
        assert_eq!(media_url_from_env_value(None), "/media/");
        assert_eq!(media_url_from_env_value(Some("/photos/".into())), "/photos/");
    }

    #[test]
    fn test_flag_from_env_value() {
        assert!(flag_from_env_value(None, true).unwrap());
        assert!(!flag_from_env_value(Some("off".into()), true).unwrap());
        assert!(flag_from_env_value(Some("TRUE".into()), false).unwrap());
        assert!(flag_from_env_value(Some("maybe".into()), false).is_err());
    }
}
