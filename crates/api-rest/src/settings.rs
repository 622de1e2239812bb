//! Server settings resolved from the process environment.
//!
//! This is the only place that reads the environment; everything downstream receives a
//! `StudioConfig`.

use std::path::Path;
use std::sync::Arc;

use studio_core::config::{
    flag_from_env_value, media_root_from_env_value, media_url_from_env_value,
};
use studio_core::{AlbumResult, StudioConfig, DEFAULT_REST_ADDR};

/// Everything needed to start the REST server.
#[derive(Clone, Debug)]
pub struct ServerSettings {
    pub addr: String,
    pub cfg: Arc<StudioConfig>,
    pub serve_media: bool,
}

impl ServerSettings {
    /// Reads settings from the environment.
    ///
    /// # Environment Variables
    /// - `STUDIO_REST_ADDR`: Server address (default: "0.0.0.0:8000")
    /// - `MEDIA_ROOT`: Media root directory (default: "media" under `cwd`)
    /// - `MEDIA_URL`: Media URL prefix (default: "/media/")
    /// - `STUDIO_SERVE_MEDIA`: Serve the media root statically (default: true)
    pub fn from_env(cwd: &Path) -> AlbumResult<Self> {
        Self::from_values(|key| std::env::var(key).ok(), cwd)
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_values(lookup: impl Fn(&str) -> Option<String>, cwd: &Path) -> AlbumResult<Self> {
        let addr = lookup("STUDIO_REST_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REST_ADDR.into());

        let media_root = media_root_from_env_value(lookup("MEDIA_ROOT"), cwd);
        let media_url = media_url_from_env_value(lookup("MEDIA_URL"));
        let serve_media = flag_from_env_value(lookup("STUDIO_SERVE_MEDIA"), true)?;

        Ok(Self {
            addr,
            cfg: Arc::new(StudioConfig::new(media_root, &media_url)?),
            serve_media,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = ServerSettings::from_values(|_| None, Path::new("/srv/app")).unwrap();
        assert_eq!(settings.addr, "0.0.0.0:8000");
        assert_eq!(settings.cfg.media_root(), Path::new("/srv/app/media"));
        assert_eq!(settings.cfg.media_url(), "/media");
        assert!(settings.serve_media);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STUDIO_REST_ADDR", "127.0.0.1:9000"),
            ("MEDIA_ROOT", "/data/photos"),
            ("MEDIA_URL", "/photos/"),
            ("STUDIO_SERVE_MEDIA", "false"),
        ]
        .into_iter()
        .collect();

        let settings = ServerSettings::from_values(
            |key| vars.get(key).map(|v| v.to_string()),
            Path::new("/srv/app"),
        )
        .unwrap();

        assert_eq!(settings.addr, "127.0.0.1:9000");
        assert_eq!(settings.cfg.media_root(), Path::new("/data/photos"));
        assert_eq!(settings.cfg.media_url(), "/photos");
        assert!(!settings.serve_media);
    }

    #[test]
    fn test_invalid_flag() {
        let result = ServerSettings::from_values(
            |key| (key == "STUDIO_SERVE_MEDIA").then(|| "sometimes".to_string()),
            Path::new("/srv/app"),
        );
        assert!(result.is_err());
    }
}
