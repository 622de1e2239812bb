//! Constants used throughout the studio core crate.
//!
//! Directory names and configuration defaults live here so the REST server, the CLI and the
//! tests all agree on them.

/// Directory under the media root that holds one folder per confirmed customer email.
pub const VALIDATED_DIR_NAME: &str = "validated";

/// Media root used when `MEDIA_ROOT` is unset, relative to the working directory.
pub const DEFAULT_MEDIA_ROOT: &str = "media";

/// Media URL prefix used when `MEDIA_URL` is unset.
pub const DEFAULT_MEDIA_URL: &str = "/media/";

/// REST bind address used when `STUDIO_REST_ADDR` is unset.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:8000";
