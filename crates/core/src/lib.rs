//! # Studio Core
//!
//! Core business logic for the studio album service.
//!
//! This crate turns validated album requests into filesystem work under the media root:
//! - Listing every uploaded image as `{folder, path}`
//! - Moving selected images into a per-client subfolder
//! - Copying confirmed cart images into `validated/<email>/`
//!
//! **No API concerns**: HTTP servers, routing and status codes belong in `api-rest`. Wire types
//! come from `api-shared`.

pub mod albums;
pub mod config;
pub mod constants;
pub mod error;
pub mod validation;

pub use albums::{AlbumService, FileOutcome, TransferReport};
pub use config::StudioConfig;
pub use constants::{DEFAULT_MEDIA_ROOT, DEFAULT_MEDIA_URL, DEFAULT_REST_ADDR};
pub use error::{AlbumError, AlbumResult};

// Re-export the wire types so callers need only one dependency.
pub use api_shared as api;
