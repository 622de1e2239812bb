//! Album endpoint bodies.
//!
//! Request fields are optional on the wire so that a missing field and an empty one produce the
//! same validation error instead of a deserialisation failure.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One image in the album listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AlbumImage {
    /// Parent folder relative to the media root, e.g. `2024-01-01/Acme`
    pub folder: String,
    /// Externally visible path, e.g. `/media/2024-01-01/Acme/img.jpg`
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateClientFolderReq {
    /// Client name, used verbatim (after trimming) as the subfolder name
    #[serde(default)]
    pub client: Option<String>,
    /// Externally visible paths of the images to move
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateClientFolderRes {
    pub message: String,
    /// Filesystem paths of the moved images
    pub files: Vec<String>,
    #[serde(default)]
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConfirmCartReq {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConfirmCartRes {
    pub success: bool,
    pub email: String,
    /// Externally visible paths of the copies under `validated/<email>/`
    pub copied: Vec<String>,
    #[serde(default)]
    pub skipped: Vec<SkippedFile>,
}

/// A requested file that was left out of the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SkippedFile {
    /// The path exactly as the caller sent it
    pub path: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Nothing exists at the resolved location
    NotFound,
    /// The path is outside the media URL prefix or escapes the media root
    InvalidPath,
    /// The file exists but moving or copying it failed
    IoError,
}
