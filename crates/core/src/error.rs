use studio_files::FilesError;
use studio_types::TextError;

#[derive(Debug, thiserror::Error)]
pub enum AlbumError {
    /// A required request field is missing or empty
    #[error("{0}")]
    MissingFields(&'static str),

    /// A client name or email cannot be used as a folder name
    #[error("invalid {field}: {source}")]
    InvalidFolderName {
        field: &'static str,
        #[source]
        source: TextError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The destination folder for a whole request could not be prepared
    #[error("failed to prepare destination folder: {0}")]
    Files(#[from] FilesError),
}

impl AlbumError {
    /// Whether the error was caused by the request rather than by the server.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AlbumError::MissingFields(_) | AlbumError::InvalidFolderName { .. }
        )
    }
}

pub type AlbumResult<T> = std::result::Result<T, AlbumError>;
