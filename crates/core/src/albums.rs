//! Album operations: listing, sorting images into client folders, and confirming carts.
//!
//! Each operation is a single pass over the request. Files are handled one at a time and every
//! file ends in exactly one [`FileOutcome`]; a failure on one file never stops the others. Only
//! request validation and preparing the cart's destination folder fail a whole request.
//!
//! These methods do blocking filesystem I/O and may wait on [`PathLocks`]. Async callers
//! should run them on a blocking thread.

use crate::config::StudioConfig;
use crate::validation::require_name_and_files;
use crate::AlbumResult;
use api_shared::{
    AlbumImage, ConfirmCartReq, ConfirmCartRes, CreateClientFolderReq, CreateClientFolderRes,
    SkipReason, SkippedFile,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use studio_files::{FilesError, FilesResult, PathLocks};
use studio_types::FolderName;

const MISSING_CLIENT_FIELDS: &str = "Client name or files missing";
const MISSING_CART_FIELDS: &str = "Email or files missing";

/// What happened to one requested file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file now exists at this path.
    Done(PathBuf),
    /// The request named something that is not a file under the media root.
    Skipped(SkipReason),
    /// The file exists but the move or copy failed.
    Failed(FilesError),
}

/// Outcomes of one request, split into successes and everything else.
#[derive(Debug, Default)]
pub struct TransferReport {
    pub done: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

impl TransferReport {
    fn record(&mut self, requested: &str, outcome: FileOutcome) {
        let reason = match outcome {
            FileOutcome::Done(dest) => {
                self.done.push(dest);
                return;
            }
            FileOutcome::Skipped(reason) => {
                tracing::debug!("skipping {}: {:?}", requested, reason);
                reason
            }
            FileOutcome::Failed(e) => {
                tracing::warn!("error with {}: {}", requested, e);
                SkipReason::IoError
            }
        };

        self.skipped.push(SkippedFile {
            path: requested.to_owned(),
            reason,
        });
    }
}

/// Album operations over one media root.
#[derive(Clone, Debug)]
pub struct AlbumService {
    cfg: Arc<StudioConfig>,
    locks: Arc<PathLocks>,
}

impl AlbumService {
    pub fn new(cfg: Arc<StudioConfig>) -> Self {
        Self {
            cfg,
            locks: Arc::new(PathLocks::new()),
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.cfg
    }

    /// Lists every image under the media root. Never fails; a missing root is an empty list.
    pub fn list_albums(&self) -> Vec<AlbumImage> {
        studio_files::list_albums(self.cfg.media())
            .into_iter()
            .map(|image| AlbumImage {
                folder: image.folder,
                path: image.path,
            })
            .collect()
    }

    /// Moves each requested image into a `<client>` subfolder of its own parent directory.
    ///
    /// # Arguments
    ///
    /// * `req` - The client name and the externally visible paths of the images to move.
    ///
    /// # Returns
    ///
    /// The summary message, the absolute destination paths of the moved files, and every
    /// requested path that was not moved together with the reason.
    ///
    /// # Errors
    ///
    /// Returns an `AlbumError` only if `client` or `files` is missing, empty, or `client` is
    /// not a usable folder name. Per-file problems are reported in `skipped`.
    pub fn create_client_folder(
        &self,
        req: CreateClientFolderReq,
    ) -> AlbumResult<CreateClientFolderRes> {
        let (client, files) =
            require_name_and_files("client", req.client, req.files, MISSING_CLIENT_FIELDS)?;

        let mut report = TransferReport::default();
        for requested in &files {
            let outcome = self.move_to_client_folder(&client, requested);
            report.record(requested, outcome);
        }

        tracing::info!(
            "moved {} of {} file(s) into client folder '{}'",
            report.done.len(),
            files.len(),
            client
        );

        Ok(CreateClientFolderRes {
            message: format!(
                "Subfolder '{}' created with {} file(s)",
                client,
                report.done.len()
            ),
            files: report
                .done
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            skipped: report.skipped,
        })
    }

    /// Copies each requested image into `validated/<email>/`, leaving the original in place.
    ///
    /// The validated folder is created even if none of the files can be copied. A file that
    /// already sits in that folder counts as copied and is left untouched.
    ///
    /// # Arguments
    ///
    /// * `req` - The customer email and the externally visible paths of the cart's images.
    ///
    /// # Returns
    ///
    /// The email and the externally visible paths of the copies, plus the skipped paths.
    ///
    /// # Errors
    ///
    /// Returns an `AlbumError` if `email` or `files` is missing or empty, if `email` is not a
    /// usable folder name, or if the validated folder cannot be created.
    pub fn confirm_cart(&self, req: ConfirmCartReq) -> AlbumResult<ConfirmCartRes> {
        let (email, files) =
            require_name_and_files("email", req.email, req.files, MISSING_CART_FIELDS)?;

        let email_dir = self.cfg.validated_dir().join(&email);
        studio_files::ensure_dir(&email_dir)?;

        let mut report = TransferReport::default();
        for requested in &files {
            let outcome = self.copy_to_validated(&email_dir, requested);
            report.record(requested, outcome);
        }

        tracing::info!(
            "copied {} of {} file(s) for {}",
            report.done.len(),
            files.len(),
            email
        );

        let media = self.cfg.media();
        Ok(ConfirmCartRes {
            success: true,
            email: email.to_string(),
            copied: report
                .done
                .iter()
                .map(|dest| {
                    media
                        .to_external(dest)
                        .unwrap_or_else(|| dest.display().to_string())
                })
                .collect(),
            skipped: report.skipped,
        })
    }

    fn move_to_client_folder(&self, client: &FolderName, requested: &str) -> FileOutcome {
        let media_root = self.cfg.media_root();
        self.transfer(
            requested,
            |source| source.parent().unwrap_or(media_root).join(client),
            studio_files::move_into,
        )
    }

    fn copy_to_validated(&self, email_dir: &Path, requested: &str) -> FileOutcome {
        self.transfer(
            requested,
            |_| email_dir.to_path_buf(),
            studio_files::copy_into,
        )
    }

    /// Resolves `requested`, locks source and destination, then runs `op` if the source is a
    /// file. The locks are held until `op` returns.
    fn transfer(
        &self,
        requested: &str,
        dest_dir_for: impl FnOnce(&Path) -> PathBuf,
        op: impl FnOnce(&Path, &Path) -> FilesResult<PathBuf>,
    ) -> FileOutcome {
        let source = match self.cfg.media().resolve(requested) {
            Ok(source) => source,
            Err(e) => {
                tracing::debug!("{}", e);
                return FileOutcome::Skipped(SkipReason::InvalidPath);
            }
        };

        let dest_dir = dest_dir_for(&source);
        let dest = match studio_files::destination_for(&source, &dest_dir) {
            Ok(dest) => dest,
            Err(e) => return FileOutcome::Failed(e),
        };

        let _guards = self.locks.lock_all(&[source.as_path(), dest.as_path()]);

        if !source.is_file() {
            return FileOutcome::Skipped(SkipReason::NotFound);
        }

        match op(&source, &dest_dir) {
            Ok(dest) => FileOutcome::Done(dest),
            Err(e) => FileOutcome::Failed(e),
        }
    }
}
