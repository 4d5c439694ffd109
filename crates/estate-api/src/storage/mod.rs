//! Upload storage
//!
//! Multipart file fields are streamed chunk by chunk into the upload
//! directory. Each file is written to a `.part` sibling first and renamed
//! once complete, so a failed upload never leaves a readable file behind.
//! Files written for a request are tracked by an [`UploadGuard`] until the
//! request commits them.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;
use estate_common::{AppError, StorageConfig};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::response::{ApiError, ApiResult};

/// Map an accepted image content type to the stored file extension
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        _ => None,
    }
}

/// Whether `name` has the `{uuid}.{ext}` shape of a stored upload
pub fn is_stored_name(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(stem, extension)| {
        matches!(extension, "png" | "jpg") && Uuid::try_parse(stem).is_ok()
    })
}

/// Local directory holding uploaded images
#[derive(Debug, Clone)]
pub struct UploadStore {
    directory: PathBuf,
    max_file_size: usize,
}

impl UploadStore {
    /// Create a store writing into `directory`
    pub fn new(directory: impl Into<PathBuf>, max_file_size: usize) -> Self {
        Self {
            directory: directory.into(),
            max_file_size,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.upload_directory, config.max_file_size_bytes())
    }

    /// Directory served under `/upload`
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Largest accepted file in bytes
    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Create the upload directory if it is missing
    pub async fn ensure_directory(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.directory).await.map_err(|e| {
            AppError::Storage(format!(
                "Failed to create upload directory {}: {e}",
                self.directory.display()
            ))
        })
    }

    /// Stream one multipart field to disk and return the stored file name
    ///
    /// The content type is checked before anything is written.
    pub async fn save_field(&self, mut field: Field<'_>) -> ApiResult<String> {
        let extension = field
            .content_type()
            .and_then(image_extension)
            .ok_or_else(|| ApiError::invalid_upload("Only PNG and JPEG images are accepted"))?;

        let file_name = format!("{}.{extension}", Uuid::new_v4());
        let temp_name = format!("{file_name}.part");
        let temp_path = self.directory.join(&temp_name);

        let mut pending = self.guard();
        pending.push(temp_name);

        self.write_field(&mut field, &temp_path).await?;
        fs::rename(&temp_path, self.directory.join(&file_name))
            .await
            .map_err(storage_error)?;
        pending.commit();

        debug!(file = %file_name, "Upload stored");
        Ok(file_name)
    }

    /// Start tracking files written for one request
    pub fn guard(&self) -> UploadGuard {
        UploadGuard {
            directory: self.directory.clone(),
            files: Vec::new(),
        }
    }

    /// Delete previously stored files
    pub async fn remove_all(&self, file_names: &[String]) {
        for name in file_names {
            remove_quietly(&self.directory.join(name)).await;
        }
    }

    /// Delete files that are no longer referenced
    ///
    /// Names that were not produced by this store, such as the fixed
    /// gallery placeholders, are left alone.
    pub async fn remove_replaced<'a, I>(&self, file_names: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        let names: Vec<&String> = file_names
            .into_iter()
            .filter(|name| is_stored_name(name))
            .collect();
        for name in names {
            remove_quietly(&self.directory.join(name)).await;
        }
    }

    async fn write_field(&self, field: &mut Field<'_>, path: &Path) -> ApiResult<()> {
        let mut file = fs::File::create(path).await.map_err(storage_error)?;
        let mut written = 0usize;

        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            written += chunk.len();
            if written > self.max_file_size {
                return Err(ApiError::payload_too_large(format!(
                    "File exceeds the {} byte limit",
                    self.max_file_size
                )));
            }
            file.write_all(&chunk).await.map_err(storage_error)?;
        }

        if written == 0 {
            return Err(ApiError::invalid_upload("Uploaded file is empty"));
        }

        file.flush().await.map_err(storage_error)?;
        Ok(())
    }
}

/// Files written during one request
///
/// Dropping the guard without [`commit`](Self::commit) deletes every
/// tracked file. This covers requests cut short by the timeout layer or a
/// client disconnect, where the handler future is dropped mid-upload.
#[derive(Debug)]
pub struct UploadGuard {
    directory: PathBuf,
    files: Vec<String>,
}

impl UploadGuard {
    pub fn push(&mut self, file_name: String) {
        self.files.push(file_name);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Keep the tracked files and hand back their names
    pub fn commit(mut self) -> Vec<String> {
        std::mem::take(&mut self.files)
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        for name in self.files.drain(..) {
            let path = self.directory.join(&name);
            match std::fs::remove_file(&path) {
                Ok(()) => debug!(file = %name, "Discarded upload"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to discard upload"),
            }
        }
    }
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        warn!(path = %path.display(), error = %e, "Failed to remove upload");
    }
}

fn storage_error(e: std::io::Error) -> ApiError {
    ApiError::from(AppError::Storage(e.to_string()))
}

/// Convert a multipart parsing failure, keeping body-limit rejections as 413
pub fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large("Request body is too large")
    } else {
        ApiError::invalid_upload(e.body_text())
    }
}
