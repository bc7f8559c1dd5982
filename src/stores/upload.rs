use reqwest::{Body, StatusCode};
use std::path::{Path, PathBuf};
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::api::operation::UploadFileUnary;
use crate::api::types::UploadFileRequest;
use crate::error::{R2g2Error, Result, UploadError};

/// Status the storage backend must return for a completed transfer.
const TRANSFER_OK: StatusCode = StatusCode::OK;

/// Two-phase uploader: negotiate a one-time destination, then write the
/// bytes straight to it.
pub struct Uploader {
    api: ApiClient,
}

impl Uploader {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Upload `files` to `store_id` one after another.
    ///
    /// Stops at the first failure. Files already transferred stay in the
    /// store. Returns the uploaded file names in order.
    pub async fn upload_all(&self, store_id: &str, files: &[PathBuf]) -> Result<Vec<String>> {
        let mut uploaded = Vec::with_capacity(files.len());
        for file in files {
            uploaded.push(self.upload_file(store_id, file).await?);
        }
        info!(store_id, count = uploaded.len(), "upload batch complete");
        Ok(uploaded)
    }

    /// Upload a single file and return the name it was stored under.
    pub async fn upload_file(&self, store_id: &str, path: &Path) -> Result<String> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| UploadError::InvalidName {
                path: path.to_path_buf(),
            })?
            .to_string();

        // The handle moves into the body stream and is closed when the
        // request finishes or this future is dropped.
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|source| UploadError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let ticket = self
            .api
            .call::<UploadFileUnary>(&UploadFileRequest {
                store_id: store_id.to_string(),
                filename: filename.clone(),
            })
            .await?;
        debug!(filename = %filename, "upload destination negotiated");

        let body = Body::wrap_stream(ReaderStream::new(file));

        let status = self.api.put_object(&ticket.url, &ticket.headers, body).await?;
        if status != TRANSFER_OK {
            return Err(UploadError::Transfer {
                filename,
                status: status.as_u16(),
            }
            .into());
        }

        info!(filename = %filename, "uploaded file");
        Ok(filename)
    }
}

/// Regular files directly inside `dir`, sorted by file name.
/// Subdirectories are skipped.
pub fn collect_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let context = || format!("reading input directory {}", dir.display());

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| R2g2Error::io(context(), e))? {
        let entry = entry.map_err(|e| R2g2Error::io(context(), e))?;
        let file_type = entry.file_type().map_err(|e| R2g2Error::io(context(), e))?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
