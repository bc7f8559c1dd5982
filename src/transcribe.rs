//! Audio transcription through the service's transcriber endpoint.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use tracing::debug;

use crate::api::ApiClient;
use crate::api::operation::Transcribe;
use crate::api::types::{InlineData, TranscribeRequest};
use crate::error::{R2g2Error, Result};

const FALLBACK_MIME: &str = "audio/mpeg";

/// Best-effort audio MIME type for `bytes`.
pub fn detect_mime(bytes: &[u8]) -> &'static str {
    infer::get(bytes)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Audio)
        .map_or(FALLBACK_MIME, |kind| kind.mime_type())
}

/// Transcribe in-memory audio.
pub async fn transcribe_bytes(api: &ApiClient, bytes: &[u8]) -> Result<String> {
    let mime_type = detect_mime(bytes);
    debug!(mime_type, size = bytes.len(), "transcribing audio");

    let response = api
        .call::<Transcribe>(&TranscribeRequest {
            inline_data: InlineData {
                mime_type: mime_type.to_string(),
                data: STANDARD.encode(bytes),
            },
        })
        .await?;
    Ok(response.text)
}

pub async fn transcribe_file(api: &ApiClient, path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| R2g2Error::io(format!("reading audio file {}", path.display()), e))?;
    transcribe_bytes(api, &bytes).await
}
