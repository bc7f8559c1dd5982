//! Request and response bodies exchanged with the assistant service.
//!
//! Field names follow the service's camelCase JSON. Responses default every
//! field the service may omit when empty.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── Assistants ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct GetAssistantRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assistant {
    pub id: String,
    #[serde(default)]
    pub store_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListAssistantsRequest {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAssistantsResponse {
    #[serde(default)]
    pub assistants: Vec<AssistantSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantSummary {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

// ── Stores ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileRequest {
    pub store_id: String,
    pub filename: String,
}

/// One-time write destination for a single file.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadTicket {
    pub url: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

// ── Threads and runs ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadAndRunRequest {
    pub assistant_id: String,
    pub thread: ThreadRequest,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadRequest {
    pub messages: Vec<MessageRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    pub role: String,
    pub content: String,
}

impl MessageRequest {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "USER".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetRunRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: String,
    #[serde(default)]
    pub thread_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

// ── Messages ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesRequest {
    pub thread_id: String,
    pub run_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMessagesResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageContent {
    #[serde(default)]
    pub text: Option<String>,
}

// ── Audio ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TranscribeRequest {
    pub inline_data: InlineData,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    /// Base64-encoded audio bytes.
    pub data: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscribeResponse {
    #[serde(default)]
    pub text: String,
}
