use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{
    Assistant, CreateThreadAndRunRequest, GetAssistantRequest, GetRunRequest,
    ListAssistantsRequest, ListAssistantsResponse, ListMessagesRequest, ListMessagesResponse,
    Run, TranscribeRequest, TranscribeResponse, UploadFileRequest, UploadTicket,
};

/// A logical RPC of the assistant service: where it lives, which status
/// means success, and the shapes going in and out.
pub trait ApiOperation {
    /// Operation name used in logs and error messages.
    const NAME: &'static str;
    /// Path appended to the service base URL.
    const PATH: &'static str;
    const EXPECTED_STATUS: StatusCode = StatusCode::OK;

    type Request: Serialize + Sync;
    type Response: DeserializeOwned;
}

pub struct GetAssistant;

impl ApiOperation for GetAssistant {
    const NAME: &'static str = "GetAssistant";
    const PATH: &'static str = "/ai.assistants.v0.Assistants/GetAssistant";
    type Request = GetAssistantRequest;
    type Response = Assistant;
}

pub struct ListAssistants;

impl ApiOperation for ListAssistants {
    const NAME: &'static str = "ListAssistants";
    const PATH: &'static str = "/ai.assistants.v0.Assistants/ListAssistants";
    type Request = ListAssistantsRequest;
    type Response = ListAssistantsResponse;
}

pub struct UploadFileUnary;

impl ApiOperation for UploadFileUnary {
    const NAME: &'static str = "UploadFileUnary";
    const PATH: &'static str = "/ai.Stores/UploadFileUnary";
    type Request = UploadFileRequest;
    type Response = UploadTicket;
}

pub struct CreateThreadAndRun;

impl ApiOperation for CreateThreadAndRun {
    const NAME: &'static str = "CreateThreadAndRun";
    const PATH: &'static str = "/ai.assistants.v0.Assistants/CreateThreadAndRun";
    type Request = CreateThreadAndRunRequest;
    type Response = Run;
}

pub struct GetRun;

impl ApiOperation for GetRun {
    const NAME: &'static str = "GetRun";
    const PATH: &'static str = "/ai.assistants.v0.Assistants/GetRun";
    type Request = GetRunRequest;
    type Response = Run;
}

pub struct ListMessages;

impl ApiOperation for ListMessages {
    const NAME: &'static str = "ListMessages";
    const PATH: &'static str = "/ai.assistants.v0.Assistants/ListMessages";
    type Request = ListMessagesRequest;
    type Response = ListMessagesResponse;
}

pub struct Transcribe;

impl ApiOperation for Transcribe {
    const NAME: &'static str = "Transcribe";
    const PATH: &'static str = "/ai.audio.v0.Transcriber/Transcribe";
    type Request = TranscribeRequest;
    type Response = TranscribeResponse;
}
