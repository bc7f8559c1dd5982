//! Assistant lookups.

use crate::api::ApiClient;
use crate::api::operation::{GetAssistant, ListAssistants};
use crate::api::types::{
    Assistant, AssistantSummary, GetAssistantRequest, ListAssistantsRequest,
};
use crate::error::Result;

pub async fn get_assistant(api: &ApiClient, id: &str) -> Result<Assistant> {
    api.call::<GetAssistant>(&GetAssistantRequest { id: id.to_string() })
        .await
}

/// First page of assistants visible to the caller.
pub async fn list_assistants(api: &ApiClient) -> Result<Vec<AssistantSummary>> {
    let response = api
        .call::<ListAssistants>(&ListAssistantsRequest::default())
        .await?;
    Ok(response.assistants)
}
