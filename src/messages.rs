//! Flattening a run's messages into plain text.

use tracing::debug;

use crate::api::ApiClient;
use crate::api::operation::ListMessages;
use crate::api::types::{ListMessagesRequest, Message};
use crate::error::Result;

/// Fetch the messages produced by `run_id` on `thread_id` and flatten them.
pub async fn fetch_output(api: &ApiClient, thread_id: &str, run_id: &str) -> Result<String> {
    let response = api
        .call::<ListMessages>(&ListMessagesRequest {
            thread_id: thread_id.to_string(),
            run_id: run_id.to_string(),
        })
        .await?;
    debug!(
        thread_id,
        run_id,
        messages = response.messages.len(),
        "fetched run messages"
    );
    Ok(flatten_messages(&response.messages))
}

/// Every non-empty text part, in order, each followed by a newline.
/// Parts without text are skipped; every message counts regardless of role.
pub fn flatten_messages(messages: &[Message]) -> String {
    messages
        .iter()
        .flat_map(|message| &message.content)
        .filter_map(|part| part.text.as_deref())
        .filter(|text| !text.is_empty())
        .fold(String::new(), |mut out, text| {
            out.push_str(text);
            out.push('\n');
            out
        })
}
