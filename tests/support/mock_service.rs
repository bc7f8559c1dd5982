#![allow(dead_code)]

use std::sync::Arc;

use reqwest::Client;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use r2g2::api::ApiClient;
use r2g2::auth::StaticToken;

pub const TOKEN: &str = "test-token";

const ASSISTANTS: &str = "/ai.assistants.v0.Assistants";

/// Fake assistant service backed by a wiremock server.
pub struct MockService {
    pub server: MockServer,
}

impl MockService {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn api(&self, cancel: CancellationToken) -> ApiClient {
        ApiClient::new(
            Client::new(),
            &self.server.uri(),
            Arc::new(StaticToken::new(TOKEN)),
            cancel,
        )
    }

    pub async fn mount_assistant(&self, id: &str, store_id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("{ASSISTANTS}/GetAssistant")))
            .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
            .and(body_json(json!({"id": id})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": id, "storeId": store_id})),
            )
            .mount(&self.server)
            .await;
    }

    /// Ticket for `filename` pointing back at this server, and the PUT that
    /// answers with `put_status`.
    pub async fn mount_upload(&self, store_id: &str, filename: &str, put_status: u16) {
        Mock::given(method("POST"))
            .and(path("/ai.Stores/UploadFileUnary"))
            .and(body_json(json!({"storeId": store_id, "filename": filename})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "url": format!("{}/blob/{filename}", self.server.uri()),
                "headers": {"x-upload-ticket": filename}
            })))
            .mount(&self.server)
            .await;

        Mock::given(method("PUT"))
            .and(path(format!("/blob/{filename}")))
            .and(header("x-upload-ticket", filename))
            .respond_with(ResponseTemplate::new(put_status))
            .mount(&self.server)
            .await;
    }

    /// Ticket request for `filename` refused with `status`.
    pub async fn mount_rejected_ticket(&self, store_id: &str, filename: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path("/ai.Stores/UploadFileUnary"))
            .and(body_json(json!({"storeId": store_id, "filename": filename})))
            .respond_with(ResponseTemplate::new(status).set_body_string("store unavailable"))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_create_run(&self, run_id: &str, thread_id: &str) {
        Mock::given(method("POST"))
            .and(path(format!("{ASSISTANTS}/CreateThreadAndRun")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": run_id, "threadId": thread_id, "state": "QUEUED"
            })))
            .mount(&self.server)
            .await;
    }

    /// `GetRun` answers with `states` in order; the last one repeats.
    pub async fn mount_run_states(&self, run_id: &str, thread_id: &str, states: &[Value]) {
        let last = states.len().saturating_sub(1);
        for (i, state) in states.iter().enumerate() {
            let mut body = json!({"id": run_id, "threadId": thread_id});
            if let (Some(body), Some(extra)) = (body.as_object_mut(), state.as_object()) {
                body.extend(extra.clone());
            }

            let priority = u8::try_from(i + 1).unwrap_or(u8::MAX);
            let mock = Mock::given(method("POST"))
                .and(path(format!("{ASSISTANTS}/GetRun")))
                .and(body_json(json!({"id": run_id})))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .with_priority(priority);
            let mock = if i < last { mock.up_to_n_times(1) } else { mock };
            mock.mount(&self.server).await;
        }
    }

    pub async fn mount_messages(&self, thread_id: &str, run_id: &str, messages: Value) {
        Mock::given(method("POST"))
            .and(path(format!("{ASSISTANTS}/ListMessages")))
            .and(body_json(json!({"threadId": thread_id, "runId": run_id})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"messages": messages})))
            .mount(&self.server)
            .await;
    }

    /// Received calls in order: the RPC name for service calls, `PUT <file>`
    /// for storage writes.
    pub async fn call_log(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| {
                let last = request.url.path().rsplit('/').next().unwrap_or_default();
                if request.method.as_str() == "PUT" {
                    format!("PUT {last}")
                } else {
                    last.to_string()
                }
            })
            .collect()
    }
}

pub fn state(name: &str) -> Value {
    json!({"state": name})
}

pub fn failed(reason: &str) -> Value {
    json!({"state": "FAILED", "failureReason": reason})
}
