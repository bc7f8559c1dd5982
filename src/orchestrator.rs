//! The end-to-end sequence: resolve the assistant, upload the input files
//! into its store, run it with a query and collect the output text.

use std::path::PathBuf;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::{ApiClient, build_api_client, build_storage_client};
use crate::assistants::get_assistant;
use crate::auth::{TokenSource, token_source};
use crate::config::{Config, PollingConfig};
use crate::error::Result;
use crate::messages::fetch_output;
use crate::runs::RunController;
use crate::stores::{Uploader, collect_input_files};

/// One invocation: which assistant, which files, which question.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub assistant_id: String,
    pub input_dir: PathBuf,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub run_id: String,
    pub thread_id: String,
    /// File names uploaded to the assistant's store, in upload order.
    pub uploaded: Vec<String>,
    pub text: String,
}

pub struct Orchestrator {
    api: ApiClient,
    uploader: Uploader,
    runs: RunController,
}

impl Orchestrator {
    pub fn new(api: ApiClient, polling: &PollingConfig) -> Self {
        Self {
            uploader: Uploader::new(api.clone()),
            runs: RunController::new(api.clone(), polling),
            api,
        }
    }

    /// Build the HTTP client and token source described by `config`.
    pub fn from_config(config: &Config, cancel: CancellationToken) -> Result<Self> {
        let api = api_client(config, cancel)?;
        Ok(Self::new(api, &config.polling))
    }

    /// Run the whole sequence. Any failure aborts it; nothing is rolled back.
    pub async fn execute(&self, request: &RunRequest) -> Result<RunOutput> {
        let assistant = get_assistant(&self.api, &request.assistant_id).await?;
        info!(assistant_id = %assistant.id, store_id = %assistant.store_id, "resolved assistant");

        let files = collect_input_files(&request.input_dir)?;
        info!(
            dir = %request.input_dir.display(),
            files = files.len(),
            "uploading input files"
        );
        let uploaded = self.uploader.upload_all(&assistant.store_id, &files).await?;

        let run = self.runs.start(&assistant.id, &request.query).await?;
        let run = self.runs.wait_for_completion(&run.id).await?;
        info!(run_id = %run.id, "run succeeded");

        let text = fetch_output(&self.api, &run.thread_id, &run.id).await?;
        Ok(RunOutput {
            run_id: run.id,
            thread_id: run.thread_id,
            uploaded,
            text,
        })
    }
}

/// Authenticated API client for `config`, sharing one connection pool
/// between the service calls and the token exchange. Object writes use a
/// storage client without the whole-request timeout.
pub fn api_client(config: &Config, cancel: CancellationToken) -> Result<ApiClient> {
    let http = build_api_client(&config.http);
    let tokens: Arc<dyn TokenSource> = token_source(config, http.clone(), cancel.clone())?;
    Ok(ApiClient::new(http, config.api_base(), tokens, cancel)
        .with_storage_client(build_storage_client(&config.http)))
}
