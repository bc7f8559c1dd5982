use crate::cli::commands::Commands;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;

use r2g2::api::build_api_client;
use r2g2::assistants::list_assistants;
use r2g2::auth::{TokenSource, token_source};
use r2g2::orchestrator::api_client;
use r2g2::transcribe::transcribe_file;
use r2g2::{Config, Orchestrator, RunRequest};

/// Upload → run → collect, then print the assistant's answer.
async fn run_assistant(
    config: &Config,
    cancel: CancellationToken,
    assistant: String,
    dir: Option<PathBuf>,
    query: Option<String>,
) -> Result<()> {
    let request = RunRequest {
        assistant_id: assistant,
        input_dir: dir.unwrap_or_else(|| config.run.input_dir.clone()),
        query: query.unwrap_or_else(|| config.run.query.clone()),
    };

    let orchestrator = Orchestrator::from_config(config, cancel)?;
    let output = orchestrator
        .execute(&request)
        .await
        .with_context(|| format!("Failed to run assistant {}", request.assistant_id))?;

    info!(
        run_id = %output.run_id,
        uploaded = output.uploaded.len(),
        "run complete"
    );
    print!("{}", output.text);
    Ok(())
}

pub async fn dispatch(command: Commands, config: Config, cancel: CancellationToken) -> Result<()> {
    match command {
        Commands::Run {
            assistant,
            dir,
            query,
        } => run_assistant(&config, cancel, assistant, dir, query).await,

        Commands::Assistants => {
            let api = api_client(&config, cancel)?;
            let assistants = list_assistants(&api)
                .await
                .context("Failed to list assistants")?;
            for assistant in assistants {
                println!("{} {}", assistant.display_name, assistant.id);
            }
            Ok(())
        }

        Commands::Transcribe { file } => {
            let api = api_client(&config, cancel)?;
            let text = transcribe_file(&api, &file)
                .await
                .with_context(|| format!("Failed to transcribe {}", file.display()))?;
            println!("{text}");
            Ok(())
        }

        Commands::Token => {
            let tokens = token_source(&config, build_api_client(&config.http), cancel)?;
            let token = tokens
                .bearer_token()
                .await
                .context("Failed to obtain access token")?;
            println!("{token}");
            Ok(())
        }
    }
}
