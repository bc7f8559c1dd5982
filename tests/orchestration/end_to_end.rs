use serde_json::json;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use r2g2::config::PollingConfig;
use r2g2::{Orchestrator, RunRequest};

use super::mock_service::{MockService, state};

fn fast_polling() -> PollingConfig {
    PollingConfig {
        interval_ms: 10,
        deadline_secs: None,
    }
}

#[tokio::test]
async fn single_file_run_returns_assistant_text() {
    let service = MockService::start().await;
    service.mount_assistant("A1", "S1").await;
    service.mount_upload("S1", "doc.txt", 200).await;
    service.mount_create_run("R1", "T1").await;
    service
        .mount_run_states("R1", "T1", &[state("RUNNING"), state("SUCCEEDED")])
        .await;
    service
        .mount_messages("T1", "R1", json!([{"content": [{"text": "hello"}]}]))
        .await;

    let input = TempDir::new().unwrap();
    std::fs::write(input.path().join("doc.txt"), "some document").unwrap();

    let orchestrator = Orchestrator::new(service.api(CancellationToken::new()), &fast_polling());
    let output = orchestrator
        .execute(&RunRequest {
            assistant_id: "A1".into(),
            input_dir: input.path().to_path_buf(),
            query: "Write me a story.".into(),
        })
        .await
        .unwrap();

    assert_eq!(output.text, "hello\n");
    assert_eq!(output.run_id, "R1");
    assert_eq!(output.thread_id, "T1");
    assert_eq!(output.uploaded, ["doc.txt"]);
    assert_eq!(
        service.call_log().await,
        [
            "GetAssistant",
            "UploadFileUnary",
            "PUT doc.txt",
            "CreateThreadAndRun",
            "GetRun",
            "GetRun",
            "ListMessages",
        ]
    );
}

#[tokio::test]
async fn files_upload_in_name_order_before_the_run_starts() {
    let service = MockService::start().await;
    service.mount_assistant("A1", "S1").await;
    for name in ["b.md", "a.md", "c.md"] {
        service.mount_upload("S1", name, 200).await;
    }
    service.mount_create_run("R1", "T1").await;
    service
        .mount_run_states("R1", "T1", &[state("succeeded")])
        .await;
    service
        .mount_messages(
            "T1",
            "R1",
            json!([
                {"role": "ASSISTANT", "content": [{"text": "a"}]},
                {"content": [{}]},
                {"content": [{"text": "b"}]}
            ]),
        )
        .await;

    let input = TempDir::new().unwrap();
    for name in ["b.md", "a.md", "c.md"] {
        std::fs::write(input.path().join(name), name).unwrap();
    }
    std::fs::create_dir(input.path().join("skipped")).unwrap();

    let orchestrator = Orchestrator::new(service.api(CancellationToken::new()), &fast_polling());
    let output = orchestrator
        .execute(&RunRequest {
            assistant_id: "A1".into(),
            input_dir: input.path().to_path_buf(),
            query: "Summarize".into(),
        })
        .await
        .unwrap();

    assert_eq!(output.text, "a\nb\n");
    assert_eq!(output.uploaded, ["a.md", "b.md", "c.md"]);
    assert_eq!(
        service.call_log().await,
        [
            "GetAssistant",
            "UploadFileUnary",
            "PUT a.md",
            "UploadFileUnary",
            "PUT b.md",
            "UploadFileUnary",
            "PUT c.md",
            "CreateThreadAndRun",
            "GetRun",
            "ListMessages",
        ]
    );
}

#[tokio::test]
async fn empty_input_directory_still_runs() {
    let service = MockService::start().await;
    service.mount_assistant("A1", "S1").await;
    service.mount_create_run("R1", "T1").await;
    service
        .mount_run_states("R1", "T1", &[state("Succeeded")])
        .await;
    service.mount_messages("T1", "R1", json!([])).await;

    let input = TempDir::new().unwrap();
    let orchestrator = Orchestrator::new(service.api(CancellationToken::new()), &fast_polling());
    let output = orchestrator
        .execute(&RunRequest {
            assistant_id: "A1".into(),
            input_dir: input.path().to_path_buf(),
            query: "q".into(),
        })
        .await
        .unwrap();

    assert!(output.uploaded.is_empty());
    assert_eq!(output.text, "");
}
