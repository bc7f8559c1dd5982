use std::time::Duration;

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use r2g2::config::PollingConfig;
use r2g2::{Orchestrator, RunRequest};

use super::mock_service::{MockService, state};

#[tokio::test]
async fn cancelling_during_poll_wait_stops_the_run_promptly() {
    let service = MockService::start().await;
    service.mount_assistant("A1", "S1").await;
    service.mount_create_run("R1", "T1").await;
    service
        .mount_run_states("R1", "T1", &[state("RUNNING")])
        .await;

    let cancel = CancellationToken::new();
    let orchestrator = Orchestrator::new(
        service.api(cancel.clone()),
        &PollingConfig {
            interval_ms: 60_000,
            deadline_secs: None,
        },
    );

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let input = TempDir::new().unwrap();
    let err = tokio::time::timeout(
        Duration::from_secs(5),
        orchestrator.execute(&RunRequest {
            assistant_id: "A1".into(),
            input_dir: input.path().to_path_buf(),
            query: "q".into(),
        }),
    )
    .await
    .expect("cancelled run should return well before the poll interval")
    .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(
        service.call_log().await,
        ["GetAssistant", "CreateThreadAndRun", "GetRun"]
    );
}

#[tokio::test]
async fn cancelled_before_start_sends_nothing() {
    let service = MockService::start().await;
    service.mount_assistant("A1", "S1").await;

    let cancel = CancellationToken::new();
    cancel.cancel();
    let orchestrator = Orchestrator::new(service.api(cancel), &PollingConfig::default());

    let input = TempDir::new().unwrap();
    let err = orchestrator
        .execute(&RunRequest {
            assistant_id: "A1".into(),
            input_dir: input.path().to_path_buf(),
            query: "q".into(),
        })
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(service.call_log().await.is_empty());
}
