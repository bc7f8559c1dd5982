use std::ops::ControlFlow;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::state::RunState;
use crate::api::operation::{CreateThreadAndRun, GetRun};
use crate::api::types::{
    CreateThreadAndRunRequest, GetRunRequest, MessageRequest, Run, ThreadRequest,
};
use crate::api::{ApiClient, ApiOperation};
use crate::config::PollingConfig;
use crate::error::{Result, RunError};
use crate::shutdown::cancellable;

/// Starts runs and polls them until they reach a terminal state.
///
/// The controller never changes a run; it only observes it. Polling happens
/// at a fixed interval, optionally bounded by a deadline, and stops early
/// when the client's cancellation token fires.
pub struct RunController {
    api: ApiClient,
    interval: Duration,
    deadline: Option<Duration>,
}

impl RunController {
    pub fn new(api: ApiClient, polling: &PollingConfig) -> Self {
        Self {
            api,
            interval: polling.interval(),
            deadline: polling.deadline(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Create a thread holding one user message and start a run on it.
    pub async fn start(&self, assistant_id: &str, query: &str) -> Result<Run> {
        let run = self
            .api
            .call::<CreateThreadAndRun>(&CreateThreadAndRunRequest {
                assistant_id: assistant_id.to_string(),
                thread: ThreadRequest {
                    messages: vec![MessageRequest::user(query)],
                },
            })
            .await?;
        info!(run_id = %run.id, thread_id = %run.thread_id, "created run");
        Ok(run)
    }

    /// Poll `run_id` until it succeeds, fails, or needs a tool response.
    ///
    /// The first poll is immediate; each later poll follows a full interval
    /// after the previous reply. Errors while polling are not retried.
    pub async fn wait_for_completion(&self, run_id: &str) -> Result<Run> {
        let started = Instant::now();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut polls: u32 = 0;

        loop {
            cancellable(self.api.cancellation(), GetRun::NAME, ticker.tick()).await?;

            if let Some(deadline) = self.deadline
                && started.elapsed() >= deadline
            {
                return Err(RunError::DeadlineExceeded {
                    run_id: run_id.to_string(),
                    waited: started.elapsed(),
                }
                .into());
            }

            polls += 1;
            match self.check(run_id).await? {
                ControlFlow::Break(run) => {
                    debug!(run_id, polls, "run reached a terminal state");
                    return Ok(run);
                }
                ControlFlow::Continue(state) => {
                    debug!(run_id, polls, state = %state, "run still in progress");
                    // Measure the wait from the end of this poll, not its start.
                    ticker.reset();
                }
            }
        }
    }

    /// One observation: fetch the run and decide whether polling is over.
    async fn check(&self, run_id: &str) -> Result<ControlFlow<Run, RunState>> {
        let run = self
            .api
            .call::<GetRun>(&GetRunRequest {
                id: run_id.to_string(),
            })
            .await?;

        match RunState::of(&run) {
            RunState::Succeeded => Ok(ControlFlow::Break(run)),
            RunState::Failed => {
                let reason = run
                    .failure_reason
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| "no failure reason reported".to_string());
                warn!(run_id, reason = %reason, "run failed");
                Err(RunError::Failed {
                    run_id: run.id,
                    reason,
                }
                .into())
            }
            RunState::ToolResponseRequired => {
                warn!(run_id, "run requires a tool response");
                Err(RunError::ToolResponseRequired { run_id: run.id }.into())
            }
            state @ RunState::InProgress(_) => Ok(ControlFlow::Continue(state)),
        }
    }
}
