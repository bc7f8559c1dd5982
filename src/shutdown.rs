//! Process-wide cancellation.
//!
//! One root [`CancellationToken`] is created per invocation and handed to
//! every component. SIGINT/SIGTERM cancel it; every network call and the run
//! poll wait race against it.

use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{R2g2Error, Result};

/// Drive `fut` to completion unless `token` fires first.
pub(crate) async fn cancellable<F>(
    token: &CancellationToken,
    operation: &'static str,
    fut: F,
) -> Result<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        () = token.cancelled() => Err(R2g2Error::Cancelled { operation }),
        out = fut => Ok(out),
    }
}

/// Spawn a task that cancels `token` when the process receives SIGINT or
/// SIGTERM. The task ends on its own once the token is cancelled elsewhere.
pub fn cancel_on_signals(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            () = wait_for_signal() => {
                info!("shutdown signal received; cancelling in-flight work");
                token.cancel();
            }
            () = token.cancelled() => {}
        }
    })
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                () = ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        Err(e) => {
            warn!(error = %e, "failed to listen for SIGTERM");
            ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    ctrl_c().await;
}
