use tokio::select;
use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{info, warn};

async fn stop_signal() {
    let (mut sigint, mut sigterm) = match (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) {
        (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
        (Err(err), _) | (_, Err(err)) => {
            warn!("unix signal handlers unavailable, falling back to ctrl-c: {}", err);
            _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    select! {
        _ = sigint.recv() => info!("received SIGINT"),
        _ = sigterm.recv() => info!("received SIGTERM"),
    }
}

/// Returns a token cancelled on SIGINT/SIGTERM and a tracker closed at the same time.
pub fn bind() -> (CancellationToken, TaskTracker) {
    let token = CancellationToken::new();
    let tracker = TaskTracker::new();

    {
        let token = token.clone();
        let tracker = tracker.clone();

        tokio::spawn(async move {
            select! {
                _ = stop_signal() => (),
                _ = token.cancelled() => (),
            }

            token.cancel();
            tracker.close();
        });
    }

    (token, tracker)
}
