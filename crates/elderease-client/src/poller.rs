//! Periodic background jobs tied to a handle's lifetime.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Runs an async job immediately and then every `interval`.
#[derive(Debug, Clone)]
pub struct Poller {
    name: &'static str,
    interval: Duration,
}

impl Poller {
    pub fn new(name: &'static str, interval: Duration) -> Self {
        Self { name, interval }
    }

    /// Spawn the loop on the current runtime.
    ///
    /// Runs never overlap: a slow job delays the next tick instead of
    /// stacking up. The loop stops once the returned handle is cancelled or
    /// dropped.
    pub fn spawn<F, Fut>(self, mut job: F) -> PollHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let Poller { name, interval } = self;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(poller = name, interval_secs = interval.as_secs(), "Poller started");

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        debug!(poller = name, "Poll tick");
                        job().await;
                    }
                }
            }

            info!(poller = name, "Poller stopped");
        });

        PollHandle {
            cancel,
            task: Some(task),
        }
    }
}

/// Owning handle for a running [`Poller`]. Dropping it stops the loop.
#[derive(Debug)]
pub struct PollHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Ask the loop to stop after the current run.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel and wait for the loop to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, panicked = e.is_panic(), "Poller task did not exit cleanly");
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
