//! Composition root for the running watchers.

use crate::watcher::Watcher;
use std::future::Future;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Runs one task per watcher until told to stop.
pub struct Scheduler {
    watchers: Vec<Watcher>,
    cancel: CancellationToken,
}

impl Scheduler {
    pub fn new(watchers: Vec<Watcher>) -> Self {
        Self {
            watchers,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops every watcher when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Spawn all watchers and wait for them to finish.
    ///
    /// Watchers only finish once cancelled; a watcher task that dies early is
    /// logged and the others keep running.
    pub async fn run(self) {
        tracing::info!("Starting {} watcher(s)", self.watchers.len());

        let mut tasks = JoinSet::new();
        for watcher in self.watchers {
            tasks.spawn(watcher.run(self.cancel.child_token()));
        }

        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                tracing::error!("Watcher task error: {:?}", e);
            }
        }

        tracing::info!("All watchers stopped");
    }

    /// Run until `shutdown` resolves, then cancel and drain the watchers.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let cancel = self.cancellation_token();
        let mut handle = tokio::spawn(self.run());

        tokio::select! {
            _ = shutdown => {
                tracing::info!("Shutdown signal received, stopping watchers...");
                cancel.cancel();
            }
            // Only reachable if there were no watchers to run
            _ = &mut handle => return,
        }

        if let Err(e) = handle.await {
            tracing::error!("Scheduler task error: {:?}", e);
        }
    }
}
