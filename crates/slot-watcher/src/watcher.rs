//! Recurring poll loop for a single target.

use crate::decoder::decode;
use crate::error::{CycleError, FetchError};
use crate::evaluator::evaluate;
use crate::fetcher::Fetcher;
use crate::notifier::Notifier;
use crate::query::slots_url;
use slot_types::{NotificationIntent, PollResult, Target};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use url::Url;

/// What a single cycle amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    NoSlots,
    SlotsFound { found: usize, delivered: usize },
    /// Fetch or decode failed; nothing was evaluated
    Failed,
}

/// Owns one target's timer and runs fetch → decode → evaluate → notify.
pub struct Watcher {
    target: Target,
    url: Url,
    interval: Duration,
    fetcher: Arc<dyn Fetcher>,
    notifier: Arc<dyn Notifier>,
}

impl Watcher {
    pub fn new(
        target: Target,
        api_base: &Url,
        interval: Duration,
        fetcher: Arc<dyn Fetcher>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            target,
            url: slots_url(api_base, &target),
            interval,
            fetcher,
            notifier,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Poll immediately, then once per interval until cancelled.
    ///
    /// A cycle that outlasts the interval delays the next tick rather than
    /// causing a burst of catch-up cycles.
    #[tracing::instrument(name = "watcher", skip_all, fields(target = %self.target))]
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!("Watcher started (interval: {:?}, url: {})", self.interval, self.url);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tracing::debug!("Running poll cycle");
            let outcome = self.run_cycle(&cancel).await;
            tracing::debug!(?outcome, "Poll cycle finished");
        }

        tracing::info!("Watcher stopped");
    }

    /// One complete cycle. Every failure is logged and contained here.
    pub async fn run_cycle(&self, cancel: &CancellationToken) -> CycleOutcome {
        let result = match self.poll(cancel).await {
            Ok(result) => result,
            Err(CycleError::Fetch(FetchError::Cancelled)) => {
                tracing::debug!("Poll cancelled");
                return CycleOutcome::Failed;
            }
            Err(CycleError::Fetch(e)) => {
                tracing::error!("Failed to scrape {}: {}", self.url, e);
                return CycleOutcome::Failed;
            }
            Err(CycleError::Decode(e)) => {
                tracing::error!("{}", e);
                return CycleOutcome::Failed;
            }
        };

        let intents = evaluate(&result);
        if intents.is_empty() {
            return CycleOutcome::NoSlots;
        }

        let found = intents.len();
        let delivered = self.deliver_all(&intents).await;
        CycleOutcome::SlotsFound { found, delivered }
    }

    async fn poll(&self, cancel: &CancellationToken) -> Result<PollResult, CycleError> {
        let body = self.fetcher.fetch(&self.url, cancel).await?;
        let appointments = decode(&body)?;
        Ok(PollResult::new(self.url.clone(), appointments))
    }

    async fn deliver_all(&self, intents: &[NotificationIntent]) -> usize {
        let mut delivered = 0;
        for intent in intents {
            match self.notifier.deliver(intent).await {
                Ok(()) => delivered += 1,
                Err(e) => tracing::error!("Failed to push notification: {}", e),
            }
        }
        delivered
    }
}
