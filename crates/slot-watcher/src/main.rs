use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slot_watcher::config::{Config, NotifierKind};
use slot_watcher::fetcher::HttpFetcher;
use slot_watcher::notifier::{test_intent, DesktopNotifier, LogNotifier, Notifier};
use slot_watcher::scheduler::Scheduler;
use slot_watcher::watcher::Watcher;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let targets = config.targets()?;
    let interval = config.poll_interval()?;
    let api_base = config.api_base_url()?;

    tracing::info!("Starting slot watcher");

    let fetcher = Arc::new(
        HttpFetcher::new(config.request_timeout).context("Failed to build HTTP client")?,
    );
    let notifier: Arc<dyn Notifier> = match config.notifier {
        NotifierKind::Desktop => Arc::new(DesktopNotifier),
        NotifierKind::Log => Arc::new(LogNotifier),
    };

    let watchers: Vec<Watcher> = targets
        .into_iter()
        .map(|target| {
            Watcher::new(
                target,
                &api_base,
                interval,
                fetcher.clone(),
                notifier.clone(),
            )
        })
        .collect();

    if config.test_notification {
        if let Some(first) = watchers.first() {
            let intent = test_intent(first.url().clone());
            match notifier.deliver(&intent).await {
                Ok(()) => tracing::info!("Test notification sent"),
                Err(e) => tracing::error!("Failed to push test notification: {}", e),
            }
        }
    }

    tracing::info!("Watching. Press Ctrl+C to stop.");
    Scheduler::new(watchers).run_until(shutdown_signal()).await;

    tracing::info!("Slot watcher stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
