//! Notification sinks.
//!
//! The watcher only sees the [`Notifier`] trait; which sink is used is decided
//! once in `main` from the `--notifier` flag.

use crate::error::NotifyError;
use async_trait::async_trait;
use slot_types::NotificationIntent;
use url::Url;

pub const APP_NAME: &str = "Global Entry Schedule Watcher";

#[cfg(target_os = "macos")]
const ALERT_SOUND: &str = "Glass";
#[cfg(target_os = "windows")]
const ALERT_SOUND: &str = "Reminder";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const ALERT_SOUND: &str = "alarm-clock-elapsed";

/// Intent sent once at startup with `--test-notification`.
pub fn test_intent(context: Url) -> NotificationIntent {
    NotificationIntent {
        context,
        title: "Test notification".to_string(),
        message: format!("{} is running", APP_NAME),
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, intent: &NotificationIntent) -> Result<(), NotifyError>;
}

/// Native desktop notifications via notify-rust.
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier;

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn deliver(&self, intent: &NotificationIntent) -> Result<(), NotifyError> {
        let title = intent.title.clone();
        let message = intent.message.clone();

        // Showing a notification talks to D-Bus / WinRT / NSUserNotification
        // synchronously.
        tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .appname(APP_NAME)
                .summary(&title)
                .body(&message)
                .sound_name(ALERT_SOUND)
                .show()
                .map(|_| ())
                .map_err(NotifyError::backend)
        })
        .await?
    }
}

/// Writes notifications to the log instead of the desktop.
///
/// Useful on headless hosts where only the log is watched.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, intent: &NotificationIntent) -> Result<(), NotifyError> {
        tracing::info!(
            context = %intent.context,
            "[{}] {}",
            intent.title,
            intent.message
        );
        Ok(())
    }
}
