//! Error types for the watcher.
//!
//! Each failure domain gets its own enum so a cycle can log precisely what
//! went wrong and carry on. Only [`ConfigError`] is fatal, and only at startup.

use thiserror::Error;

/// Invalid startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither a location nor the remote pool was requested
    #[error("nothing to watch: specify --remote and/or a --location (e.g. https://github.com/Drewster727/goes-notify#goes-center-codes)")]
    NoTarget,

    /// Party size must be at least one person
    #[error("party size must be a positive integer, got {0}")]
    InvalidPartySize(u32),

    /// A zero poll interval would spin
    #[error("poll interval must be greater than zero")]
    ZeroInterval,

    /// The scheduler API base could not be used to build slot URLs
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidApiBase { url: String, reason: String },
}

impl ConfigError {
    pub fn invalid_api_base(url: impl Into<String>, reason: impl ToString) -> Self {
        ConfigError::InvalidApiBase {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Failure to retrieve a response body
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout, or body read error
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The watcher was cancelled while the request was in flight
    #[error("request cancelled")]
    Cancelled,
}

/// Response body was not a JSON array of appointments
#[derive(Debug, Error)]
#[error("decoding response body ({payload:?}): {source}")]
pub struct DecodeError {
    #[source]
    pub source: serde_json::Error,
    /// The offending body, lossily converted for logging
    pub payload: String,
}

impl DecodeError {
    pub fn new(source: serde_json::Error, body: &[u8]) -> Self {
        Self {
            source,
            payload: String::from_utf8_lossy(body).into_owned(),
        }
    }
}

/// The notification sink rejected or failed to show an alert
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification backend error: {0}")]
    Backend(String),

    #[error("notification task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl NotifyError {
    pub fn backend(err: impl ToString) -> Self {
        NotifyError::Backend(err.to_string())
    }
}

/// Anything that can end a single cycle early
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
