use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use std::fmt;
use url::Url;

/// Format used by the scheduler API for slot timestamps (no timezone).
pub const SLOT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Title shown on every slot notification.
pub const NOTIFICATION_TITLE: &str = "Appointment Found!";

/// Something being watched for open slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A specific enrollment center
    Location { id: i64, party_size: u32 },
    /// The remote interview pool
    Remote { party_size: u32 },
}

impl Target {
    pub fn party_size(&self) -> u32 {
        match self {
            Target::Location { party_size, .. } | Target::Remote { party_size } => *party_size,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Location { id, party_size } => {
                write!(f, "location {} (party of {})", id, party_size)
            }
            Target::Remote { party_size } => write!(f, "remote (party of {})", party_size),
        }
    }
}

/// One slot as returned by `/schedulerapi/slots`.
///
/// Every field is optional on the wire; missing or `null` fields take their
/// zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppointmentRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub location_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub start_timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(rename = "duration", deserialize_with = "null_as_default")]
    pub duration_minutes: i64,
    #[serde(rename = "remoteInd", deserialize_with = "null_as_default")]
    pub is_remote: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AppointmentRecord {
    /// Parsed start time, if the API sent one in the expected format.
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.start_timestamp, SLOT_TIMESTAMP_FORMAT).ok()
    }

    /// Human-friendly start time, falling back to the raw string.
    pub fn display_start(&self) -> String {
        match self.start_time() {
            Some(t) => t.format("%a %b %-d %Y %H:%M").to_string(),
            None => self.start_timestamp.clone(),
        }
    }
}

/// Outcome of a single fetch for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResult {
    pub url: Url,
    pub appointments: Vec<AppointmentRecord>,
}

impl PollResult {
    pub fn new(url: Url, appointments: Vec<AppointmentRecord>) -> Self {
        Self { url, appointments }
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}

/// A notification ready to be handed to a notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationIntent {
    pub context: Url,
    pub title: String,
    pub message: String,
}

impl NotificationIntent {
    pub fn new(context: Url, message: impl Into<String>) -> Self {
        Self {
            context,
            title: NOTIFICATION_TITLE.to_string(),
            message: message.into(),
        }
    }
}
