use crate::error::ConfigError;
use crate::query::DEFAULT_API_BASE;
use clap::{Parser, ValueEnum};
use slot_types::Target;
use std::time::Duration;
use url::Url;

/// Where slot notifications are sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotifierKind {
    /// Native desktop notification
    Desktop,
    /// Log line only (headless hosts)
    Log,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "slot-watcher")]
#[command(about = "Watches the Trusted Traveler scheduler for open appointment slots")]
#[command(
    long_about = "Polls the Trusted Traveler Programs scheduler API (Global Entry, NEXUS, ...) \n\
    for the soonest open interview slot and raises a desktop notification when one shows up.\n\n\
    Watch a specific enrollment center with --location, the remote interview pool with\n\
    --remote, or both."
)]
pub struct Config {
    /// Enrollment center code to watch; negative means none.
    ///
    /// See https://github.com/Drewster727/goes-notify#goes-center-codes
    #[arg(
        short,
        long,
        default_value_t = -1,
        allow_negative_numbers = true,
        env = "SLOT_WATCHER_LOCATION"
    )]
    pub location: i64,

    /// Also watch for remote interview openings
    #[arg(short, long, env = "SLOT_WATCHER_REMOTE")]
    pub remote: bool,

    /// Number of people to schedule for
    #[arg(short, long, default_value_t = 1, env = "SLOT_WATCHER_PEOPLE")]
    pub people: u32,

    /// How often to poll the API (e.g. "5m", "90s")
    #[arg(
        short,
        long,
        default_value = "5m",
        value_parser = humantime::parse_duration,
        env = "SLOT_WATCHER_EVERY"
    )]
    pub every: Duration,

    /// Log filter directive (overridden by RUST_LOG)
    #[arg(long, default_value = "info", env = "SLOT_WATCHER_LOG")]
    pub log_level: String,

    /// Send a test notification at startup
    #[arg(long)]
    pub test_notification: bool,

    /// Notification sink
    #[arg(long, value_enum, default_value_t = NotifierKind::Desktop, env = "SLOT_WATCHER_NOTIFIER")]
    pub notifier: NotifierKind,

    /// Scheduler API host
    #[arg(long, default_value = DEFAULT_API_BASE, env = "SLOT_WATCHER_API_BASE")]
    pub api_base: String,

    /// Timeout for each HTTP request
    #[arg(long, default_value = "30s", value_parser = humantime::parse_duration)]
    pub request_timeout: Duration,
}

impl Config {
    /// The targets to watch, in a stable order (location first).
    pub fn targets(&self) -> Result<Vec<Target>, ConfigError> {
        if self.people == 0 {
            return Err(ConfigError::InvalidPartySize(self.people));
        }

        let mut targets = Vec::new();
        if self.location >= 0 {
            targets.push(Target::Location {
                id: self.location,
                party_size: self.people,
            });
        }
        if self.remote {
            targets.push(Target::Remote {
                party_size: self.people,
            });
        }

        if targets.is_empty() {
            return Err(ConfigError::NoTarget);
        }
        Ok(targets)
    }

    pub fn poll_interval(&self) -> Result<Duration, ConfigError> {
        if self.every.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(self.every)
    }

    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.api_base)
            .map_err(|e| ConfigError::invalid_api_base(&self.api_base, e))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid_api_base(
                &self.api_base,
                "scheme must be http or https",
            ));
        }
        if url.cannot_be_a_base() || url.host().is_none() {
            return Err(ConfigError::invalid_api_base(&self.api_base, "missing host"));
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let argv = std::iter::once("slot-watcher").chain(args.iter().copied());
        Config::try_parse_from(argv).expect("args should parse")
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--remote"]);
        assert_eq!(config.location, -1);
        assert_eq!(config.people, 1);
        assert_eq!(config.every, Duration::from_secs(300));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.notifier, NotifierKind::Desktop);
        assert!(!config.test_notification);
        assert_eq!(
            config.api_base_url().unwrap().as_str(),
            "https://ttp.cbp.dhs.gov/"
        );
    }

    #[test]
    fn test_no_target_is_an_error() {
        let config = parse(&[]);
        assert!(matches!(config.targets(), Err(ConfigError::NoTarget)));

        let config = parse(&["--location", "-1"]);
        assert!(matches!(config.targets(), Err(ConfigError::NoTarget)));
    }

    #[test]
    fn test_location_and_remote() {
        let config = parse(&["--location", "5446", "--remote", "--people", "2"]);
        assert_eq!(
            config.targets().unwrap(),
            vec![
                Target::Location {
                    id: 5446,
                    party_size: 2
                },
                Target::Remote { party_size: 2 },
            ]
        );
    }

    #[test]
    fn test_location_only() {
        let config = parse(&["-l", "5140"]);
        assert_eq!(
            config.targets().unwrap(),
            vec![Target::Location {
                id: 5140,
                party_size: 1
            }]
        );
    }

    #[test]
    fn test_zero_people_rejected() {
        let config = parse(&["--remote", "--people", "0"]);
        assert!(matches!(
            config.targets(),
            Err(ConfigError::InvalidPartySize(0))
        ));
    }

    #[test]
    fn test_interval_parsing() {
        assert_eq!(
            parse(&["--remote", "--every", "90s"]).poll_interval().unwrap(),
            Duration::from_secs(90)
        );
        assert_eq!(
            parse(&["--remote", "--every", "1h 30m"]).poll_interval().unwrap(),
            Duration::from_secs(5400)
        );
        assert!(matches!(
            parse(&["--remote", "--every", "0s"]).poll_interval(),
            Err(ConfigError::ZeroInterval)
        ));
        assert!(Config::try_parse_from(["slot-watcher", "--every", "often"]).is_err());
    }

    #[test]
    fn test_api_base_validation() {
        let ok = parse(&["--remote", "--api-base", "http://127.0.0.1:8080"]);
        assert_eq!(ok.api_base_url().unwrap().port(), Some(8080));

        for bad in ["not a url", "ftp://example.com", "mailto:someone@example.com"] {
            let config = parse(&["--remote", "--api-base", bad]);
            assert!(
                matches!(config.api_base_url(), Err(ConfigError::InvalidApiBase { .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_notifier_choice() {
        assert_eq!(
            parse(&["--remote", "--notifier", "log"]).notifier,
            NotifierKind::Log
        );
    }
}
