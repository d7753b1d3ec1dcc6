//! Watches the Trusted Traveler scheduler API for open appointment slots.
//!
//! Each configured [`slot_types::Target`] gets a [`watcher::Watcher`] that
//! polls on its own interval; the [`scheduler::Scheduler`] runs them side by
//! side until shutdown.

pub mod config;
pub mod decoder;
pub mod error;
pub mod evaluator;
pub mod fetcher;
pub mod notifier;
pub mod query;
pub mod scheduler;
pub mod watcher;
