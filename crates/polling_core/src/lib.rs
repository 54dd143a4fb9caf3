//! Core domain logic for in-memory polls.
//! This crate is the single source of truth for poll and vote invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::poll::{OptionCount, Poll, PollId, PollResult, Vote};
pub use service::poll_service::{PollService, PollServiceError, PollServiceResult};
pub use store::poll_store::{InMemoryPollStore, PollStore, VoteInsert};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
