//! Storage layer contracts and in-memory implementation.
//!
//! # Responsibility
//! - Define the keyed storage contract consumed by the service layer.
//! - Keep locking and map details out of business orchestration.
//!
//! # Invariants
//! - Store APIs never raise errors; absence is reported as `Option`/`bool`.
//! - Every operation is atomic per poll id (and per poll/user vote slot).

pub mod poll_store;
