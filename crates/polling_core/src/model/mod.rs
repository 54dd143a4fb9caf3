//! Domain model for polls, votes and derived results.
//!
//! # Responsibility
//! - Define the immutable value types shared by store and service layers.
//! - Keep result shaping (ordered, zero-filled counts) out of storage.
//!
//! # Invariants
//! - Every poll is identified by a stable `PollId` that is never reused.
//! - Poll snapshots are replaced wholesale, never mutated in place.

pub mod poll;
