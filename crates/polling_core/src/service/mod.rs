//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Own every business rule and every error surfaced to callers.

pub mod poll_service;
