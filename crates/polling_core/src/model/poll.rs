//! Poll, vote and result value types.
//!
//! # Responsibility
//! - Define the canonical poll snapshot and vote records.
//! - Provide snapshot helpers used by replace-on-update storage.
//!
//! # Invariants
//! - `Poll::options` keeps insertion order; that order drives result display.
//! - `Poll::id` and `Poll::created_at` survive every question/options update.
//! - A `Vote` is never modified after it is recorded.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a poll.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PollId = Uuid;

/// Immutable poll snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    /// Random v4 id assigned at creation.
    pub id: PollId,
    /// Free-form question text.
    pub question: String,
    /// Selectable option labels in display order.
    pub options: Vec<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Poll {
    /// Creates a new poll with a generated id, stamped with the current time.
    pub fn new(question: impl Into<String>, options: Vec<String>) -> Self {
        Self::with_id(Uuid::new_v4(), question, options, now_epoch_ms())
    }

    /// Creates a poll with caller-provided identity and creation time.
    pub fn with_id(
        id: PollId,
        question: impl Into<String>,
        options: Vec<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            question: question.into(),
            options,
            created_at,
        }
    }

    /// Returns a new snapshot with only the question replaced.
    pub fn with_question(&self, question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..self.clone()
        }
    }

    /// Returns a new snapshot with the option list replaced wholesale.
    pub fn with_options(&self, options: Vec<String>) -> Self {
        Self {
            options,
            ..self.clone()
        }
    }

    /// Returns whether `option` is one of the current option labels.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }
}

/// One user's recorded selection in one poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub poll_id: PollId,
    /// Opaque voter identity.
    pub user_id: String,
    /// Option label as it existed when the vote was cast.
    pub option: String,
    /// Unix epoch milliseconds.
    pub cast_at: i64,
}

impl Vote {
    /// Creates a vote stamped with the current time.
    pub fn new(poll_id: PollId, user_id: impl Into<String>, option: impl Into<String>) -> Self {
        Self {
            poll_id,
            user_id: user_id.into(),
            option: option.into(),
            cast_at: now_epoch_ms(),
        }
    }
}

/// Vote count for one option in a result projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCount {
    pub option: String,
    pub votes: u64,
}

/// Tally reprojected onto a poll's current options.
///
/// Derived on every query and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollResult {
    pub poll_id: PollId,
    pub question: String,
    /// One entry per current option, in poll order, zero-filled.
    pub counts: Vec<OptionCount>,
}

impl PollResult {
    /// Sum of votes over the surfaced options.
    ///
    /// Votes for options removed by an options update are not included.
    pub fn total_votes(&self) -> u64 {
        self.counts.iter().map(|entry| entry.votes).sum()
    }

    /// Count for one option label, `None` when the label is not surfaced.
    pub fn count_for(&self, option: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|entry| entry.option == option)
            .map(|entry| entry.votes)
    }

    /// Option labels in result order.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.counts.iter().map(|entry| entry.option.as_str())
    }
}

/// Current wall-clock time as Unix epoch milliseconds.
///
/// Clocks set before the epoch collapse to `0` instead of failing.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
