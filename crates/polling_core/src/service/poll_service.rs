//! Poll use-case service.
//!
//! # Responsibility
//! - Create, update and delete polls through a `PollStore`.
//! - Validate and record votes (poll existence, option membership, one vote
//!   per user).
//! - Project raw tallies onto the poll's current options.
//!
//! # Invariants
//! - The service holds no mutable state of its own.
//! - `vote_in_poll` validates fully before it mutates anything.
//! - Results list exactly the current options, in poll order, zero-filled.
//! - Update/delete report a missing poll as `false`; vote/results report it
//!   as `PollServiceError::PollNotFound`.
//!
//! # Logging
//! Events carry ids, counts and outcome codes only. Question text, option
//! labels and user ids are caller-controlled and stay out of the log.

use crate::model::poll::{OptionCount, Poll, PollId, PollResult, Vote};
use crate::store::poll_store::{PollStore, VoteInsert};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PollServiceResult<T> = Result<T, PollServiceError>;

/// Service error for vote and result use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollServiceError {
    /// Target poll does not exist.
    PollNotFound(PollId),
    /// Option label is not part of the poll's current options.
    InvalidOption { poll_id: PollId, option: String },
    /// User already has a recorded vote on this poll.
    DuplicateVote { poll_id: PollId, user_id: String },
}

impl PollServiceError {
    /// Stable machine-readable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PollNotFound(_) => "poll_not_found",
            Self::InvalidOption { .. } => "invalid_option",
            Self::DuplicateVote { .. } => "duplicate_vote",
        }
    }
}

impl Display for PollServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PollNotFound(poll_id) => write!(f, "poll not found: {poll_id}"),
            Self::InvalidOption { poll_id, option } => {
                write!(f, "invalid option `{option}` for poll {poll_id}")
            }
            Self::DuplicateVote { poll_id, user_id } => {
                write!(f, "user `{user_id}` has already voted in poll {poll_id}")
            }
        }
    }
}

impl Error for PollServiceError {}

/// Poll service facade over store implementations.
pub struct PollService<S: PollStore> {
    store: S,
}

impl<S: PollStore> PollService<S> {
    /// Creates a service that takes ownership of `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates and stores a new poll.
    ///
    /// # Contract
    /// - Assigns a fresh random id and the current timestamp.
    /// - Options are copied into storage; no validation is applied to the
    ///   question or the option list.
    pub fn create_poll<I, T>(&self, question: impl Into<String>, options: I) -> Poll
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let poll = Poll::new(question, options);
        self.store.put(poll.clone());
        info!(
            "event=poll_create module=service status=ok poll_id={} option_count={}",
            poll.id,
            poll.options.len()
        );
        poll
    }

    /// Gets one poll snapshot by id.
    pub fn get_poll(&self, poll_id: PollId) -> Option<Poll> {
        self.store.get(poll_id)
    }

    /// Lists all polls ordered by creation time.
    pub fn list_polls(&self) -> Vec<Poll> {
        self.store.list()
    }

    /// Replaces the question of an existing poll.
    ///
    /// Returns `false` when the poll does not exist.
    pub fn update_poll_question(&self, poll_id: PollId, question: impl AsRef<str>) -> bool {
        let updated = self.store.replace_question(poll_id, question.as_ref());
        info!(
            "event=poll_update_question module=service status={} poll_id={poll_id}",
            status_label(updated)
        );
        updated
    }

    /// Replaces the full option list of an existing poll.
    ///
    /// Votes for options that disappear stay stored but are no longer
    /// surfaced by `view_poll_results`. Returns `false` when the poll does
    /// not exist.
    pub fn update_poll_options<I, T>(&self, poll_id: PollId, options: I) -> bool
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let option_count = options.len();
        let updated = self.store.replace_options(poll_id, options);
        info!(
            "event=poll_update_options module=service status={} poll_id={poll_id} option_count={option_count}",
            status_label(updated)
        );
        updated
    }

    /// Deletes a poll and all of its votes.
    ///
    /// Returns `false` when the poll does not exist.
    pub fn delete_poll(&self, poll_id: PollId) -> bool {
        let deleted = self.store.delete(poll_id);
        info!(
            "event=poll_delete module=service status={} poll_id={poll_id}",
            status_label(deleted)
        );
        deleted
    }

    /// Records one vote for `user_id`.
    ///
    /// # Errors
    /// - `PollNotFound` when the poll is absent (or removed mid-call).
    /// - `InvalidOption` when `option` is not a current option.
    /// - `DuplicateVote` when the user already voted; the first vote stays.
    pub fn vote_in_poll(
        &self,
        poll_id: PollId,
        user_id: impl Into<String>,
        option: impl Into<String>,
    ) -> PollServiceResult<Vote> {
        let result = self.try_vote(poll_id, user_id.into(), option.into());
        match &result {
            Ok(_) => info!("event=vote_cast module=service status=ok poll_id={poll_id}"),
            Err(err) => warn!(
                "event=vote_cast module=service status=rejected poll_id={poll_id} error_code={}",
                err.code()
            ),
        }
        result
    }

    fn try_vote(
        &self,
        poll_id: PollId,
        user_id: String,
        option: String,
    ) -> PollServiceResult<Vote> {
        let poll = self
            .store
            .get(poll_id)
            .ok_or(PollServiceError::PollNotFound(poll_id))?;
        if !poll.has_option(&option) {
            return Err(PollServiceError::InvalidOption { poll_id, option });
        }

        let vote = Vote::new(poll_id, user_id, option);
        match self.store.add_vote(vote.clone()) {
            VoteInsert::Inserted => Ok(vote),
            VoteInsert::Duplicate => Err(PollServiceError::DuplicateVote {
                poll_id,
                user_id: vote.user_id,
            }),
            VoteInsert::PollMissing => Err(PollServiceError::PollNotFound(poll_id)),
        }
    }

    /// Returns the vote recorded for one user, if any.
    pub fn user_vote(&self, poll_id: PollId, user_id: &str) -> Option<Vote> {
        self.store.vote_of(poll_id, user_id)
    }

    /// Computes ordered, zero-filled vote counts for the poll's current options.
    ///
    /// # Errors
    /// - `PollNotFound` when the poll is absent.
    pub fn view_poll_results(&self, poll_id: PollId) -> PollServiceResult<PollResult> {
        let poll = self
            .store
            .get(poll_id)
            .ok_or(PollServiceError::PollNotFound(poll_id))?;
        let tally = self.store.vote_counts(poll_id);

        let counts: Vec<OptionCount> = poll
            .options
            .iter()
            .map(|option| OptionCount {
                option: option.clone(),
                votes: tally.get(option).copied().unwrap_or(0),
            })
            .collect();

        debug!(
            "event=poll_results module=service status=ok poll_id={poll_id} option_count={}",
            counts.len()
        );
        Ok(PollResult {
            poll_id,
            question: poll.question,
            counts,
        })
    }
}

fn status_label(applied: bool) -> &'static str {
    if applied {
        "ok"
    } else {
        "not_found"
    }
}
