//! Poll/vote store contract and lock-striped in-memory implementation.
//!
//! # Responsibility
//! - Own the authoritative poll and vote collections.
//! - Provide atomic replace, delete and insert-if-absent primitives.
//!
//! # Invariants
//! - Snapshot replacement happens under the poll's entry write guard, so
//!   concurrent updates to one poll never interleave field-wise.
//! - At most one vote exists per (poll id, user id); the first insert wins.
//! - `add_vote` never creates a vote collection for a poll that is absent.
//! - The only nested lock acquisition is vote entry -> poll read; nothing
//!   takes a poll guard and then a vote guard.
//!
//! # Concurrency notes
//! Delete removes the poll first and its votes second. A vote that passed
//! its presence check before the poll removal can still land, and is then
//! dropped together with the collection. Once `delete` has returned no vote
//! for that poll is retained.

use crate::model::poll::{Poll, PollId, Vote};
use dashmap::DashMap;
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Outcome of an insert-if-absent vote write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteInsert {
    /// The vote now occupies the user's slot.
    Inserted,
    /// The user already had a vote; the stored one is untouched.
    Duplicate,
    /// The poll was not present when the write was attempted.
    PollMissing,
}

impl VoteInsert {
    /// Boolean view: `true` only when the vote was written.
    pub fn is_inserted(self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// Storage interface for polls and their votes.
///
/// Implementations must be safe to share across threads without external
/// locking.
pub trait PollStore: Send + Sync {
    /// Inserts or replaces the poll under its id.
    fn put(&self, poll: Poll);
    /// Returns the current snapshot for `poll_id`.
    fn get(&self, poll_id: PollId) -> Option<Poll>;
    /// Swaps in a snapshot with a new question. Returns whether the poll existed.
    fn replace_question(&self, poll_id: PollId, question: &str) -> bool;
    /// Swaps in a snapshot with a new option list. Existing votes are kept.
    fn replace_options(&self, poll_id: PollId, options: Vec<String>) -> bool;
    /// Removes the poll and all of its votes. Returns whether the poll existed.
    fn delete(&self, poll_id: PollId) -> bool;
    /// Records `vote` only if its user has no vote on that poll yet.
    fn add_vote(&self, vote: Vote) -> VoteInsert;
    /// Raw per-option tally for one poll, unordered.
    fn vote_counts(&self, poll_id: PollId) -> HashMap<String, u64>;
    /// Returns the vote recorded for one user, if any.
    fn vote_of(&self, poll_id: PollId, user_id: &str) -> Option<Vote>;
    /// Lists all polls ordered by `created_at ASC, id ASC`.
    fn list(&self) -> Vec<Poll>;
}

/// Lock-striped in-memory store.
#[derive(Debug, Default)]
pub struct InMemoryPollStore {
    polls: DashMap<PollId, Poll>,
    votes: DashMap<PollId, HashMap<String, Vote>>,
}

impl InMemoryPollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PollStore for InMemoryPollStore {
    fn put(&self, poll: Poll) {
        self.polls.insert(poll.id, poll);
    }

    fn get(&self, poll_id: PollId) -> Option<Poll> {
        self.polls.get(&poll_id).map(|entry| entry.value().clone())
    }

    fn replace_question(&self, poll_id: PollId, question: &str) -> bool {
        match self.polls.get_mut(&poll_id) {
            Some(mut current) => {
                let next = current.with_question(question);
                *current = next;
                true
            }
            None => false,
        }
    }

    fn replace_options(&self, poll_id: PollId, options: Vec<String>) -> bool {
        match self.polls.get_mut(&poll_id) {
            Some(mut current) => {
                let next = current.with_options(options);
                *current = next;
                true
            }
            None => false,
        }
    }

    fn delete(&self, poll_id: PollId) -> bool {
        if self.polls.remove(&poll_id).is_none() {
            return false;
        }
        let dropped = self
            .votes
            .remove(&poll_id)
            .map(|(_, ballots)| ballots.len())
            .unwrap_or(0);
        debug!("event=store_delete module=store poll_id={poll_id} dropped_votes={dropped}");
        true
    }

    fn add_vote(&self, vote: Vote) -> VoteInsert {
        // Holding the entry guard keeps a concurrent delete from removing the
        // collection between the presence check and the insert.
        let slot = self.votes.entry(vote.poll_id);
        if !self.polls.contains_key(&vote.poll_id) {
            return VoteInsert::PollMissing;
        }

        let mut ballots = slot.or_default();
        match ballots.entry(vote.user_id.clone()) {
            Entry::Occupied(_) => VoteInsert::Duplicate,
            Entry::Vacant(empty) => {
                empty.insert(vote);
                VoteInsert::Inserted
            }
        }
    }

    fn vote_counts(&self, poll_id: PollId) -> HashMap<String, u64> {
        let mut tally = HashMap::new();
        if let Some(ballots) = self.votes.get(&poll_id) {
            for vote in ballots.values() {
                *tally.entry(vote.option.clone()).or_insert(0) += 1;
            }
        }
        tally
    }

    fn vote_of(&self, poll_id: PollId, user_id: &str) -> Option<Vote> {
        self.votes
            .get(&poll_id)
            .and_then(|ballots| ballots.get(user_id).cloned())
    }

    fn list(&self) -> Vec<Poll> {
        let mut polls: Vec<Poll> = self
            .polls
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        polls.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        polls
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryPollStore, PollStore, VoteInsert};
    use crate::model::poll::{Poll, Vote};
    use uuid::Uuid;

    #[test]
    fn add_vote_for_missing_poll_leaves_no_collection() {
        let store = InMemoryPollStore::new();
        let poll_id = Uuid::new_v4();

        let outcome = store.add_vote(Vote::new(poll_id, "user1", "a"));

        assert_eq!(outcome, VoteInsert::PollMissing);
        assert!(!store.votes.contains_key(&poll_id));
    }

    #[test]
    fn delete_drops_vote_collection() {
        let store = InMemoryPollStore::new();
        let poll = Poll::new("q", vec!["a".to_string()]);
        let poll_id = poll.id;
        store.put(poll);
        assert!(store.add_vote(Vote::new(poll_id, "user1", "a")).is_inserted());

        assert!(store.delete(poll_id));
        assert!(!store.votes.contains_key(&poll_id));
        assert!(store.vote_counts(poll_id).is_empty());
    }

    #[test]
    fn vote_insert_boolean_view() {
        assert!(VoteInsert::Inserted.is_inserted());
        assert!(!VoteInsert::Duplicate.is_inserted());
        assert!(!VoteInsert::PollMissing.is_inserted());
    }
}
