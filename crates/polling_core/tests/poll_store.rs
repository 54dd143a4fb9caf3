use polling_core::{InMemoryPollStore, Poll, PollStore, Vote, VoteInsert};
use uuid::Uuid;

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn store_with_poll(options: &[&str]) -> (InMemoryPollStore, Poll) {
    let store = InMemoryPollStore::new();
    let poll = Poll::new("Which one?", labels(options));
    store.put(poll.clone());
    (store, poll)
}

#[test]
fn put_and_get_roundtrip() {
    let (store, poll) = store_with_poll(&["a", "b"]);

    let loaded = store.get(poll.id).unwrap();
    assert_eq!(loaded, poll);
    assert!(store.get(Uuid::new_v4()).is_none());
}

#[test]
fn put_overwrites_existing_poll() {
    let (store, poll) = store_with_poll(&["a"]);
    let replacement = Poll::with_id(poll.id, "Other?", labels(&["z"]), poll.created_at);

    store.put(replacement.clone());

    assert_eq!(store.get(poll.id).unwrap(), replacement);
    assert_eq!(store.list().len(), 1);
}

#[test]
fn replace_question_keeps_options_and_created_at() {
    let (store, poll) = store_with_poll(&["a", "b"]);

    assert!(store.replace_question(poll.id, "Renamed?"));

    let loaded = store.get(poll.id).unwrap();
    assert_eq!(loaded.question, "Renamed?");
    assert_eq!(loaded.options, poll.options);
    assert_eq!(loaded.created_at, poll.created_at);
}

#[test]
fn replace_options_keeps_votes_for_removed_options() {
    let (store, poll) = store_with_poll(&["a", "b"]);
    assert!(store.add_vote(Vote::new(poll.id, "u1", "b")).is_inserted());

    assert!(store.replace_options(poll.id, labels(&["a", "c"])));

    let loaded = store.get(poll.id).unwrap();
    assert_eq!(loaded.options, labels(&["a", "c"]));
    assert_eq!(loaded.question, poll.question);
    assert_eq!(store.vote_counts(poll.id).get("b"), Some(&1));
    assert_eq!(store.vote_of(poll.id, "u1").unwrap().option, "b");
}

#[test]
fn replace_on_missing_poll_returns_false() {
    let store = InMemoryPollStore::new();
    let missing = Uuid::new_v4();

    assert!(!store.replace_question(missing, "q"));
    assert!(!store.replace_options(missing, labels(&["a"])));
    assert!(store.get(missing).is_none());
}

#[test]
fn add_vote_rejects_duplicate_and_keeps_first() {
    let (store, poll) = store_with_poll(&["a", "b"]);

    assert_eq!(
        store.add_vote(Vote::new(poll.id, "u1", "a")),
        VoteInsert::Inserted
    );
    assert_eq!(
        store.add_vote(Vote::new(poll.id, "u1", "b")),
        VoteInsert::Duplicate
    );

    assert_eq!(store.vote_of(poll.id, "u1").unwrap().option, "a");
    let counts = store.vote_counts(poll.id);
    assert_eq!(counts.get("a"), Some(&1));
    assert_eq!(counts.get("b"), None);
}

#[test]
fn add_vote_on_unknown_poll_reports_missing() {
    let store = InMemoryPollStore::new();
    let missing = Uuid::new_v4();

    assert_eq!(
        store.add_vote(Vote::new(missing, "u1", "a")),
        VoteInsert::PollMissing
    );
    assert!(store.vote_counts(missing).is_empty());
    assert!(store.vote_of(missing, "u1").is_none());
}

#[test]
fn vote_counts_tally_by_option() {
    let (store, poll) = store_with_poll(&["a", "b"]);
    for (user, option) in [("u1", "a"), ("u2", "b"), ("u3", "a")] {
        assert!(store.add_vote(Vote::new(poll.id, user, option)).is_inserted());
    }

    let counts = store.vote_counts(poll.id);
    assert_eq!(counts.len(), 2);
    assert_eq!(counts["a"], 2);
    assert_eq!(counts["b"], 1);
}

#[test]
fn delete_removes_poll_and_votes_once() {
    let (store, poll) = store_with_poll(&["a"]);
    assert!(store.add_vote(Vote::new(poll.id, "u1", "a")).is_inserted());

    assert!(store.delete(poll.id));
    assert!(store.get(poll.id).is_none());
    assert!(store.vote_counts(poll.id).is_empty());
    assert!(store.vote_of(poll.id, "u1").is_none());
    assert!(!store.delete(poll.id));

    assert_eq!(
        store.add_vote(Vote::new(poll.id, "u2", "a")),
        VoteInsert::PollMissing
    );
}

#[test]
fn delete_leaves_other_polls_untouched() {
    let (store, first) = store_with_poll(&["a"]);
    let second = Poll::new("Second?", labels(&["a"]));
    store.put(second.clone());
    assert!(store.add_vote(Vote::new(second.id, "u1", "a")).is_inserted());

    assert!(store.delete(first.id));

    assert_eq!(store.get(second.id).unwrap(), second);
    assert_eq!(store.vote_counts(second.id)["a"], 1);
}

#[test]
fn list_orders_by_created_at_then_id() {
    let store = InMemoryPollStore::new();
    let late = Poll::with_id(Uuid::new_v4(), "late", labels(&["a"]), 2_000);
    let early = Poll::with_id(Uuid::new_v4(), "early", labels(&["a"]), 1_000);
    store.put(late.clone());
    store.put(early.clone());

    let listed: Vec<String> = store.list().into_iter().map(|poll| poll.question).collect();
    assert_eq!(listed, vec!["early", "late"]);
}
