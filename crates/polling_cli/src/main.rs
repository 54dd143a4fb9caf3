//! CLI demo entry point.
//!
//! # Responsibility
//! - Wire one in-memory store and service for a single process run.
//! - Walk through create/vote/results/update and print deterministic output.

use log::info;
use polling_core::{
    init_logging, InMemoryPollStore, LoggingConfig, PollResult, PollService, PollStore,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = LoggingConfig::from_env();
    if let Err(err) = init_logging(&config) {
        eprintln!("logging disabled: {err}");
    }

    println!("polling_core version={}", polling_core::core_version());

    let service = PollService::new(InMemoryPollStore::new());
    if let Err(err) = run_demo(&service) {
        eprintln!("demo failed: {err}");
        return ExitCode::FAILURE;
    }
    info!("event=demo_done module=cli status=ok");
    ExitCode::SUCCESS
}

fn run_demo<S: PollStore>(service: &PollService<S>) -> Result<(), Box<dyn std::error::Error>> {
    let poll = service.create_poll(
        "What is your favorite programming language?",
        ["Java", "Python", "C++"],
    );
    println!("created poll id={} question={:?}", poll.id, poll.question);

    service.vote_in_poll(poll.id, "user1", "Java")?;
    service.vote_in_poll(poll.id, "user2", "Python")?;
    match service.vote_in_poll(poll.id, "user1", "C++") {
        Ok(_) => println!("unexpected: second vote by user1 accepted"),
        Err(err) => println!("rejected: {err}"),
    }
    print_results(&service.view_poll_results(poll.id)?);

    service.update_poll_options(poll.id, ["Java", "Python", "JavaScript"]);
    println!("options replaced");
    print_results(&service.view_poll_results(poll.id)?);

    service.delete_poll(poll.id);
    match service.view_poll_results(poll.id) {
        Ok(_) => println!("unexpected: deleted poll still visible"),
        Err(err) => println!("after delete: {err}"),
    }
    Ok(())
}

fn print_results(result: &PollResult) {
    println!("results for {:?}", result.question);
    for entry in &result.counts {
        println!("  {}: {}", entry.option, entry.votes);
    }
    println!("  total: {}", result.total_votes());
}
