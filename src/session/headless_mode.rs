//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::report;
use crate::workers::Job;
use std::error::Error;
use tokio::sync::mpsc;

/// Runs the application in headless mode
///
/// Loads every component once, printing activity events and each result as it
/// arrives. Ctrl+C stops waiting for outstanding loads.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    let Some(user) = session.user.take() else {
        crate::print_cmd_error!("Not signed in", "Run `kpi-dashboard login --username <NAME>` first");
        return Err(Box::from("not signed in"));
    };

    print_session_starting("headless", &session.environment);
    for line in report::user_lines(&user) {
        println!("{}", line);
    }
    println!();

    let (update_sender, mut updates) = mpsc::channel(3);
    let handles: Vec<_> = [Job::Best, Job::Worst, Job::History]
        .into_iter()
        .map(|job| session.loader.spawn(job, update_sender.clone()))
        .collect();
    drop(update_sender);

    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                if event.should_display() {
                    println!("{}", event);
                }
            }
            update = updates.recv() => match update {
                Some(update) => report::print_update(&update),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    while let Ok(event) = session.event_receiver.try_recv() {
        if event.should_display() {
            println!("{}", event);
        }
    }

    print_session_shutdown();
    for handle in handles {
        handle.abort();
    }
    print_session_exit_success();

    Ok(())
}
