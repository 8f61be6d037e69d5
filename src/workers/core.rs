//! Core worker utilities

use crate::events::{Event, EventType, LoadState, Worker};
use crate::logging::LogLevel;
use tokio::sync::mpsc;

/// Common event sending utilities for workers
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }

    pub async fn send_worker_event(
        &self,
        worker: Worker,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::with_level(worker, message, event_type, log_level))
            .await;
    }

    pub async fn send_state(&self, worker: Worker, state: LoadState, message: String) {
        self.send_event(Event::state_change(worker, state, message))
            .await;
    }
}
