//! Event System
//!
//! Activity events emitted by the dashboard loaders

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Worker {
    /// Sign-in against the credentials sheet.
    Auth,
    /// Loads the best performers chart.
    #[strum(to_string = "Best")]
    BestPerformers,
    /// Loads the worst performers chart.
    #[strum(to_string = "Worst")]
    WorstPerformers,
    /// Loads the history grid.
    History,
    /// Resolves the signed-in user's profile image.
    Avatar,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
    StateChange,
}

/// Lifecycle of a component load
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Set on state change events
    pub load_state: Option<LoadState>,
}

impl Event {
    pub fn with_level(
        worker: Worker,
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            load_state: None,
        }
    }

    pub fn state_change(worker: Worker, state: LoadState, msg: String) -> Self {
        Self {
            load_state: Some(state),
            ..Self::with_level(worker, msg, EventType::StateChange, LogLevel::Info)
        }
    }

    pub fn should_display(&self) -> bool {
        // StateChange events drive component state, not the log
        if self.event_type == EventType::StateChange {
            return false;
        }
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.worker, self.msg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_changes_are_hidden_from_the_log() {
        let event = Event::state_change(
            Worker::History,
            LoadState::Loading,
            "Loading history".to_string(),
        );
        assert_eq!(event.load_state, Some(LoadState::Loading));
        assert!(!event.should_display());
    }

    #[test]
    fn test_success_and_warnings_are_displayed() {
        let success = Event::with_level(
            Worker::BestPerformers,
            "Loaded".to_string(),
            EventType::Success,
            LogLevel::Debug,
        );
        assert!(success.should_display());

        let warning = Event::with_level(
            Worker::Avatar,
            "No image".to_string(),
            EventType::Error,
            LogLevel::Warn,
        );
        assert!(warning.should_display());
        assert!(warning.to_string().ends_with("Avatar: No image"));
    }
}
