//! Dashboard state update logic
//!
//! Applies loader results, queued events and key presses to the dashboard state

use super::state::{DashboardState, HistoryLoad};

use crate::charts::ChartLoad;
use crate::history::HistoryRow;
use crate::workers::{ComponentUpdate, Job};
use crossterm::event::{KeyCode, KeyEvent};

/// What the app should do after a key press on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    None,
    Quit,
    Logout,
    /// Re-run the given loads.
    Retry(Vec<Job>),
}

impl DashboardState {
    /// Advance the tick and move queued events into the activity log.
    pub fn update(&mut self) {
        self.tick += 1;
        while let Some(event) = self.pending_events.pop_front() {
            log::trace!("{}", event);
            self.add_to_activity_log(event);
        }
    }

    /// Store the result of a finished load.
    pub fn apply(&mut self, update: ComponentUpdate) {
        match update {
            ComponentUpdate::Best(load) => self.best = load,
            ComponentUpdate::Worst(load) => self.worst = load,
            ComponentUpdate::History(Ok(table)) => {
                self.employee_options = table.employee_options();
                self.employee_filter = None;
                self.scroll = 0;
                self.history = HistoryLoad::Ready(table);
            }
            ComponentUpdate::History(Err(message)) => {
                self.employee_options.clear();
                self.employee_filter = None;
                self.history = HistoryLoad::Failed(message);
            }
            ComponentUpdate::Avatar(avatar) => self.avatar = Some(avatar),
            ComponentUpdate::Login(_) => {}
        }
    }

    /// History rows passing the current search and employee filter.
    pub fn visible_rows(&self) -> Vec<&HistoryRow> {
        match &self.history {
            HistoryLoad::Ready(table) => table.filter(
                &self.search,
                self.selected_employee().map(|option| option.value.as_str()),
            ),
            _ => Vec::new(),
        }
    }

    /// Step the employee filter through "all" and each option.
    pub fn cycle_employee(&mut self, forward: bool) {
        let count = self.employee_options.len();
        if count == 0 {
            self.employee_filter = None;
            return;
        }
        self.employee_filter = match (self.employee_filter, forward) {
            (None, true) => Some(0),
            (None, false) => Some(count - 1),
            (Some(index), true) if index + 1 < count => Some(index + 1),
            (Some(index), false) if index > 0 => Some(index - 1),
            _ => None,
        };
        self.scroll = 0;
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.search_active = false;
        self.employee_filter = None;
        self.scroll = 0;
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.visible_rows().len().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    /// Marks every failed component as loading again and returns the jobs to re-run.
    pub fn retry_failed(&mut self) -> Vec<Job> {
        let mut jobs = Vec::new();
        if self.best.is_failed() {
            self.best = ChartLoad::Loading;
            jobs.push(Job::Best);
        }
        if self.worst.is_failed() {
            self.worst = ChartLoad::Loading;
            jobs.push(Job::Worst);
        }
        if matches!(self.history, HistoryLoad::Failed(_)) {
            self.history = HistoryLoad::Loading;
            jobs.push(Job::History);
        }
        jobs
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.search_active = false,
            KeyCode::Backspace => {
                self.search.pop();
                self.scroll = 0;
            }
            KeyCode::Char(c) => {
                self.search.push(c);
                self.scroll = 0;
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DashboardAction {
        if self.search_active {
            self.handle_search_key(key);
            return DashboardAction::None;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return DashboardAction::Quit,
            KeyCode::Char('l') => return DashboardAction::Logout,
            KeyCode::Char('r') => {
                let jobs = self.retry_failed();
                if !jobs.is_empty() {
                    return DashboardAction::Retry(jobs);
                }
            }
            KeyCode::Char('/') => self.search_active = true,
            KeyCode::Char('e') => self.cycle_employee(true),
            KeyCode::Char('E') => self.cycle_employee(false),
            KeyCode::Char('c') => self.clear_filters(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::PageDown => self.scroll_by(10),
            KeyCode::PageUp => self.scroll_by(-10),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
        DashboardAction::None
    }
}
