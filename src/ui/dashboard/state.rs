//! Dashboard state management
//!
//! Contains the main dashboard state struct and related enums

use crate::auth::SessionUser;
use crate::charts::{BarChart, ChartLoad, DoughnutChart};
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::drive::Avatar;
use crate::events::Event as WorkerEvent;
use crate::history::{EmployeeOption, HistoryTable};
use crate::ui::app::UIConfig;

use std::collections::VecDeque;

/// State of the history grid
#[derive(Debug, Clone)]
pub enum HistoryLoad {
    Loading,
    Ready(HistoryTable),
    Failed(String),
}

/// Dashboard state for the signed-in user.
#[derive(Debug)]
pub struct DashboardState {
    /// The signed-in user.
    pub user: SessionUser,
    /// Resolved profile image, once the avatar job returns.
    pub avatar: Option<Avatar>,
    /// Best performers chart.
    pub best: ChartLoad<DoughnutChart>,
    /// Worst performers chart.
    pub worst: ChartLoad<BarChart>,
    /// History grid.
    pub history: HistoryLoad,
    /// Distinct employees of the loaded history, sorted by name.
    pub employee_options: Vec<EmployeeOption>,
    /// Index into `employee_options`; `None` shows every employee.
    pub employee_filter: Option<usize>,
    /// Free-text history search.
    pub search: String,
    /// Keys go to the search box while set.
    pub search_active: bool,
    /// First visible history row.
    pub scroll: usize,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,
}

impl DashboardState {
    /// Creates a dashboard with every component loading.
    pub fn new(user: SessionUser, ui_config: UIConfig) -> Self {
        Self {
            user,
            avatar: None,
            best: ChartLoad::Loading,
            worst: ChartLoad::Loading,
            history: HistoryLoad::Loading,
            employee_options: Vec::new(),
            employee_filter: None,
            search: String::new(),
            search_active: false,
            scroll: 0,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
        }
    }

    /// The selected employee option, if any.
    pub fn selected_employee(&self) -> Option<&EmployeeOption> {
        self.employee_filter
            .and_then(|index| self.employee_options.get(index))
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }
}
