//! Component loaders
//!
//! Each dashboard component issues one sheet request per load and reports both
//! activity events and its final state. Failures end in a terminal state for that
//! component and never reach the caller.

use super::core::EventSender;
use crate::auth::{self, AuthError, SessionUser};
use crate::charts::{BarChart, ChartLoad, DoughnutChart};
use crate::config::Settings;
use crate::drive::{self, Avatar, ImageProbe};
use crate::error_classifier::ErrorClassifier;
use crate::events::{EventType, LoadState, Worker};
use crate::gviz::GvizTable;
use crate::history::HistoryTable;
use crate::logging::LogLevel;
use crate::sheets::error::SheetError;
use crate::sheets::{SheetSource, fetch_table};
use crate::store::LocalStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A unit of work for [`ComponentLoader::spawn`].
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Best,
    Worst,
    History,
    Avatar(SessionUser),
    Login { username: String, password: String },
}

/// Result of a finished job, delivered to the UI.
#[derive(Debug, Clone)]
pub enum ComponentUpdate {
    Best(ChartLoad<DoughnutChart>),
    Worst(ChartLoad<BarChart>),
    History(Result<HistoryTable, String>),
    Avatar(Avatar),
    Login(Result<SessionUser, String>),
}

#[derive(Clone)]
pub struct ComponentLoader {
    sheets: Arc<dyn SheetSource>,
    probe: Arc<dyn ImageProbe>,
    settings: Settings,
    store: LocalStore,
    events: EventSender,
    error_classifier: ErrorClassifier,
}

impl ComponentLoader {
    pub fn new(
        sheets: Arc<dyn SheetSource>,
        probe: Arc<dyn ImageProbe>,
        settings: Settings,
        store: LocalStore,
        events: EventSender,
    ) -> Self {
        Self {
            sheets,
            probe,
            settings,
            store,
            events,
            error_classifier: ErrorClassifier::new(),
        }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    async fn fetch(&self, worker: Worker, sheet_name: &str) -> Result<GvizTable, SheetError> {
        self.events
            .send_state(worker, LoadState::Loading, format!("Loading {}", sheet_name))
            .await;
        let result = fetch_table(
            self.sheets.as_ref(),
            &self.settings.records_spreadsheet_id,
            sheet_name,
        )
        .await;
        if let Err(e) = &result {
            let log_level = self.error_classifier.classify_sheet_error(e);
            self.events
                .send_worker_event(
                    worker,
                    format!("Failed to load data: {}", e),
                    EventType::Error,
                    log_level,
                )
                .await;
            self.events
                .send_state(worker, LoadState::Failed, e.to_string())
                .await;
        }
        result
    }

    async fn loaded(&self, worker: Worker, message: String) {
        self.events
            .send_worker_event(worker, message.clone(), EventType::Success, LogLevel::Info)
            .await;
        self.events
            .send_state(worker, LoadState::Ready, message)
            .await;
    }

    pub async fn load_best(&self) -> ChartLoad<DoughnutChart> {
        let worker = Worker::BestPerformers;
        match self.fetch(worker, &self.settings.performance_sheet).await {
            Ok(table) => {
                let chart = DoughnutChart::from_table(&table);
                self.loaded(worker, format!("Ranked {} best performers", chart.ranked().len()))
                    .await;
                ChartLoad::Ready(chart)
            }
            Err(e) => ChartLoad::Failed {
                chart: DoughnutChart::error(),
                reason: e.to_string(),
            },
        }
    }

    pub async fn load_worst(&self) -> ChartLoad<BarChart> {
        let worker = Worker::WorstPerformers;
        match self.fetch(worker, &self.settings.performance_sheet).await {
            Ok(table) => {
                let chart = BarChart::from_table(&table);
                self.loaded(worker, format!("Ranked {} worst performers", chart.ranked().len()))
                    .await;
                ChartLoad::Ready(chart)
            }
            Err(e) => ChartLoad::Failed {
                chart: BarChart::error(),
                reason: e.to_string(),
            },
        }
    }

    pub async fn load_history(&self) -> Result<HistoryTable, SheetError> {
        let worker = Worker::History;
        let table = self.fetch(worker, &self.settings.history_sheet).await?;
        let history = HistoryTable::from_table(&table);
        let count = history.rows.len();
        let noun = if count == 1 { "record" } else { "records" };
        self.loaded(worker, format!("Fetched {} history {}", count, noun))
            .await;
        Ok(history)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<SessionUser, AuthError> {
        let worker = Worker::Auth;
        self.events
            .send_state(worker, LoadState::Loading, "Signing in...".to_string())
            .await;
        match auth::authenticate(
            self.sheets.as_ref(),
            &self.settings,
            &self.store,
            username,
            password,
        )
        .await
        {
            Ok(user) => {
                self.loaded(
                    worker,
                    format!("Signed in as {} ({})", user.username, user.role),
                )
                .await;
                Ok(user)
            }
            Err(e) => {
                let log_level = self.error_classifier.classify_auth_error(&e);
                self.events
                    .send_worker_event(worker, e.to_string(), EventType::Error, log_level)
                    .await;
                self.events
                    .send_state(worker, LoadState::Failed, e.to_string())
                    .await;
                Err(e)
            }
        }
    }

    /// Resolves any image link, falling back to the initials of `name`.
    pub async fn resolve_image(&self, url: &str, name: &str) -> Avatar {
        drive::resolve_avatar(self.probe.as_ref(), Some(url), name).await
    }

    pub async fn resolve_avatar(&self, user: &SessionUser) -> Avatar {
        let avatar =
            drive::resolve_avatar(self.probe.as_ref(), user.image.as_deref(), &user.name).await;
        if let Avatar::Initials(initials) = &avatar {
            if user.image.is_some() {
                self.events
                    .send_worker_event(
                        Worker::Avatar,
                        format!("No image candidate loaded, showing {}", initials),
                        EventType::Error,
                        LogLevel::Debug,
                    )
                    .await;
            }
        }
        avatar
    }

    async fn run(&self, job: Job) -> ComponentUpdate {
        match job {
            Job::Best => ComponentUpdate::Best(self.load_best().await),
            Job::Worst => ComponentUpdate::Worst(self.load_worst().await),
            Job::History => {
                ComponentUpdate::History(self.load_history().await.map_err(|e| e.to_string()))
            }
            Job::Avatar(user) => ComponentUpdate::Avatar(self.resolve_avatar(&user).await),
            Job::Login { username, password } => ComponentUpdate::Login(
                self.login(&username, &password)
                    .await
                    .map_err(|e| e.to_string()),
            ),
        }
    }

    /// Runs `job` on its own task and delivers the result through `updates`.
    pub fn spawn(&self, job: Job, updates: mpsc::Sender<ComponentUpdate>) -> JoinHandle<()> {
        let loader = self.clone();
        tokio::spawn(async move {
            let update = loader.run(job).await;
            let _ = updates.send(update).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::cli_consts::sheets;
    use crate::drive::MockImageProbe;
    use crate::events::Event;
    use crate::sheets::MockSheetSource;
    use mockall::predicate::eq;
    use tempfile::TempDir;

    const PERFORMANCE: &str = r#"x({"table":{"rows":[
        {"c":[null,null,{"v":"A"},{"v":10},{"v":10},{"v":0}]},
        {"c":[null,null,{"v":"B"},{"v":10},{"v":5},{"v":-30}]},
        {"c":[null,null,{"v":"C"},{"v":0},{"v":0}]}
    ]}})"#;

    fn loader_with(
        sheets: MockSheetSource,
        probe: MockImageProbe,
        dir: &TempDir,
    ) -> (ComponentLoader, mpsc::Receiver<Event>) {
        let (sender, receiver) = mpsc::channel(64);
        let loader = ComponentLoader::new(
            Arc::new(sheets),
            Arc::new(probe),
            Settings::default(),
            LocalStore::new(dir.path().join("storage.json")),
            EventSender::new(sender),
        );
        (loader, receiver)
    }

    fn drain(receiver: &mut mpsc::Receiver<Event>) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_load_best_and_worst_rank_the_same_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let mut mock = MockSheetSource::new();
        mock.expect_fetch_text()
            .with(
                eq(sheets::RECORDS_SPREADSHEET_ID),
                eq(sheets::PERFORMANCE_SHEET),
            )
            .times(2)
            .returning(|_, _| Ok(PERFORMANCE.to_string()));
        let (loader, mut events) = loader_with(mock, MockImageProbe::new(), &dir);

        let best = loader.load_best().await;
        let worst = loader.load_worst().await;

        assert_eq!(best.chart().unwrap().labels, vec!["A", "B"]);
        assert_eq!(worst.chart().unwrap().labels, vec!["B", "A"]);

        let states: Vec<_> = drain(&mut events)
            .into_iter()
            .filter_map(|e| e.load_state)
            .collect();
        assert_eq!(
            states,
            vec![
                LoadState::Loading,
                LoadState::Ready,
                LoadState::Loading,
                LoadState::Ready
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_load_yields_error_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut mock = MockSheetSource::new();
        mock.expect_fetch_text().returning(|_, _| {
            Err(SheetError::Http {
                status: 503,
                message: "down".to_string(),
            })
        });
        let (loader, mut events) = loader_with(mock, MockImageProbe::new(), &dir);

        let worst = loader.load_worst().await;
        assert!(worst.is_failed());
        assert_eq!(worst.chart().unwrap().heights, vec![50]);

        let events = drain(&mut events);
        let error = events
            .iter()
            .find(|e| e.event_type == EventType::Error)
            .unwrap();
        assert_eq!(error.worker, Worker::WorstPerformers);
        assert_eq!(error.log_level, LogLevel::Warn);
        assert_eq!(events.last().unwrap().load_state, Some(LoadState::Failed));
    }

    #[tokio::test]
    async fn test_history_reports_record_count() {
        let dir = tempfile::tempdir().unwrap();
        let mut mock = MockSheetSource::new();
        mock.expect_fetch_text()
            .with(eq(sheets::RECORDS_SPREADSHEET_ID), eq(sheets::HISTORY_SHEET))
            .returning(|_, _| {
                Ok(r#"x({"table":{"cols":[{"id":"A","label":"Task"}],"rows":[{"c":[{"v":"a"}]}]}})"#
                    .to_string())
            });
        let (loader, mut events) = loader_with(mock, MockImageProbe::new(), &dir);

        let history = loader.load_history().await.unwrap();
        assert_eq!(history.rows.len(), 1);
        assert!(
            drain(&mut events)
                .iter()
                .any(|e| e.msg == "Fetched 1 history record")
        );
    }

    #[tokio::test]
    async fn test_spawned_login_failure_is_delivered_as_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut mock = MockSheetSource::new();
        mock.expect_fetch_text().never();
        let (loader, _events) = loader_with(mock, MockImageProbe::new(), &dir);
        let (updates, mut received) = mpsc::channel(1);

        loader
            .spawn(
                Job::Login {
                    username: String::new(),
                    password: "x".to_string(),
                },
                updates,
            )
            .await
            .unwrap();

        match received.recv().await {
            Some(ComponentUpdate::Login(Err(message))) => {
                assert_eq!(message, "Please enter both username and password")
            }
            other => panic!("unexpected update: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_avatar_without_image_falls_back_quietly() {
        let dir = tempfile::tempdir().unwrap();
        let mut probe = MockImageProbe::new();
        probe.expect_loads().never();
        let (loader, mut events) = loader_with(MockSheetSource::new(), probe, &dir);
        let user = SessionUser {
            username: "ravi".to_string(),
            name: "Ravi Kumar".to_string(),
            designation: String::new(),
            role: "user".to_string(),
            designations: Vec::new(),
            image: None,
            performance: None,
            has_performance_data: false,
        };

        assert_eq!(
            loader.resolve_avatar(&user).await,
            Avatar::Initials("RK".to_string())
        );
        assert!(drain(&mut events).is_empty());
    }
}
