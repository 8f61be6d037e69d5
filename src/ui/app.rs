//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::auth::SessionUser;
use crate::events::Event as WorkerEvent;
use crate::ui::dashboard::{DashboardAction, DashboardState, render_dashboard};
use crate::ui::login::{LoginAction, LoginForm, render_login};
use crate::ui::splash::render_splash;
use crate::workers::{ComponentLoader, ComponentUpdate, Job};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Login screen where users can authenticate.
    Login(LoginForm),
    /// Dashboard screen for the signed-in user.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// Runs component loads in the background.
    loader: ComponentLoader,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from the loaders.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Finished loads are delivered here.
    update_sender: mpsc::Sender<ComponentUpdate>,
    update_receiver: mpsc::Receiver<ComponentUpdate>,

    /// Loads still running for the current screen.
    jobs: Vec<JoinHandle<()>>,

    /// The stored user, consumed when the splash screen ends.
    stored_user: Option<SessionUser>,

    /// Whether to disable background colors
    with_background_color: bool,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        loader: ComponentLoader,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        stored_user: Option<SessionUser>,
        ui_config: UIConfig,
    ) -> Self {
        let (update_sender, update_receiver) = mpsc::channel(16);
        Self {
            loader,
            current_screen: Screen::Splash,
            event_receiver,
            update_sender,
            update_receiver,
            jobs: Vec::new(),
            stored_user,
            with_background_color: ui_config.with_background_color,
        }
    }

    fn spawn(&mut self, job: Job) {
        self.jobs.retain(|handle| !handle.is_finished());
        self.jobs
            .push(self.loader.spawn(job, self.update_sender.clone()));
    }

    fn abort_jobs(&mut self) {
        for handle in self.jobs.drain(..) {
            handle.abort();
        }
    }

    /// Leaves the splash screen for the dashboard, or the login form when nobody is signed in.
    fn finish_splash(&mut self) {
        match self.stored_user.take() {
            Some(user) => self.open_dashboard(user),
            None => self.current_screen = Screen::Login(LoginForm::default()),
        }
    }

    /// Shows the dashboard for `user` and starts every component load.
    fn open_dashboard(&mut self, user: SessionUser) {
        let ui_config = UIConfig::new(self.with_background_color);
        self.current_screen = Screen::Dashboard(Box::new(DashboardState::new(
            user.clone(),
            ui_config,
        )));
        for job in [Job::Best, Job::Worst, Job::History, Job::Avatar(user)] {
            self.spawn(job);
        }
    }

    fn logout(&mut self) {
        self.abort_jobs();
        // Aborted jobs may already hold results; they go to the dropped receiver
        let (update_sender, update_receiver) = mpsc::channel(16);
        self.update_sender = update_sender;
        self.update_receiver = update_receiver;
        if let Err(e) = self.loader.store().logout() {
            log::warn!("Failed to clear session storage: {}", e);
        }
        self.current_screen = Screen::Login(LoginForm::default());
    }

    fn apply_update(&mut self, update: ComponentUpdate) {
        match update {
            ComponentUpdate::Login(Ok(user)) if matches!(self.current_screen, Screen::Login(_)) => {
                self.open_dashboard(user)
            }
            ComponentUpdate::Login(Err(message)) => {
                if let Screen::Login(form) = &mut self.current_screen {
                    form.fail(message);
                }
            }
            update => match &mut self.current_screen {
                Screen::Dashboard(state) => state.apply(update),
                _ => log::debug!("Dropping stale update: {:?}", update),
            },
        }
    }

    /// Handles a key press. Returns `true` when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match &mut self.current_screen {
            Screen::Splash => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    return true;
                }
                // Any other key skips the splash screen
                self.finish_splash();
            }
            Screen::Login(form) => {
                if key.code == KeyCode::Esc {
                    return true;
                }
                if let LoginAction::Submit { username, password } = form.handle_key(key) {
                    self.spawn(Job::Login { username, password });
                }
            }
            Screen::Dashboard(state) => match state.handle_key(key) {
                DashboardAction::None => {}
                DashboardAction::Quit => return true,
                DashboardAction::Logout => self.logout(),
                DashboardAction::Retry(jobs) => {
                    for job in jobs {
                        self.spawn(job);
                    }
                }
            },
        }
        false
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.add_event(event);
            }
        }

        while let Ok(update) = app.update_receiver.try_recv() {
            app.apply_update(update);
        }

        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        // Handle splash transition
        if matches!(app.current_screen, Screen::Splash) && splash_start.elapsed() >= splash_duration
        {
            app.finish_splash();
            continue;
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }
                if app.handle_key(key) {
                    app.abort_jobs();
                    return Ok(());
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Login(form) => render_login(f, form),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::drive::{Avatar, MockImageProbe};
    use crate::sheets::MockSheetSource;
    use crate::store::LocalStore;
    use crate::workers::EventSender;
    use std::sync::Arc;

    fn app_in(dir: &tempfile::TempDir) -> App {
        let (event_sender, event_receiver) = mpsc::channel(16);
        let loader = ComponentLoader::new(
            Arc::new(MockSheetSource::new()),
            Arc::new(MockImageProbe::new()),
            Settings::default(),
            LocalStore::new(dir.path().join("storage.json")),
            EventSender::new(event_sender),
        );
        App::new(loader, event_receiver, None, UIConfig::new(true))
    }

    #[test]
    fn test_logout_discards_updates_from_the_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        let previous = app.update_sender.clone();
        previous
            .try_send(ComponentUpdate::Avatar(Avatar::Initials("AR".to_string())))
            .unwrap();

        app.logout();

        assert!(matches!(app.current_screen, Screen::Login(_)));
        assert!(app.update_receiver.try_recv().is_err());
        assert!(
            previous
                .try_send(ComponentUpdate::Avatar(Avatar::Initials("AR".to_string())))
                .is_err()
        );
    }

    #[test]
    fn test_splash_ends_on_login_without_stored_user() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.finish_splash();
        assert!(matches!(app.current_screen, Screen::Login(_)));
    }
}
