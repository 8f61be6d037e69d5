//! Session setup and initialization

use crate::auth::SessionUser;
use crate::config::Settings;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::drive::HttpImageProbe;
use crate::environment::Environment;
use crate::events::Event;
use crate::sheets::SheetsClient;
use crate::store::LocalStore;
use crate::workers::{ComponentLoader, EventSender};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Session data for both TUI and headless modes
pub struct SessionData {
    pub environment: Environment,
    /// Loader shared by every component
    pub loader: ComponentLoader,
    /// Event receiver for loader events
    pub event_receiver: mpsc::Receiver<Event>,
    /// The stored user, if a previous sign-in is still on disk
    pub user: Option<SessionUser>,
}

/// Builds the HTTP clients and the event channel, and reads the stored session.
///
/// # Arguments
/// * `environment` - Where sheet requests are sent
/// * `settings` - Spreadsheet ids and sheet names
/// * `store` - Session storage
pub fn setup_session(
    environment: Environment,
    settings: Settings,
    store: LocalStore,
) -> Result<SessionData, Box<dyn Error>> {
    let client = SheetsClient::new(environment.clone())?;
    let probe = HttpImageProbe::new(client.http().clone());
    let user = store.load_user()?;

    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let loader = ComponentLoader::new(
        Arc::new(client),
        Arc::new(probe),
        settings,
        store,
        EventSender::new(event_sender),
    );

    Ok(SessionData {
        environment,
        loader,
        event_receiver,
        user,
    })
}
