mod auth;
mod charts;
mod cli_messages;
mod commands;
mod config;
mod consts;
mod drive;
mod environment;
mod error_classifier;
mod events;
mod gviz;
mod history;
mod logging;
mod performance;
mod ranking;
mod report;
mod session;
mod sheets;
mod store;
mod ui;
mod workers;

use crate::config::{Settings, get_settings_path, get_storage_path};
use crate::environment::Environment;
use crate::session::{SessionData, run_headless_mode, run_tui_mode, setup_session};
use crate::store::LocalStore;
use clap::{ArgAction, Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,

    /// Spreadsheet holding the performance and history sheets
    #[arg(long, global = true, value_name = "SPREADSHEET_ID")]
    records_sheet_id: Option<String>,

    /// Spreadsheet holding the credentials sheet
    #[arg(long, global = true, value_name = "SPREADSHEET_ID")]
    auth_sheet_id: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the dashboard
    Start {
        /// Print every component once instead of opening the TUI
        #[arg(long, action = ArgAction::SetTrue)]
        headless: bool,

        /// Disable background colors
        #[arg(long, action = ArgAction::SetTrue)]
        no_background_color: bool,
    },
    /// Sign in and store the session
    Login {
        #[arg(long, value_name = "USERNAME")]
        username: String,

        #[arg(long, env = "KPI_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Clear the session storage file
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Print the best performers
    Top,
    /// Print the worst performers
    Worst,
    /// Print the history records
    History {
        /// Case-insensitive text to match in any column
        #[arg(long, default_value = "")]
        search: String,

        /// Only rows of this employee (as printed by --list-employees)
        #[arg(long, value_name = "EMPLOYEE")]
        employee: Option<String>,

        /// List the employees present in the history instead of the rows
        #[arg(long, action = ArgAction::SetTrue)]
        list_employees: bool,
    },
    /// Show the effective settings
    Settings {
        /// Write them, including any --records-sheet-id/--auth-sheet-id override
        #[arg(long, action = ArgAction::SetTrue)]
        save: bool,
    },
    /// Resolve an image link the way the dashboard loads profile pictures
    Avatar {
        #[arg(long)]
        url: String,

        /// Name used for the initials fallback
        #[arg(long, default_value = "")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log::set_max_level(logging::get_rust_log_level().into());

    let environment = Environment::from_env();
    let args = Args::parse();
    let settings_path = get_settings_path()?;
    let settings = Settings::load_or_default(&settings_path)?
        .with_overrides(args.records_sheet_id, args.auth_sheet_id);
    let store = LocalStore::new(get_storage_path()?);
    let session = || -> Result<SessionData, Box<dyn Error>> {
        setup_session(environment.clone(), settings.clone(), store.clone())
    };

    match args.command {
        Command::Start {
            headless,
            no_background_color,
        } => {
            if headless {
                run_headless_mode(session()?).await
            } else {
                run_tui_mode(session()?, !no_background_color).await
            }
        }
        Command::Login { username, password } => {
            commands::login(&session()?.loader, &username, &password).await
        }
        Command::Logout => commands::logout(&store),
        Command::Whoami => commands::whoami(&store),
        Command::Top => commands::top(&session()?.loader).await,
        Command::Worst => commands::worst(&session()?.loader).await,
        Command::History {
            search,
            employee,
            list_employees,
        } => {
            commands::history(
                &session()?.loader,
                &search,
                employee.as_deref(),
                list_employees,
            )
            .await
        }
        Command::Settings { save } => commands::settings(&settings, &settings_path, save),
        Command::Avatar { url, name } => commands::avatar(&session()?.loader, &url, &name).await,
    }
}
