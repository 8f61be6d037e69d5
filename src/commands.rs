//! One-shot CLI commands against the dashboard's sheets and session storage.

use crate::charts::ChartLoad;
use crate::config::Settings;
use crate::drive::Avatar;
use crate::report;
use crate::store::LocalStore;
use crate::workers::ComponentLoader;
use crate::{print_cmd_error, print_cmd_info, print_cmd_success, print_cmd_warn};
use std::error::Error;
use std::path::Path;

/// Signs in and stores the session for later commands and the dashboard.
pub async fn login(
    loader: &ComponentLoader,
    username: &str,
    password: &str,
) -> Result<(), Box<dyn Error>> {
    match loader.login(username, password).await {
        Ok(user) => {
            print_cmd_success!(
                "Signed in.",
                "User: {}, Role: {}, Dashboard: {}",
                user.username,
                user.role,
                user.destination()
            );
            if !user.has_performance_data {
                print_cmd_warn!(
                    "No performance data found.",
                    "No row named {} in the performance sheet",
                    user.name
                );
            }
            Ok(())
        }
        Err(e) => {
            print_cmd_error!("Login failed.", e.to_string().as_str());
            Err(Box::new(e))
        }
    }
}

/// Deletes the session storage file.
pub fn logout(store: &LocalStore) -> Result<(), Box<dyn Error>> {
    print_cmd_info!(
        "Logging out and clearing session storage...",
        "{}",
        store.path().display()
    );
    store.clear().map_err(|e| {
        print_cmd_error!("Failed to clear session storage.", e.to_string().as_str());
        Box::new(e) as Box<dyn Error>
    })
}

/// Prints the stored user and where they land after sign-in.
pub fn whoami(store: &LocalStore) -> Result<(), Box<dyn Error>> {
    let Some(user) = store.load_user()? else {
        print_cmd_error!(
            "Not signed in.",
            "Run `kpi-dashboard login --username <NAME>` first"
        );
        return Err(Box::from("not signed in"));
    };
    for line in report::user_lines(&user) {
        println!("{}", line);
    }
    if let Some(designation) = store.selected_designation()? {
        println!("Selected designation: {}", designation);
    }
    Ok(())
}

fn chart_result<T>(load: &ChartLoad<T>, lines: Vec<String>) -> Result<(), Box<dyn Error>> {
    for line in lines {
        println!("{}", line);
    }
    match load {
        ChartLoad::Failed { reason, .. } => Err(Box::from(reason.clone())),
        _ => Ok(()),
    }
}

/// Prints the best performers ranking.
pub async fn top(loader: &ComponentLoader) -> Result<(), Box<dyn Error>> {
    let load = loader.load_best().await;
    chart_result(&load, report::best_lines(&load))
}

/// Prints the worst performers ranking.
pub async fn worst(loader: &ComponentLoader) -> Result<(), Box<dyn Error>> {
    let load = loader.load_worst().await;
    chart_result(&load, report::worst_lines(&load))
}

/// Prints the history grid, filtered like the dashboard, or its employee list.
pub async fn history(
    loader: &ComponentLoader,
    search: &str,
    employee: Option<&str>,
    list_employees: bool,
) -> Result<(), Box<dyn Error>> {
    let table = match loader.load_history().await {
        Ok(table) => table,
        Err(e) => {
            print_cmd_error!("Failed to load history.", e.to_string().as_str());
            return Err(Box::new(e));
        }
    };

    if list_employees {
        for option in table.employee_options() {
            println!("{}\t{}", option.display_name, option.value);
        }
        return Ok(());
    }

    let rows = table.filter(search, employee);
    for line in report::history_lines(&table, &rows) {
        println!("{}", line);
    }
    Ok(())
}

/// Resolves an image link through the Drive candidates.
pub async fn avatar(loader: &ComponentLoader, url: &str, name: &str) -> Result<(), Box<dyn Error>> {
    match loader.resolve_image(url, name).await {
        Avatar::Image(resolved) => {
            print_cmd_success!("Image loaded.", "{}", resolved);
            Ok(())
        }
        Avatar::Initials(initials) => {
            print_cmd_info!("No candidate loaded.", "Showing initials: {}", initials);
            Ok(())
        }
    }
}

/// Prints the effective settings, writing them to `path` when `save` is set.
pub fn settings(settings: &Settings, path: &Path, save: bool) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    if save {
        settings.save(path)?;
        print_cmd_success!("Settings saved.", "{}", path.display());
    }
    Ok(())
}
