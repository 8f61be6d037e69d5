//! Sign-in against the spreadsheet-backed user list.
//!
//! Credentials live in the `Master` sheet (0 = username, 3 = password, 4 = role,
//! 5 = designation list). A successful sign-in is enriched with the user's row from
//! the performance sheet, then persisted to the session store.

use crate::config::Settings;
use crate::drive::process_image_url;
use crate::gviz::GvizTable;
use crate::performance::PerformanceSnapshot;
use crate::sheets::error::SheetError;
use crate::sheets::{SheetSource, fetch_table};
use crate::store::{LocalStore, StoreError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

mod columns {
    pub const USERNAME: usize = 0;
    pub const PASSWORD: usize = 3;
    pub const ROLE: usize = 4;
    pub const DESIGNATIONS: usize = 5;
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please enter both username and password")]
    MissingCredentials,

    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The credentials sheet could not be read.
    #[error("Login failed. Please try again later.")]
    Sheet(#[source] SheetError),

    #[error("Signed in, but the session could not be saved: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub username: String,
    pub name: String,
    pub designation: String,
    pub role: String,
    pub designations: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub performance: Option<PerformanceSnapshot>,
    #[serde(default)]
    pub has_performance_data: bool,
}

impl SessionUser {
    pub fn destination(&self) -> Destination {
        Destination::for_role(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.destination() == Destination::Admin
    }
}

/// Where a signed-in user lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Admin,
    User,
}

impl Destination {
    pub fn for_role(role: &str) -> Self {
        if role == "admin" {
            Destination::Admin
        } else {
            Destination::User
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Destination::Admin => "/admin/dashboard",
            Destination::User => "/user/dashboard",
        }
    }
}

impl Display for Destination {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Scans the credentials table for the first matching row.
///
/// Usernames compare case-insensitively, passwords exactly.
pub fn find_user(table: &GvizTable, username: &str, password: &str) -> Option<SessionUser> {
    let wanted = username.to_lowercase();
    table.rows.iter().find_map(|row| {
        let sheet_username = row.text_at(columns::USERNAME);
        let sheet_password = row.text_at(columns::PASSWORD);
        if sheet_username.to_lowercase() != wanted || sheet_password != password {
            return None;
        }

        let role = row.text_at(columns::ROLE).to_lowercase();
        let designation = row.text_at(columns::DESIGNATIONS);
        let designations = if designation.is_empty() {
            Vec::new()
        } else {
            designation.split(',').map(|d| d.trim().to_string()).collect()
        };

        Some(SessionUser {
            username: sheet_username.clone(),
            name: sheet_username,
            designation,
            role: if role.is_empty() {
                "user".to_string()
            } else {
                role
            },
            designations,
            image: None,
            performance: None,
            has_performance_data: false,
        })
    })
}

/// Attaches the user's performance row and profile image, when present.
pub fn enrich_user(mut user: SessionUser, performance: &GvizTable) -> SessionUser {
    if let Some((snapshot, raw_image)) = PerformanceSnapshot::find(performance, &user.name) {
        if !raw_image.trim().is_empty() && raw_image != "Link" {
            user.image = process_image_url(&raw_image);
        }
        user.performance = Some(snapshot);
    }
    user.has_performance_data = user.performance.is_some();
    user
}

/// Signs a user in and persists the session.
///
/// A failure to read the performance sheet does not fail the sign-in; the user is
/// stored without performance data.
pub async fn authenticate(
    sheets: &dyn SheetSource,
    settings: &Settings,
    store: &LocalStore,
    username: &str,
    password: &str,
) -> Result<SessionUser, AuthError> {
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let master = fetch_table(sheets, &settings.auth_spreadsheet_id, &settings.master_sheet)
        .await
        .map_err(AuthError::Sheet)?;

    let user = find_user(&master, username, password).ok_or(AuthError::InvalidCredentials)?;
    log::info!("Credentials matched for {}", user.username);

    let user = match fetch_table(
        sheets,
        &settings.auth_spreadsheet_id,
        &settings.performance_sheet,
    )
    .await
    {
        Ok(performance) => enrich_user(user, &performance),
        Err(e) => {
            log::warn!("Performance fetch error: {}", e);
            user
        }
    };

    store.save_user(&user)?;
    store.set_selected_designation(&user.designation)?;
    Ok(user)
}
