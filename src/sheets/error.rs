//! Error handling for the sheets module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body carries no `{ ... }` object to parse.
    #[error("No JSON payload found in response")]
    Payload,

    /// The embedded payload is not valid JSON.
    #[error("Malformed sheet payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload parsed but has no `table.rows`.
    #[error("No table data found")]
    MissingTable,
}

impl SheetError {
    pub async fn from_response(response: reqwest::Response) -> SheetError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        SheetError::Http { status, message }
    }
}
