use crate::auth::AuthError;
use crate::sheets::error::SheetError;
use log::LevelFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_sheet_error(&self, error: &SheetError) -> LogLevel {
        match error {
            // Non-critical: rate limiting and temporary server issues
            SheetError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            SheetError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: private or missing sheets
            SheetError::Http { status, .. } if matches!(status, 401 | 403 | 404) => {
                LogLevel::Error
            }

            // Critical: the sheet answered but not with a table
            SheetError::Payload | SheetError::Json(_) | SheetError::MissingTable => {
                LogLevel::Error
            }

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }

    pub fn classify_auth_error(&self, error: &AuthError) -> LogLevel {
        match error {
            AuthError::MissingCredentials | AuthError::InvalidCredentials => LogLevel::Warn,
            AuthError::Sheet(inner) => self.classify_sheet_error(inner),
            AuthError::Store(_) => LogLevel::Error,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
