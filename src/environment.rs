use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

const PRODUCTION_SHEETS_URL: &str = "https://docs.google.com";

/// Represents where spreadsheet requests are sent.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Google Docs, the default.
    #[default]
    Production,
    /// Any other host serving the same `spreadsheets/d/{id}/gviz/tq` layout.
    Custom { sheets_url: String },
}

impl Environment {
    /// Returns the base URL that sheet paths are appended to.
    pub fn sheets_url(&self) -> String {
        match self {
            Environment::Production => PRODUCTION_SHEETS_URL.to_string(),
            Environment::Custom { sheets_url } => sheets_url.trim_end_matches('/').to_string(),
        }
    }

    /// Reads `KPI_ENVIRONMENT`, falling back to production when unset or invalid.
    pub fn from_env() -> Self {
        std::env::var("KPI_ENVIRONMENT")
            .unwrap_or_default()
            .parse::<Environment>()
            .unwrap_or_default()
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            lower if lower.starts_with("http://") || lower.starts_with("https://") => {
                Ok(Environment::Custom {
                    sheets_url: trimmed.to_string(),
                })
            }
            _ => Err(()),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "Production"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.sheets_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_environments() {
        assert_eq!("production".parse(), Ok(Environment::Production));
        assert_eq!("PROD".parse(), Ok(Environment::Production));
        assert_eq!(
            "http://localhost:8080/".parse(),
            Ok(Environment::Custom {
                sheets_url: "http://localhost:8080/".to_string()
            })
        );
        assert_eq!("staging".parse::<Environment>(), Err(()));
    }

    #[test]
    fn test_custom_url_drops_trailing_slash() {
        let env = Environment::Custom {
            sheets_url: "http://localhost:8080/".to_string(),
        };
        assert_eq!(env.sheets_url(), "http://localhost:8080");
    }
}
