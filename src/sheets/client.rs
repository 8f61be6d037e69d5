//! Google Sheets Client
//!
//! Reads public sheets through the `gviz/tq` query endpoint. One GET per call, no
//! retries.

use crate::consts::cli_consts::network;
use crate::environment::Environment;
use crate::sheets::SheetSource;
use crate::sheets::error::SheetError;
use reqwest::{Client, ClientBuilder, Response};

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("kpi-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: Client,
    environment: Environment,
}

impl SheetsClient {
    pub fn new(environment: Environment) -> Result<Self, SheetError> {
        let client = ClientBuilder::new()
            .connect_timeout(network::connect_timeout())
            .timeout(network::request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    /// The shared HTTP client, reused for avatar probing.
    pub fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) fn build_url(&self, spreadsheet_id: &str, sheet_name: &str) -> String {
        format!(
            "{}/spreadsheets/d/{}/gviz/tq?tqx=out:json&sheet={}",
            self.environment.sheets_url(),
            urlencoding::encode(spreadsheet_id),
            urlencoding::encode(sheet_name)
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, SheetError> {
        if !response.status().is_success() {
            return Err(SheetError::from_response(response).await);
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl SheetSource for SheetsClient {
    async fn fetch_text(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
    ) -> Result<String, SheetError> {
        let url = self.build_url(spreadsheet_id, sheet_name);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = Self::handle_response_status(response).await?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_encodes_sheet_name() {
        let client = SheetsClient::new(Environment::Production).unwrap();
        assert_eq!(
            client.build_url("abc123", "For Records"),
            "https://docs.google.com/spreadsheets/d/abc123/gviz/tq?tqx=out:json&sheet=For%20Records"
        );
    }

    #[test]
    fn test_build_url_uses_custom_environment() {
        let client = SheetsClient::new(Environment::Custom {
            sheets_url: "http://127.0.0.1:9000/".to_string(),
        })
        .unwrap();
        assert_eq!(
            client.build_url("id", "Master"),
            "http://127.0.0.1:9000/spreadsheets/d/id/gviz/tq?tqx=out:json&sheet=Master"
        );
    }
}

#[cfg(test)]
/// These are ignored by default since they require network access.
mod live_sheet_tests {
    use super::SheetsClient;
    use crate::consts::cli_consts::sheets;
    use crate::environment::Environment;
    use crate::sheets::fetch_table;

    #[tokio::test]
    #[ignore] // This test requires network access to docs.google.com.
    /// Should fetch and parse the public records sheet.
    async fn test_fetch_records_sheet() {
        let client = SheetsClient::new(Environment::Production).unwrap();
        match fetch_table(
            &client,
            sheets::RECORDS_SPREADSHEET_ID,
            sheets::PERFORMANCE_SHEET,
        )
        .await
        {
            Ok(table) => println!("Fetched {} rows", table.rows.len()),
            Err(e) => panic!("Failed to fetch sheet: {}", e),
        }
    }
}
