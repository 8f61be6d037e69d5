use crate::gviz::{self, GvizTable};
use crate::sheets::error::SheetError;

pub(crate) mod client;
pub use client::SheetsClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch the raw `gviz/tq` response body of one sheet.
    async fn fetch_text(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
    ) -> Result<String, SheetError>;
}

/// Fetch one sheet and parse its table.
pub async fn fetch_table(
    source: &dyn SheetSource,
    spreadsheet_id: &str,
    sheet_name: &str,
) -> Result<GvizTable, SheetError> {
    let text = source.fetch_text(spreadsheet_id, sheet_name).await?;
    gviz::parse_response(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_fetch_table_parses_the_named_sheet() {
        let mut source = MockSheetSource::new();
        source
            .expect_fetch_text()
            .with(eq("sheet-id"), eq("For Records"))
            .times(1)
            .returning(|_, _| {
                Ok(r#"google.visualization.Query.setResponse({"table":{"cols":[{"id":"A","label":"Name"}],"rows":[{"c":[{"v":"Asha"}]}]}});"#.to_string())
            });

        let table = fetch_table(&source, "sheet-id", "For Records").await.unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_table_passes_http_errors_through() {
        let mut source = MockSheetSource::new();
        source.expect_fetch_text().returning(|_, _| {
            Err(SheetError::Http {
                status: 404,
                message: "Not Found".to_string(),
            })
        });

        let result = fetch_table(&source, "missing", "Master").await;
        assert!(matches!(result, Err(SheetError::Http { status: 404, .. })));
    }
}
