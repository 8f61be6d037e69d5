//! Employee performance rows.
//!
//! Columns are read by fixed position:
//!
//! | index | field                    |
//! |-------|--------------------------|
//! | 2     | name                     |
//! | 3     | target                   |
//! | 4     | actual work done         |
//! | 5     | % work not done          |
//! | 6     | % work not done on time  |
//! | 8     | week pending             |

use crate::gviz::{GvizTable, Row};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod columns {
    pub const NAME: usize = 2;
    pub const TARGET: usize = 3;
    pub const ACTUAL_WORK: usize = 4;
    pub const WORK_NOT_DONE: usize = 5;
    pub const WORK_NOT_DONE_ON_TIME: usize = 6;
    pub const TOTAL_WORK_DONE: usize = 7;
    pub const WEEK_PENDING: usize = 8;
    pub const ALL_PENDING_TILL_DATE: usize = 9;
    pub const PLANNED_WORK_NOT_DONE: usize = 10;
    pub const PLANNED_NOT_DONE_TILL_DATE: usize = 11;
    pub const IMAGE: usize = 13;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRecord {
    pub name: String,
    pub target: f64,
    pub actual_work: f64,
    pub work_not_done: f64,
    pub work_not_done_on_time: f64,
    pub week_pending: f64,
}

impl PerformanceRecord {
    /// Projects one sheet row. Rows with neither a target nor any work done, and rows
    /// without a name, yield `None`.
    pub fn from_row(row: &Row) -> Option<Self> {
        let target = row.number_at(columns::TARGET);
        let actual_work = row.number_at(columns::ACTUAL_WORK);
        if target == 0.0 && actual_work == 0.0 {
            return None;
        }

        let name = name_of(row.value(columns::NAME))?;

        Some(Self {
            name,
            target,
            actual_work,
            work_not_done: row.number_at(columns::WORK_NOT_DONE),
            work_not_done_on_time: row.number_at(columns::WORK_NOT_DONE_ON_TIME),
            week_pending: row.number_at(columns::WEEK_PENDING),
        })
    }

    /// A record is complete when the work done equals the target exactly.
    pub fn is_complete(&self) -> bool {
        self.target == self.actual_work
    }
}

/// Name cells hold either a string or a `{label}` object.
fn name_of(value: Option<&Value>) -> Option<String> {
    let name = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Object(obj) => obj
            .get("label")
            .and_then(Value::as_str)
            .map(|label| label.trim().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    };
    if name.is_empty() { None } else { Some(name) }
}

/// Projects every usable row of the table, in sheet order.
pub fn records_from_table(table: &GvizTable) -> Vec<PerformanceRecord> {
    table
        .rows
        .iter()
        .filter_map(PerformanceRecord::from_row)
        .collect()
}

/// The signed-in employee's latest row, kept as the sheet's display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSnapshot {
    pub name: String,
    pub target: String,
    pub actual_work_done: String,
    pub work_not_done: String,
    pub work_not_done_on_time: String,
    pub total_work_done: String,
    pub week_pending: String,
    pub all_pending_till_date: String,
    pub planned_work_not_done: String,
    pub planned_not_done_till_date: String,
}

impl PerformanceSnapshot {
    /// Finds the first row whose name matches `name` case-insensitively.
    ///
    /// Returns the snapshot together with the raw image cell of that row.
    pub fn find(table: &GvizTable, name: &str) -> Option<(Self, String)> {
        let wanted = name.to_lowercase();
        table.rows.iter().find_map(|row| {
            let name_in_row = row.text_at(columns::NAME);
            if name_in_row.to_lowercase() != wanted {
                return None;
            }
            let snapshot = Self {
                name: name_in_row,
                target: row.raw_text_at(columns::TARGET),
                actual_work_done: row.raw_text_at(columns::ACTUAL_WORK),
                work_not_done: row.raw_text_at(columns::WORK_NOT_DONE),
                work_not_done_on_time: row.raw_text_at(columns::WORK_NOT_DONE_ON_TIME),
                total_work_done: row.raw_text_at(columns::TOTAL_WORK_DONE),
                week_pending: row.raw_text_at(columns::WEEK_PENDING),
                all_pending_till_date: row.raw_text_at(columns::ALL_PENDING_TILL_DATE),
                planned_work_not_done: row.raw_text_at(columns::PLANNED_WORK_NOT_DONE),
                planned_not_done_till_date: row
                    .raw_text_at(columns::PLANNED_NOT_DONE_TILL_DATE),
            };
            Some((snapshot, row.raw_text_at(columns::IMAGE)))
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::gviz::{GvizTable, Row};
    use serde_json::{Value, json};

    /// Builds a performance row with the given name cell and numeric cells.
    pub fn perf_row(name: Value, nums: [f64; 5]) -> Row {
        let [target, actual, not_done, on_time, week] = nums;
        serde_json::from_value(json!({
            "c": [
                {"v": 1}, {"v": "2024-W01"}, {"v": name},
                {"v": target}, {"v": actual}, {"v": not_done}, {"v": on_time},
                null, {"v": week}
            ]
        }))
        .unwrap()
    }

    pub fn table_of(rows: Vec<Row>) -> GvizTable {
        GvizTable {
            cols: Vec::new(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{perf_row, table_of};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_row_maps_positional_columns() {
        let row = perf_row(json!("  Asha "), [10.0, 8.0, -20.0, 5.0, -1.0]);
        let record = PerformanceRecord::from_row(&row).unwrap();
        assert_eq!(
            record,
            PerformanceRecord {
                name: "Asha".to_string(),
                target: 10.0,
                actual_work: 8.0,
                work_not_done: -20.0,
                work_not_done_on_time: 5.0,
                week_pending: -1.0,
            }
        );
        assert!(!record.is_complete());
    }

    #[test]
    fn test_label_object_names_are_accepted() {
        let row = perf_row(json!({"label": "Ravi"}), [4.0, 4.0, 0.0, 0.0, 0.0]);
        let record = PerformanceRecord::from_row(&row).unwrap();
        assert_eq!(record.name, "Ravi");
        assert!(record.is_complete());
    }

    #[test]
    fn test_rows_without_target_and_work_are_skipped() {
        let row = perf_row(json!("Idle"), [0.0, 0.0, -50.0, 10.0, 3.0]);
        assert!(PerformanceRecord::from_row(&row).is_none());
    }

    #[test]
    fn test_rows_without_name_are_skipped() {
        for name in [json!(""), json!("   "), json!(42), Value::Null, json!({})] {
            let row = perf_row(name, [5.0, 1.0, 0.0, 0.0, 0.0]);
            assert!(PerformanceRecord::from_row(&row).is_none());
        }
    }

    #[test]
    fn test_only_target_zero_is_still_ranked() {
        let row = perf_row(json!("Late"), [0.0, 3.0, 0.0, 0.0, 0.0]);
        assert!(PerformanceRecord::from_row(&row).is_some());
    }

    #[test]
    fn test_records_from_table_keeps_sheet_order() {
        let table = table_of(vec![
            perf_row(json!("B"), [1.0, 0.0, 0.0, 0.0, 0.0]),
            perf_row(json!("skip"), [0.0, 0.0, 0.0, 0.0, 0.0]),
            perf_row(json!("A"), [1.0, 1.0, 0.0, 0.0, 0.0]),
        ]);
        let names: Vec<_> = records_from_table(&table)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_snapshot_find_is_case_insensitive() {
        let mut row: Row = serde_json::from_value(json!({
            "c": [
                null, null, {"v": "Asha"}, {"v": 10}, {"v": 7}, {"v": -30},
                {"v": 12.5}, {"v": 70}, {"v": -2}, {"v": 4}, {"v": "1"}, {"v": "0"},
                null, {"v": "https://drive.google.com/file/d/XYZ/view,Asha"}
            ]
        }))
        .unwrap();
        let table = table_of(vec![row.clone()]);

        let (snapshot, image) = PerformanceSnapshot::find(&table, "ASHA").unwrap();
        assert_eq!(snapshot.name, "Asha");
        assert_eq!(snapshot.target, "10");
        assert_eq!(snapshot.work_not_done, "-30");
        assert_eq!(snapshot.work_not_done_on_time, "12.5");
        assert_eq!(snapshot.planned_not_done_till_date, "0");
        assert_eq!(image, "https://drive.google.com/file/d/XYZ/view,Asha");

        row.c = None;
        assert!(PerformanceSnapshot::find(&table_of(vec![row]), "Asha").is_none());
    }
}
