//! The history grid.
//!
//! Headers come from the sheet's own columns. Every row keeps its projected cell
//! values plus the employee fields split out of the employee column, and filtering
//! runs in memory over that projection.

use crate::drive::split_employee;
use crate::gviz::{GvizTable, Row, is_truthy, js_to_string};
use chrono::{Datelike, NaiveDate, TimeDelta};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// One projected column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryHeader {
    /// Position of the column in the sheet.
    pub index: usize,
    pub label: String,
    pub key: String,
    /// Suggested width in terminal cells.
    pub width: u16,
}

impl HistoryHeader {
    fn new(index: usize, label: &str) -> Self {
        Self {
            index,
            label: label.to_string(),
            key: column_key(label),
            width: column_width(label),
        }
    }

    fn is_date(&self) -> bool {
        self.label.to_lowercase().contains("date")
    }

    fn is_work_not_done(&self) -> bool {
        self.label.contains("% Work Not Done")
    }

    fn is_employee(&self) -> bool {
        let lower = self.label.to_lowercase();
        lower.contains("employee") || lower.contains("name") || self.key.contains("name")
    }
}

/// Lower-cased label with whitespace runs as `_` and anything outside `[a-z0-9_]` removed.
pub fn column_key(label: &str) -> String {
    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();
    static DISALLOWED_RE: OnceLock<Regex> = OnceLock::new();
    let whitespace =
        WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex compiles"));
    let disallowed = DISALLOWED_RE
        .get_or_init(|| Regex::new(r"[^a-z0-9_]").expect("key charset regex compiles"));

    let lower = label.to_lowercase();
    let underscored = whitespace.replace_all(&lower, "_");
    disallowed.replace_all(&underscored, "").into_owned()
}

/// Width hint for a column, derived from its label.
pub fn column_width(label: &str) -> u16 {
    let lower = label.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));
    let pixels = if has(&["employee", "name"]) {
        200
    } else if has(&["date"]) {
        140
    } else if has(&["description", "comment"]) {
        250
    } else if has(&["target", "actual", "status"]) {
        120
    } else if has(&["experience"]) {
        150
    } else if has(&["post", "number"]) {
        130
    } else {
        150
    };
    pixels / 10
}

/// Whether a column is shown. Only labels mentioning both `link` and `name` are hidden.
fn is_projected(label: &str) -> bool {
    let lower = label.to_lowercase();
    !lower.contains("link") || !lower.contains("name")
}

/// Formats a `Date(y,m,d[,h,mi,s])` string as `M/D/YYYY`.
///
/// The month is zero-based and out-of-range parts roll over into the next unit, so
/// `Date(2023,12,1)` is January 1st 2024. Two-digit years are in the 1900s.
pub fn format_sheet_date(text: &str) -> Option<String> {
    static SHEET_DATE_RE: OnceLock<Regex> = OnceLock::new();
    let re = SHEET_DATE_RE.get_or_init(|| {
        Regex::new(r"Date\(([0-9]+),([0-9]+),([0-9]+)(?:,([0-9]+),([0-9]+),([0-9]+))?\)")
            .expect("sheet date regex compiles")
    });

    if !text.starts_with("Date(") {
        return None;
    }
    let caps = re.captures(text)?;
    let part = |group: usize| -> Option<i64> {
        match caps.get(group) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    let (year, month, day) = (part(1)?, part(2)?, part(3)?);
    let (hour, minute, second) = (part(4)?, part(5)?, part(6)?);

    let year = if (0..=99).contains(&year) { year + 1900 } else { year };
    let year = i32::try_from(year.checked_add(month / 12)?).ok()?;
    let month = u32::try_from(month % 12 + 1).ok()?;

    let offset = TimeDelta::try_days(day - 1)?
        .checked_add(&TimeDelta::try_hours(hour)?)?
        .checked_add(&TimeDelta::try_minutes(minute)?)?
        .checked_add(&TimeDelta::try_seconds(second)?)?;
    let moment = NaiveDate::from_ymd_opt(year, month, 1)?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(offset)?;
    Some(format!(
        "{}/{}/{}",
        moment.month(),
        moment.day(),
        moment.year()
    ))
}

fn project_value(header: &HistoryHeader, row: &Row) -> Value {
    let mut value = row.display_value(header.index);

    if header.is_date() && is_truthy(&value) {
        if let Value::String(text) = &value {
            if let Some(formatted) = format_sheet_date(text) {
                value = Value::String(formatted);
            }
        }
    }

    if header.is_work_not_done() {
        if !is_truthy(&value) {
            value = Value::String("0%".to_string());
        } else {
            let text = js_to_string(&value);
            if !text.contains('%') {
                value = Value::String(format!("{}%", text));
            }
        }
    }

    value
}

/// `String(v || "")`.
fn searchable_text(value: &Value) -> String {
    if is_truthy(value) {
        js_to_string(value)
    } else {
        String::new()
    }
}

/// The employee column of a row, split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeCell {
    pub image_url: String,
    /// Display name; `User` when the cell only held a link.
    pub user_name: String,
    /// `"<image>,<name>"` when a name exists, otherwise whichever part is present.
    pub combined: String,
    pub raw: String,
}

impl EmployeeCell {
    fn from_raw(raw: String) -> Self {
        let split = split_employee(&raw);
        let combined = if !split.name.is_empty() {
            format!("{},{}", split.image_url, split.name)
        } else if !split.image_url.is_empty() {
            split.image_url.clone()
        } else {
            split.name.clone()
        };
        let user_name = if split.name.is_empty() {
            "User".to_string()
        } else {
            split.name
        };
        Self {
            image_url: split.image_url,
            user_name,
            combined,
            raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    /// Stable id, `"<index>-row"`.
    pub id: String,
    /// 1-based position in the sheet.
    pub row_index: usize,
    /// One value per header, in header order. Empty when the row had no cells.
    pub values: Vec<Value>,
    pub employee: Option<EmployeeCell>,
}

impl HistoryRow {
    /// Text shown in the grid for the column at `position`.
    pub fn cell_text(&self, position: usize) -> String {
        self.values.get(position).map(js_to_string).unwrap_or_default()
    }

    fn search_fields(&self) -> Vec<String> {
        let mut fields = vec![self.id.clone(), self.row_index.to_string()];
        fields.extend(self.values.iter().map(searchable_text));
        if let Some(employee) = &self.employee {
            fields.extend([
                employee.image_url.clone(),
                employee.user_name.clone(),
                employee.combined.clone(),
                employee.raw.clone(),
            ]);
        }
        fields
    }

    /// Case-insensitive substring match over every field of the row.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    pub fn matches_employee(&self, combined: &str) -> bool {
        self.employee
            .as_ref()
            .is_some_and(|employee| employee.combined == combined)
    }
}

/// An entry of the employee filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeOption {
    pub value: String,
    pub display_name: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryTable {
    pub headers: Vec<HistoryHeader>,
    pub rows: Vec<HistoryRow>,
}

impl HistoryTable {
    pub fn from_table(table: &GvizTable) -> Self {
        let headers: Vec<HistoryHeader> = table
            .cols
            .iter()
            .enumerate()
            .filter(|(_, col)| is_projected(&col.label))
            .map(|(index, col)| HistoryHeader::new(index, &col.label))
            .collect();
        let employee_column = headers.iter().position(HistoryHeader::is_employee);

        let rows = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut projected = HistoryRow {
                    id: format!("{}-row", i),
                    row_index: i + 1,
                    values: Vec::new(),
                    employee: None,
                };
                if row.c.is_none() {
                    return projected;
                }
                projected.values = headers.iter().map(|h| project_value(h, row)).collect();
                projected.employee = employee_column.map(|position| {
                    EmployeeCell::from_raw(searchable_text(&projected.values[position]))
                });
                projected
            })
            .collect();

        Self { headers, rows }
    }

    /// Rows matching `search` and, when given and non-empty, the employee id.
    pub fn filter(&self, search: &str, employee: Option<&str>) -> Vec<&HistoryRow> {
        let employee = employee.filter(|e| !e.is_empty());
        self.rows
            .iter()
            .filter(|row| row.matches_search(search))
            .filter(|row| employee.is_none_or(|e| row.matches_employee(e)))
            .collect()
    }

    /// Distinct employees in first-seen order, then sorted by display name.
    pub fn employee_options(&self) -> Vec<EmployeeOption> {
        let mut options: Vec<EmployeeOption> = Vec::new();
        for employee in self.rows.iter().filter_map(|row| row.employee.as_ref()) {
            let value = &employee.combined;
            if value.trim().is_empty() || value.contains("undefined") || value.contains("null") {
                continue;
            }
            if options.iter().any(|option| &option.value == value) {
                continue;
            }
            options.push(EmployeeOption {
                value: value.clone(),
                display_name: employee.user_name.clone(),
                image_url: employee.image_url.clone(),
            });
        }
        options.sort_by(|a, b| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
        });
        options
    }
}

pub fn record_count_label(count: usize) -> String {
    if count == 1 {
        "1 Record".to_string()
    } else {
        format!("{} Records", count)
    }
}
