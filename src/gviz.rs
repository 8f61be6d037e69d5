//! `gviz/tq` response parsing.
//!
//! The endpoint answers with a JSON object wrapped in a callback preamble, e.g.
//! `/*O_o*/ google.visualization.Query.setResponse({...});`. The payload is the text
//! between the first `{` and the last `}`.
//!
//! Cells are read by position. Value coercions follow the browser dashboard the
//! sheets were designed for: numbers use `parseFloat(v) || 0`, text uses
//! `v.toString()`.

use crate::sheets::error::SheetError;
use serde::Deserialize;
use serde_json::Value;

/// Column descriptor from `table.cols`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// A `{v, f}` cell: raw value and formatted display string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub v: Option<Value>,
    #[serde(default)]
    pub f: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub c: Option<Vec<Option<Cell>>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GvizTable {
    pub cols: Vec<Column>,
    pub rows: Vec<Row>,
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    table: Option<RawTable>,
}

#[derive(Deserialize)]
struct RawTable {
    #[serde(default)]
    cols: Vec<Column>,
    #[serde(default)]
    rows: Option<Vec<Row>>,
}

/// Returns the text between the first `{` and the last `}`, inclusive.
pub fn extract_payload(text: &str) -> Result<&str, SheetError> {
    let start = text.find('{').ok_or(SheetError::Payload)?;
    let end = text.rfind('}').ok_or(SheetError::Payload)?;
    if end < start {
        return Err(SheetError::Payload);
    }
    Ok(&text[start..=end])
}

/// Parses a raw `gviz/tq` response body into its table.
pub fn parse_response(text: &str) -> Result<GvizTable, SheetError> {
    let payload = extract_payload(text)?;
    let raw: RawResponse = serde_json::from_str(payload)?;
    let table = raw.table.ok_or(SheetError::MissingTable)?;
    let rows = table.rows.ok_or(SheetError::MissingTable)?;
    Ok(GvizTable {
        cols: table.cols,
        rows,
    })
}

impl Row {
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.c.as_ref()?.get(index)?.as_ref()
    }

    /// The raw `v` of a cell, `None` when the cell or its value is missing or null.
    pub fn value(&self, index: usize) -> Option<&Value> {
        match self.cell(index)?.v.as_ref()? {
            Value::Null => None,
            v => Some(v),
        }
    }

    /// `parseFloat(v) || 0`.
    pub fn number_at(&self, index: usize) -> f64 {
        let parsed = self.value(index).map(js_parse_float).unwrap_or(f64::NAN);
        if parsed.is_nan() || parsed == 0.0 {
            0.0
        } else {
            parsed
        }
    }

    /// `v.toString().trim()`, or empty.
    pub fn text_at(&self, index: usize) -> String {
        self.raw_text_at(index).trim().to_string()
    }

    /// `v.toString()` without trimming, or empty.
    pub fn raw_text_at(&self, index: usize) -> String {
        self.value(index).map(js_to_string).unwrap_or_default()
    }

    /// `v ?? f ?? ""`: the raw value, else the formatted string, else empty.
    pub fn display_value(&self, index: usize) -> Value {
        let Some(cell) = self.cell(index) else {
            return Value::String(String::new());
        };
        let pick = |v: &Option<Value>| match v {
            Some(Value::Null) | None => None,
            Some(v) => Some(v.clone()),
        };
        pick(&cell.v)
            .or_else(|| pick(&cell.f))
            .unwrap_or_else(|| Value::String(String::new()))
    }
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `String(value)` for JSON values.
pub fn js_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(js_number_to_string).unwrap_or_default(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Number formatting close to JavaScript's: integral values carry no fraction,
/// and magnitudes below `1e-7` or from `1e21` up use exponent notation.
pub fn js_number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() < 1e-7 || n.abs() >= 1e21 {
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        format!("{}", n)
    }
}

/// `parseFloat(String(value))`; NaN when nothing numeric leads the text.
pub fn js_parse_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_float_prefix(s),
        Value::Array(_) => parse_float_prefix(&js_to_string(value)),
        _ => f64::NAN,
    }
}

/// Parses the longest leading decimal literal of `text`.
pub fn parse_float_prefix(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let negative = s.starts_with('-');
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const WRAPPED: &str = r#"/*O_o*/
google.visualization.Query.setResponse({"version":"0.6","status":"ok","table":{"cols":[{"id":"A","label":"Name","type":"string"},{"id":"B","label":"Score","type":"number"}],"rows":[{"c":[{"v":"Asha"},{"v":12.5,"f":"12.5"}]},{"c":[null,{"v":null,"f":"n/a"}]}]}});"#;

    #[test]
    fn test_extract_payload_strips_wrapper() {
        let payload = extract_payload(WRAPPED).unwrap();
        assert!(payload.starts_with("{\"version\""));
        assert!(payload.ends_with("}}"));
    }

    #[test]
    fn test_extract_payload_without_braces_fails() {
        assert!(matches!(
            extract_payload("no json here"),
            Err(SheetError::Payload)
        ));
        assert!(matches!(extract_payload("} {"), Err(SheetError::Payload)));
    }

    #[test]
    fn test_parse_response_reads_cols_and_rows() {
        let table = parse_response(WRAPPED).unwrap();
        assert_eq!(table.cols.len(), 2);
        assert_eq!(table.cols[1].label, "Score");
        assert_eq!(table.cols[1].kind, "number");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].text_at(0), "Asha");
        assert_eq!(table.rows[0].number_at(1), 12.5);
    }

    #[test]
    fn test_parse_response_rejects_malformed_json() {
        let err = parse_response("setResponse({\"table\": {rows: ]});").unwrap_err();
        assert!(matches!(err, SheetError::Json(_)));
    }

    #[test]
    fn test_parse_response_requires_rows() {
        assert!(matches!(
            parse_response(r#"x({"status":"error"})"#),
            Err(SheetError::MissingTable)
        ));
        assert!(matches!(
            parse_response(r#"x({"table":{"cols":[]}})"#),
            Err(SheetError::MissingTable)
        ));
    }

    #[test]
    fn test_missing_cells_coerce_to_defaults() {
        let table = parse_response(WRAPPED).unwrap();
        let row = &table.rows[1];
        assert_eq!(row.text_at(0), "");
        assert_eq!(row.number_at(1), 0.0);
        assert_eq!(row.number_at(7), 0.0);
        assert_eq!(row.display_value(1), json!("n/a"));
        assert_eq!(row.display_value(9), json!(""));
    }

    #[test]
    fn test_parse_float_prefix_matches_js() {
        assert_eq!(parse_float_prefix("42"), 42.0);
        assert_eq!(parse_float_prefix("  -30%"), -30.0);
        assert_eq!(parse_float_prefix("3.5 weeks"), 3.5);
        assert_eq!(parse_float_prefix(".5"), 0.5);
        assert_eq!(parse_float_prefix("1e3x"), 1000.0);
        assert_eq!(parse_float_prefix("2e"), 2.0);
        assert!(parse_float_prefix("abc").is_nan());
        assert!(parse_float_prefix("-").is_nan());
        assert!(parse_float_prefix("").is_nan());
        assert_eq!(parse_float_prefix("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_number_at_coerces_non_numbers() {
        let row: Row = serde_json::from_value(json!({
            "c": [{"v": true}, {"v": "n/a"}, {"v": "-0"}, {"v": "7 days"}]
        }))
        .unwrap();
        assert_eq!(row.number_at(0), 0.0);
        assert_eq!(row.number_at(1), 0.0);
        assert_eq!(row.number_at(2), 0.0);
        assert!(row.number_at(2).is_sign_positive());
        assert_eq!(row.number_at(3), 7.0);
    }

    #[test]
    fn test_js_to_string_formats_numbers() {
        assert_eq!(js_to_string(&json!(1234.0)), "1234");
        assert_eq!(js_to_string(&json!(-2.25)), "-2.25");
        assert_eq!(js_to_string(&json!(false)), "false");
        assert_eq!(js_to_string(&json!({"a": 1})), "[object Object]");
    }

    #[test]
    fn test_extreme_magnitudes_use_exponent_notation() {
        assert_eq!(js_number_to_string(0.0000001), "1e-7");
        assert_eq!(js_number_to_string(0.000001), "0.000001");
        assert_eq!(js_number_to_string(1e21), "1e+21");
        assert_eq!(js_number_to_string(-1.5e22), "-1.5e+22");
        assert_eq!(js_number_to_string(1e20), "100000000000000000000");
    }

    #[test]
    fn test_display_value_keeps_falsy_raw_values() {
        let row: Row = serde_json::from_value(json!({
            "c": [{"v": 0, "f": "0%"}, {"v": null, "f": null}]
        }))
        .unwrap();
        assert_eq!(row.display_value(0), json!(0));
        assert_eq!(row.display_value(1), json!(""));
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&Value::Null));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(-1)));
    }
}
