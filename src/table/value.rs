//! Cell value resolution
//!
//! Rows are dynamic JSON records. A column key is either a plain field name
//! or a dot-separated path (`data.http.method`) into nested records.
//! Resolution never fails: a missing field anywhere along the path yields
//! the "no value" sentinel.

use serde_json::{Map, Value};

/// A single table row: a JSON object keyed by field name
pub type Row = Map<String, Value>;

/// Separator between the segments of a path expression
pub const PATH_SEPARATOR: char = '.';

/// A resolved cell value. `None` is the "no value" sentinel.
pub type CellValue<'a> = Option<&'a Value>;

/// Resolve the value addressed by `key` in `row`
pub fn resolve<'a>(row: &'a Row, key: &str) -> CellValue<'a> {
    if !key.contains(PATH_SEPARATOR) {
        return row.get(key);
    }

    let mut segments = key.split(PATH_SEPARATOR);
    let mut current = row.get(segments.next()?)?;
    for segment in segments {
        current = descend(current, segment)?;
    }
    Some(current)
}

/// Step one segment deeper. Records descend by field name, arrays by index;
/// scalars end the walk.
fn descend<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(fields) => fields.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Whether a resolved value counts as present for display and ordering
pub fn is_present(value: CellValue<'_>) -> bool {
    !matches!(value, None | Some(Value::Null))
}

/// Default textual representation of a cell value.
///
/// Absent values and JSON `null` render as the empty string.
pub fn display_text(value: CellValue<'_>) -> String {
    match value {
        Some(value) => value_text(value),
        None => String::new(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}
