//! Dataset loading and caller-side ordering
//!
//! The table engine never reorders rows. The App owns the dataset and the
//! sort descriptor, and re-sorts here whenever the table requests it.

use crate::table::{resolve, value::is_present, Row, SortOrder, SortState};
use anyhow::{bail, Context, Result};
use log::info;
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Rows displayed by the table, with the file they came from (if any)
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub source: Option<PathBuf>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { source: None, rows }
    }

    /// Load a dataset from a `.json` or `.csv` file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let rows = read_rows(path)?;
        info!("loaded {} rows from {}", rows.len(), path.display());
        Ok(Self {
            source: Some(path.to_path_buf()),
            rows,
        })
    }

    /// Re-read rows from the source file. In-memory datasets are left alone.
    pub fn reload(&mut self) -> Result<()> {
        if let Some(path) = &self.source {
            self.rows = read_rows(path)?;
            info!("reloaded {} rows from {}", self.rows.len(), path.display());
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Short description of where rows came from, for the title bar
    pub fn source_label(&self) -> String {
        match &self.source {
            Some(path) => path.display().to_string(),
            None => "built-in sample".to_string(),
        }
    }
}

fn read_rows(path: &Path) -> Result<Vec<Row>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            parse_json_rows(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))
        }
        Some("csv") => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            parse_csv_rows(file).with_context(|| format!("Failed to parse {}", path.display()))
        }
        _ => bail!(
            "Unsupported dataset format: {} (expected .json or .csv)",
            path.display()
        ),
    }
}

/// Parse a JSON array of objects
pub fn parse_json_rows(contents: &str) -> Result<Vec<Row>> {
    let value: Value = serde_json::from_str(contents)?;
    let Value::Array(items) = value else {
        bail!("dataset must be a JSON array of objects");
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(row) => Ok(row),
            other => bail!("row {} is not an object: {}", index, other),
        })
        .collect()
}

/// Parse CSV with a header row. Numeric-looking fields become numbers.
pub fn parse_csv_rows<R: std::io::Read>(reader: R) -> Result<Vec<Row>> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read CSV record")?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, field)| (header.clone(), csv_value(field)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn csv_value(field: &str) -> Value {
    if let Ok(n) = field.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Some(n) = field.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(field.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Sorting
// ─────────────────────────────────────────────────────────────────────────────

/// Stable sort of `rows` by the active column of `sort`.
///
/// Missing values go last in both directions. Without an active column the
/// rows are left untouched.
pub fn sort_rows(rows: &mut [Row], sort: &SortState) {
    let Some(column) = sort.column.as_deref() else {
        return;
    };

    rows.sort_by(|a, b| {
        let (va, vb) = (resolve(a, column), resolve(b, column));
        match (is_present(va), is_present(vb)) {
            (false, false) => Ordering::Equal,
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (true, true) => {
                let ordering = match (va, vb) {
                    (Some(x), Some(y)) => compare_values(x, y),
                    _ => Ordering::Equal,
                };
                match sort.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            }
        }
    });
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Ordering between two present values
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x
            .to_lowercase()
            .cmp(&y.to_lowercase())
            .then_with(|| x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ if type_rank(a) == type_rank(b) => a.to_string().cmp(&b.to_string()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Row> {
        value
            .as_array()
            .map(|items| items.iter().filter_map(|r| r.as_object().cloned()).collect())
            .unwrap_or_default()
    }

    fn ids(rows: &[Row]) -> Vec<i64> {
        rows.iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .collect()
    }

    #[test]
    fn test_sort_strings_case_insensitive() {
        let mut data = rows(json!([
            { "id": 1, "name": "charlie" },
            { "id": 2, "name": "Alice" },
            { "id": 3, "name": "bob" },
        ]));

        sort_rows(&mut data, &SortState::new("name", SortOrder::Asc));
        assert_eq!(ids(&data), vec![2, 3, 1]);

        sort_rows(&mut data, &SortState::new("name", SortOrder::Desc));
        assert_eq!(ids(&data), vec![1, 3, 2]);
    }

    #[test]
    fn test_sort_numbers_numerically() {
        let mut data = rows(json!([
            { "id": 1, "ms": 120 },
            { "id": 2, "ms": 15 },
            { "id": 3, "ms": 250.5 },
        ]));

        sort_rows(&mut data, &SortState::new("ms", SortOrder::Asc));
        assert_eq!(ids(&data), vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_missing_values_last_both_directions() {
        let mut data = rows(json!([
            { "id": 1 },
            { "id": 2, "details": { "ip": "10.0.0.2" } },
            { "id": 3, "details": { "ip": null } },
            { "id": 4, "details": { "ip": "10.0.0.1" } },
        ]));

        sort_rows(&mut data, &SortState::new("details.ip", SortOrder::Asc));
        assert_eq!(ids(&data), vec![4, 2, 1, 3]);

        sort_rows(&mut data, &SortState::new("details.ip", SortOrder::Desc));
        assert_eq!(ids(&data), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut data = rows(json!([
            { "id": 1, "role": "Editor" },
            { "id": 2, "role": "Admin" },
            { "id": 3, "role": "Editor" },
            { "id": 4, "role": "Admin" },
        ]));

        sort_rows(&mut data, &SortState::new("role", SortOrder::Asc));
        assert_eq!(ids(&data), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_unsorted_state_leaves_rows_alone() {
        let mut data = rows(json!([{ "id": 2 }, { "id": 1 }]));
        sort_rows(&mut data, &SortState::unsorted());
        assert_eq!(ids(&data), vec![2, 1]);
    }

    #[test]
    fn test_parse_json_rows() {
        let parsed = parse_json_rows(r#"[{ "id": 1, "name": "a" }, { "id": 2 }]"#)
            .expect("valid dataset");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].get("name"), Some(&json!("a")));

        assert!(parse_json_rows(r#"{ "id": 1 }"#).is_err());
        assert!(parse_json_rows(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn test_parse_csv_rows() {
        let data = "id,name,score\n1,Alice,9.5\n2,Bob,\n";
        let parsed = parse_csv_rows(data.as_bytes()).expect("valid csv");

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].get("id"), Some(&json!(1)));
        assert_eq!(parsed[0].get("name"), Some(&json!("Alice")));
        assert_eq!(parsed[0].get("score"), Some(&json!(9.5)));
        assert_eq!(parsed[1].get("score"), Some(&json!("")));
    }

    #[test]
    fn test_source_label() {
        assert_eq!(Dataset::new(Vec::new()).source_label(), "built-in sample");
    }
}
