//! Row expansion registry
//!
//! Tracks which rows currently show their detail content. The registry
//! belongs to one table instance and outlives data and sort changes; keys
//! for rows that are no longer present simply never render.

use super::value::Row;
use log::warn;
use serde_json::{Number, Value};
use std::collections::HashSet;
use std::fmt;

/// Identity of a row, taken from its key field.
///
/// Keys of different JSON types never collide: `1` and `"1"` are distinct.
/// Numbers compare by value, so `1` and `1.0` are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Text(String),
    Number(String),
    Bool(bool),
    Null,
    /// Arrays and records, keyed by their compact JSON form
    Composite(String),
}

impl RowKey {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => RowKey::Text(s.clone()),
            Value::Number(n) => RowKey::Number(number_text(n)),
            Value::Bool(b) => RowKey::Bool(*b),
            Value::Null => RowKey::Null,
            Value::Array(_) | Value::Object(_) => RowKey::Composite(value.to_string()),
        }
    }

    /// Key of `row` read from `key_field`. A missing field yields `Null`.
    pub fn of(row: &Row, key_field: &str) -> Self {
        match row.get(key_field) {
            Some(value) => Self::from_value(value),
            None => {
                warn!("row has no key field '{}'", key_field);
                RowKey::Null
            }
        }
    }
}

/// Largest integer an `f64` holds exactly
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Integral floats print like integers
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Text(s) | RowKey::Number(s) | RowKey::Composite(s) => f.write_str(s),
            RowKey::Bool(b) => write!(f, "{}", b),
            RowKey::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for RowKey {
    fn from(s: &str) -> Self {
        RowKey::Text(s.to_string())
    }
}

impl From<i64> for RowKey {
    fn from(n: i64) -> Self {
        RowKey::Number(n.to_string())
    }
}

/// Set of currently expanded row keys
#[derive(Debug, Clone, Default)]
pub struct ExpansionRegistry {
    expanded: HashSet<RowKey>,
}

impl ExpansionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `key`. Returns whether the row is now expanded.
    pub fn toggle(&mut self, key: &RowKey) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.clone());
            true
        }
    }

    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.expanded.contains(key)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}
