//! Column descriptors
//!
//! A column describes how one field is extracted from every row and how it
//! is displayed: header text, sortability, alignment, an optional width hint
//! and an optional render hook producing the cell content.

use super::value::{display_text, resolve, Row};
use ratatui::{layout::Alignment, text::Line};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Text alignment of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn token(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

impl From<Align> for Alignment {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => Alignment::Left,
            Align::Center => Alignment::Center,
            Align::Right => Alignment::Right,
        }
    }
}

/// Custom cell renderer: receives the resolved value and the whole row
pub type CellRenderer = Arc<dyn Fn(Option<&Value>, &Row) -> Line<'static>>;

/// A table column definition
#[derive(Clone)]
pub struct Column {
    /// Field name or dot path used to resolve the cell value
    pub key: String,
    /// Header text
    pub header: String,
    /// Whether activating the header requests a sort
    pub sortable: bool,
    /// Cell alignment; `None` leaves it to the renderer's default
    pub align: Option<Align>,
    /// Width hint (`"12"`, `"20%"`, `"200px"`)
    pub width: Option<String>,
    render: Option<CellRenderer>,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("align", &self.align)
            .field("width", &self.width)
            .field("render", &self.render.is_some())
            .finish()
    }
}

impl Column {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            align: None,
            width: None,
            render: None,
        }
    }

    /// Mark the column as sortable
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Attach a custom cell renderer
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<&Value>, &Row) -> Line<'static> + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn has_renderer(&self) -> bool {
        self.render.is_some()
    }

    /// Resolve and render this column's cell for `row`
    pub fn cell(&self, row: &Row) -> Line<'static> {
        let value = resolve(row, &self.key);
        match &self.render {
            Some(render) => render(value, row),
            None => Line::from(display_text(value)),
        }
    }
}

/// Serializable column definition, as read from configuration files.
///
/// Carries everything a [`Column`] does except the render hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    /// Defaults to the key when omitted
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub align: Option<Align>,
    #[serde(default)]
    pub width: Option<String>,
}

impl From<ColumnSpec> for Column {
    fn from(spec: ColumnSpec) -> Self {
        let header = spec.header.unwrap_or_else(|| spec.key.clone());
        Column {
            key: spec.key,
            header,
            sortable: spec.sortable,
            align: spec.align,
            width: spec.width,
            render: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_row() -> Row {
        json!({ "id": 1, "status": "active" })
            .as_object()
            .cloned()
            .unwrap_or_default()
    }

    #[test]
    fn test_cell_uses_default_text_without_renderer() {
        let column = Column::new("status", "Status");
        assert_eq!(column.cell(&status_row()), Line::from("active"));
    }

    #[test]
    fn test_cell_missing_value_is_empty() {
        let column = Column::new("email", "Email");
        assert_eq!(column.cell(&status_row()), Line::from(""));
    }

    #[test]
    fn test_cell_dispatches_to_renderer() {
        let column = Column::new("status", "Status").render(|value, row| {
            let id = row.get("id").and_then(Value::as_i64).unwrap_or_default();
            Line::from(format!("[{}] #{}", display_text(value), id))
        });

        assert!(column.has_renderer());
        assert_eq!(column.cell(&status_row()), Line::from("[active] #1"));
    }

    #[test]
    fn test_builder_sets_fields() {
        let column = Column::new("name", "Name")
            .sortable()
            .align(Align::Right)
            .width("200px");

        assert!(column.sortable);
        assert_eq!(column.align, Some(Align::Right));
        assert_eq!(column.width.as_deref(), Some("200px"));
        assert!(!column.has_renderer());
    }

    #[test]
    fn test_column_spec_defaults_header_to_key() {
        let spec: ColumnSpec = serde_json::from_str(r#"{ "key": "email", "align": "center" }"#)
            .expect("valid column spec");
        let column = Column::from(spec);

        assert_eq!(column.header, "email");
        assert!(!column.sortable);
        assert_eq!(column.align, Some(Align::Center));
    }

    #[test]
    fn test_align_maps_to_alignment() {
        assert_eq!(Alignment::from(Align::Center), Alignment::Center);
        assert_eq!(Align::Right.token(), "right");
    }
}
