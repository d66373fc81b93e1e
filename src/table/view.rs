//! View model builder
//!
//! Turns rows, columns, the caller's sort descriptor and the expansion
//! registry into a framework-agnostic description of what to paint.
//! The builder never reorders rows.

use super::column::{Align, Column};
use super::expansion::{ExpansionRegistry, RowKey};
use super::sort::{AriaSort, SortState};
use super::value::Row;
use super::{DetailRenderer, TableConfig};
use ratatui::text::{Line, Text};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const EXPAND_COLUMN_LABEL: &str = "Expand row";
pub const EXPANDED_GLYPH: &str = "▼";
pub const COLLAPSED_GLYPH: &str = "▶";

/// Everything a renderer needs for one paint
#[derive(Debug, Clone, PartialEq)]
pub enum ViewModel {
    Loading(StatusView),
    Empty(StatusView),
    Table(TableView),
}

impl ViewModel {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewModel::Loading(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ViewModel::Empty(_))
    }

    pub fn as_table(&self) -> Option<&TableView> {
        match self {
            ViewModel::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// Loading or empty placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub message: String,
    pub role: &'static str,
    /// Live-region politeness, if announced
    pub aria_live: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub aria_label: String,
    pub header: HeaderRow,
    pub body: Vec<BodyItem>,
}

impl TableView {
    /// Number of painted columns, including the expand pseudo-column
    pub fn column_count(&self) -> usize {
        self.header.cells.len() + usize::from(self.header.expand.is_some())
    }

    /// Number of data rows, excluding expanded-content rows
    pub fn body_row_count(&self) -> usize {
        self.rows().count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &BodyRow> {
        self.body.iter().filter_map(|item| match item {
            BodyItem::Row(row) => Some(row),
            BodyItem::Expanded(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    /// Leading expand pseudo-column, present when the table is expandable
    pub expand: Option<ExpandHeader>,
    pub cells: Vec<HeaderCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandHeader {
    pub aria_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub align: Option<Align>,
    pub width: Option<String>,
    pub aria_sort: Option<AriaSort>,
    pub indicator: Option<&'static str>,
    pub role: &'static str,
    /// Sortable headers take keyboard focus
    pub focusable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyItem {
    Row(BodyRow),
    Expanded(ExpandedRow),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyRow {
    pub key: RowKey,
    pub cells: Vec<BodyCell>,
    pub expanded: bool,
    /// Set only on expandable tables
    pub aria_expanded: Option<bool>,
    pub indicator: Option<&'static str>,
    pub role: &'static str,
    pub focusable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyCell {
    pub column_key: String,
    pub align: Option<Align>,
    pub content: Line<'static>,
}

/// Detail content following an expanded row, spanning every column
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedRow {
    pub key: RowKey,
    pub colspan: usize,
    pub content: Text<'static>,
}

/// Build the view model.
///
/// Loading takes priority over the empty state, which takes priority over
/// the table itself.
pub fn build_view(
    rows: &[Row],
    columns: &[Column],
    sort: &SortState,
    expansion: &ExpansionRegistry,
    config: &TableConfig,
    detail: Option<&DetailRenderer>,
) -> ViewModel {
    if config.is_loading {
        return ViewModel::Loading(StatusView {
            message: LOADING_MESSAGE.to_string(),
            role: "status",
            aria_live: Some("polite"),
        });
    }

    if rows.is_empty() {
        return ViewModel::Empty(StatusView {
            message: config.empty_message.clone(),
            role: "status",
            aria_live: None,
        });
    }

    let header = HeaderRow {
        expand: config.expandable.then_some(ExpandHeader {
            aria_label: EXPAND_COLUMN_LABEL,
        }),
        cells: columns.iter().map(|column| header_cell(column, sort)).collect(),
    };

    let mut body = Vec::with_capacity(rows.len());
    for row in rows {
        let key = RowKey::of(row, &config.key_field);
        let expanded = expansion.is_expanded(&key);

        body.push(BodyItem::Row(body_row(row, key.clone(), expanded, columns, config)));

        if let (true, true, Some(detail)) = (config.expandable, expanded, detail) {
            body.push(BodyItem::Expanded(ExpandedRow {
                key,
                colspan: columns.len() + 1,
                content: detail(row),
            }));
        }
    }

    ViewModel::Table(TableView {
        aria_label: config.aria_label.clone(),
        header,
        body,
    })
}

fn header_cell(column: &Column, sort: &SortState) -> HeaderCell {
    HeaderCell {
        key: column.key.clone(),
        label: column.header.clone(),
        sortable: column.sortable,
        align: column.align,
        width: column.width.clone(),
        aria_sort: sort.aria_sort_for(column),
        indicator: sort.indicator_for(column),
        role: if column.sortable {
            "columnheader button"
        } else {
            "columnheader"
        },
        focusable: column.sortable,
    }
}

fn body_row(
    row: &Row,
    key: RowKey,
    expanded: bool,
    columns: &[Column],
    config: &TableConfig,
) -> BodyRow {
    let cells = columns
        .iter()
        .map(|column| BodyCell {
            column_key: column.key.clone(),
            align: column.align,
            content: column.cell(row),
        })
        .collect();

    let expandable = config.expandable;
    BodyRow {
        key,
        cells,
        expanded,
        aria_expanded: expandable.then_some(expanded),
        indicator: expandable.then_some(if expanded {
            EXPANDED_GLYPH
        } else {
            COLLAPSED_GLYPH
        }),
        role: if expandable { "row button" } else { "row" },
        focusable: expandable,
    }
}
