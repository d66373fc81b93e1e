//! Tabular data view engine
//!
//! `DataTable` is the engine instance. It combines:
//! - column descriptors and the nested-path value resolver (`column`, `value`)
//! - the sort state machine (`sort`), whose state is owned by the caller
//! - the row expansion registry (`expansion`), owned by the instance
//! - the view model builder (`view`)
//!
//! The host paints the `ViewModel` returned by [`DataTable::build`] and
//! forwards header and row activations back. Sort activations come back as
//! a [`SortRequest`] for the caller to apply; row activations toggle the
//! instance's own expansion state.
//!
//! Render hooks are expected not to panic. A panicking renderer unwinds
//! through `build`; recovering from it is the caller's concern.

pub mod column;
pub mod expansion;
pub mod sort;
pub mod value;
pub mod view;

pub use column::{Align, CellRenderer, Column, ColumnSpec};
pub use expansion::{ExpansionRegistry, RowKey};
pub use sort::{next_sort, AriaSort, SortOrder, SortRequest, SortState};
pub use value::{display_text, resolve, CellValue, Row};
pub use view::{build_view, BodyItem, BodyRow, ExpandedRow, HeaderCell, TableView, ViewModel};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use ratatui::text::Text;
use std::sync::Arc;

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";
pub const DEFAULT_ARIA_LABEL: &str = "Data table";

/// Renders the detail content shown beneath an expanded row
pub type DetailRenderer = Arc<dyn Fn(&Row) -> Text<'static>>;

/// Receives `(column_key, next_order)` when a sortable header is activated
pub type SortCallback = Box<dyn FnMut(&str, SortOrder)>;

/// Table-level configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Field whose value uniquely identifies each row
    pub key_field: String,
    pub expandable: bool,
    pub empty_message: String,
    pub is_loading: bool,
    pub aria_label: String,
}

impl TableConfig {
    pub fn new(key_field: impl Into<String>) -> Self {
        Self {
            key_field: key_field.into(),
            expandable: false,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            is_loading: false,
            aria_label: DEFAULT_ARIA_LABEL.to_string(),
        }
    }

    pub fn expandable(mut self, expandable: bool) -> Self {
        self.expandable = expandable;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = label.into();
        self
    }
}

/// Outcome of routing a key event to a header or row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyResponse {
    /// The key triggered an activation
    pub handled: bool,
    /// The host must suppress the key's default behaviour (Space scrolling)
    pub prevent_default: bool,
    /// Sort change produced by a header activation
    pub sort: Option<SortRequest>,
}

impl KeyResponse {
    fn ignored() -> Self {
        Self::default()
    }

    fn activated(sort: Option<SortRequest>) -> Self {
        Self {
            handled: true,
            prevent_default: true,
            sort,
        }
    }
}

/// Enter and Space activate headers and rows, same as a click
pub fn is_activation_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        && matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
}

/// Data table engine instance
pub struct DataTable {
    columns: Vec<Column>,
    config: TableConfig,
    detail: Option<DetailRenderer>,
    expansion: ExpansionRegistry,
    on_sort: Option<SortCallback>,
}

impl DataTable {
    pub fn new(columns: Vec<Column>, config: TableConfig) -> Self {
        Self {
            columns,
            config,
            detail: None,
            expansion: ExpansionRegistry::new(),
            on_sort: None,
        }
    }

    /// Set the detail renderer used for expanded rows
    pub fn with_detail<F>(mut self, detail: F) -> Self
    where
        F: Fn(&Row) -> Text<'static> + 'static,
    {
        self.detail = Some(Arc::new(detail));
        self
    }

    pub fn with_detail_renderer(mut self, detail: Option<DetailRenderer>) -> Self {
        self.detail = detail;
        self
    }

    /// Register the sort callback
    pub fn on_sort<F>(mut self, on_sort: F) -> Self
    where
        F: FnMut(&str, SortOrder) + 'static,
    {
        self.on_sort = Some(Box::new(on_sort));
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Replace the column set. Expansion state is kept.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.config.is_loading = is_loading;
    }

    pub fn set_empty_message(&mut self, message: impl Into<String>) {
        self.config.empty_message = message.into();
    }

    pub fn expansion(&self) -> &ExpansionRegistry {
        &self.expansion
    }

    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.expansion.is_expanded(key)
    }

    /// Key identifying `row` under this table's key field
    pub fn key_of(&self, row: &Row) -> RowKey {
        RowKey::of(row, &self.config.key_field)
    }

    /// Build the view model for `rows`, which must already be in display order
    pub fn build(&self, rows: &[Row], sort: &SortState) -> ViewModel {
        build_view(
            rows,
            &self.columns,
            sort,
            &self.expansion,
            &self.config,
            self.detail.as_ref(),
        )
    }

    /// Pointer activation of the header for `column_key`.
    ///
    /// Returns `None` for unknown or non-sortable columns, in which case the
    /// sort callback is not invoked. Otherwise the next sort descriptor is
    /// passed to the callback (if registered) and returned.
    pub fn activate_header(&mut self, column_key: &str, sort: &SortState) -> Option<SortRequest> {
        let sortable = self
            .columns
            .iter()
            .any(|column| column.key == column_key && column.sortable);
        if !sortable {
            return None;
        }

        let request = next_sort(sort, column_key);
        debug!("sort requested: {} {}", request.column, request.order);
        if let Some(on_sort) = self.on_sort.as_mut() {
            on_sort(&request.column, request.order);
        }
        Some(request)
    }

    /// Pointer activation of the row identified by `key`.
    ///
    /// Toggles its expansion on expandable tables and returns whether the
    /// registry changed.
    pub fn activate_row(&mut self, key: &RowKey) -> bool {
        if !self.config.expandable {
            return false;
        }
        let expanded = self.expansion.toggle(key);
        debug!("row {} {}", key, if expanded { "expanded" } else { "collapsed" });
        true
    }

    /// Keyboard activation of a header. Enter and Space behave exactly like
    /// [`DataTable::activate_header`].
    pub fn handle_header_key(
        &mut self,
        column_key: &str,
        key: KeyEvent,
        sort: &SortState,
    ) -> KeyResponse {
        let sortable = self
            .columns
            .iter()
            .any(|column| column.key == column_key && column.sortable);
        if !sortable || !is_activation_key(&key) {
            return KeyResponse::ignored();
        }
        KeyResponse::activated(self.activate_header(column_key, sort))
    }

    /// Keyboard activation of a row. Enter and Space behave exactly like
    /// [`DataTable::activate_row`].
    pub fn handle_row_key(&mut self, row_key: &RowKey, key: KeyEvent) -> KeyResponse {
        if !self.config.expandable || !is_activation_key(&key) {
            return KeyResponse::ignored();
        }
        self.activate_row(row_key);
        KeyResponse::activated(None)
    }
}
