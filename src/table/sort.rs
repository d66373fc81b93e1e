//! Sort state machine
//!
//! The sort descriptor is owned by the caller and passed in on every build.
//! The engine only computes the next descriptor when a header is activated;
//! reordering rows is left to whoever owns the data.
//!
//! Once a column is active, activation toggles strictly between ascending
//! and descending. There is no path back to "unsorted".

use super::column::Column;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SORT_ASC_GLYPH: &str = "▲";
pub const SORT_DESC_GLYPH: &str = "▼";
pub const SORT_NONE_GLYPH: &str = "⇅";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// ARIA sort state exposed on the active column header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaSort {
    Ascending,
    Descending,
}

impl AriaSort {
    pub fn token(&self) -> &'static str {
        match self {
            AriaSort::Ascending => "ascending",
            AriaSort::Descending => "descending",
        }
    }
}

impl From<SortOrder> for AriaSort {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => AriaSort::Ascending,
            SortOrder::Desc => AriaSort::Descending,
        }
    }
}

/// Caller-owned sort descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    /// Active sort column key; `None` means no active sort
    pub column: Option<String>,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        Self {
            column: Some(column.into()),
            order,
        }
    }

    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Whether `key` is the active sort column
    pub fn is_active(&self, key: &str) -> bool {
        self.column.as_deref() == Some(key)
    }

    /// ARIA sort value for a header; only sortable, active columns carry one
    pub fn aria_sort_for(&self, column: &Column) -> Option<AriaSort> {
        (column.sortable && self.is_active(&column.key)).then(|| self.order.into())
    }

    /// Indicator glyph for a header; non-sortable columns carry none
    pub fn indicator_for(&self, column: &Column) -> Option<&'static str> {
        if !column.sortable {
            return None;
        }
        let glyph = match (self.is_active(&column.key), self.order) {
            (true, SortOrder::Asc) => SORT_ASC_GLYPH,
            (true, SortOrder::Desc) => SORT_DESC_GLYPH,
            (false, _) => SORT_NONE_GLYPH,
        };
        Some(glyph)
    }
}

/// A requested sort change, reported to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
    pub column: String,
    pub order: SortOrder,
}

impl From<SortRequest> for SortState {
    fn from(request: SortRequest) -> Self {
        SortState {
            column: Some(request.column),
            order: request.order,
        }
    }
}

/// Compute the sort descriptor that follows activating `column`
pub fn next_sort(current: &SortState, column: &str) -> SortRequest {
    let order = if current.is_active(column) {
        current.order.toggled()
    } else {
        SortOrder::Asc
    };
    SortRequest {
        column: column.to_string(),
        order,
    }
}
