//! Action enum - All possible application actions
//!
//! Components turn terminal events into Actions; the App and the table
//! component process them to update state.

use crate::table::{RowKey, SortRequest};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for deferred work
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Table Focus
    // ─────────────────────────────────────────────────────────────────────────
    /// Switch keyboard focus between the header row and the body
    ToggleFocus,
    /// Focus the next header cell
    NextColumn,
    /// Focus the previous header cell
    PrevColumn,
    /// Focus the next body row
    NextRow,
    /// Focus the previous body row
    PrevRow,
    /// Focus the first body row
    FirstRow,
    /// Focus the last body row
    LastRow,

    // ─────────────────────────────────────────────────────────────────────────
    // Table Activation
    // ─────────────────────────────────────────────────────────────────────────
    /// Header cell activated (click)
    ActivateHeader(String),
    /// Body row activated (click)
    ActivateRow(RowKey),
    /// Sort change requested by the table; applied by the data owner
    Sort(SortRequest),

    // ─────────────────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────────────────
    /// Go to the next page
    NextPage,
    /// Go to the previous page
    PrevPage,
    /// Switch to the next page size option
    CyclePageSize,
    /// Reload the dataset from its source
    Reload,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Scroll the current modal up
    ScrollUp,
    /// Scroll the current modal down
    ScrollDown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::ToggleFocus => write!(f, "ToggleFocus"),
            Action::NextColumn => write!(f, "NextColumn"),
            Action::PrevColumn => write!(f, "PrevColumn"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::ActivateHeader(key) => write!(f, "ActivateHeader({})", key),
            Action::ActivateRow(key) => write!(f, "ActivateRow({})", key),
            Action::Sort(request) => write!(f, "Sort({}, {})", request.column, request.order),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::CyclePageSize => write!(f, "CyclePageSize"),
            Action::Reload => write!(f, "Reload"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
        }
    }
}
