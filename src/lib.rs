//! datagrid - a generic tabular data view engine with a terminal host
//!
//! The `table` module is the engine: column model and nested-path value
//! resolution, the sort state machine, the row expansion registry, and the
//! view model builder. Everything else is the terminal host that owns the
//! data and the sort descriptor, paints view models with ratatui, and
//! forwards pointer and keyboard activations back into the engine.

pub mod action;
pub mod app;
pub mod component;
pub mod components;
pub mod config;
pub mod logging;
pub mod model;
pub mod table;
pub mod tui;
