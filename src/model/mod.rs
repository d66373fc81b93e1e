//! Model layer - data owned by the App
//!
//! - `Dataset` - rows plus caller-side sorting
//! - `Pagination` - page bookkeeping over the sorted rows
//! - `ModalStack` - overlay management
//! - `Sample` - built-in datasets

pub mod dataset;
pub mod modal;
pub mod pagination;
pub mod sample;

pub use dataset::{sort_rows, Dataset};
pub use modal::{Modal, ModalStack};
pub use pagination::Pagination;
pub use sample::Sample;
