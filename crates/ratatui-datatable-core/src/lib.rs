//! `ratatui-datatable-core` provides a sortable, filterable data table for terminal UIs.
//!
//! The crate is split in two layers:
//!
//! - A backend-free model: [`table::DataTable`] composes a [`sort::SortEngine`] and a
//!   [`filter::FilterEngine`] over rows the caller owns. [`table::DataTable::render`] returns a
//!   plain [`table::RenderedTable`] any UI can draw.
//! - A ratatui widget: [`datatable::view::DataTableView`] draws that model with a filter line,
//!   a clickable header and a virtualized body.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input + rendering from your app.
//! - Rows stay yours: pass any slice of [`record::Record`] values on every call, the table never
//!   copies or mutates them.
//! - Sorting is stable and the pipeline order is fixed: sort first, then filter.
//!
//! ## Getting started
//!
//! Most users should depend on the facade crate `ratatui-datatable`.
//!
//! Useful entry points:
//! - [`column::Column`]: key, header, sortability and an optional cell renderer.
//! - [`table::DataTable`]: the model, usable without ratatui.
//! - [`datatable::view::DataTableView`]: the terminal widget.
//! - [`help::HelpBar`]: renders [`datatable::view::DataTableView::bindings_help`].
pub mod error;
pub mod value;
pub mod record;
pub mod column;

pub mod filter;
pub mod sort;
pub mod table;

pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod render;
pub mod viewport;

pub mod datatable;
pub mod help;
pub mod input;
pub mod keymap;
