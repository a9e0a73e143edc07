//! `ratatui-datatable` is the facade crate: a sortable, filterable table widget for ratatui.
//!
//! Everything lives in `ratatui-datatable-core` and is re-exported here under the same module
//! paths.
//!
//! ## Features
//!
//! - `crossterm`: [`crossterm_input`] converts crossterm events into [`input::InputEvent`].
//! - `json`: [`record::Record`] for `serde_json::Map` and `Value` conversion from JSON.
//!
//! ## Example
//!
//! ```
//! use ratatui_datatable::column::Column;
//! use ratatui_datatable::record::Row;
//! use ratatui_datatable::table::DataTable;
//! use ratatui_datatable::table::TableOptions;
//!
//! let mut table = DataTable::new(
//!     vec![Column::new("name", "Name"), Column::new("age", "Age")],
//!     TableOptions::default(),
//! )?;
//! let rows = vec![
//!     Row::new().with("name", "Bob").with("age", 31),
//!     Row::new().with("name", "Amy").with("age", 27),
//! ];
//!
//! table.on_header_activate("age");
//! let out = table.render(&rows);
//! assert_eq!(out.body[0].cells[0].display, "Amy");
//! # Ok::<(), ratatui_datatable::error::TableError>(())
//! ```
pub use ratatui_datatable_core::column;
pub use ratatui_datatable_core::datatable;
pub use ratatui_datatable_core::error;
pub use ratatui_datatable_core::filter;
pub use ratatui_datatable_core::help;
pub use ratatui_datatable_core::input;
pub use ratatui_datatable_core::keymap;
pub use ratatui_datatable_core::record;
pub use ratatui_datatable_core::render;
pub use ratatui_datatable_core::sort;
pub use ratatui_datatable_core::table;
pub use ratatui_datatable_core::theme;
pub use ratatui_datatable_core::value;
pub use ratatui_datatable_core::viewport;

#[cfg(feature = "crossterm")]
pub use ratatui_datatable_core::crossterm_input;
