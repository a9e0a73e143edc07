//! Terminal widget hosting a [`crate::table::DataTable`].
pub mod view;
