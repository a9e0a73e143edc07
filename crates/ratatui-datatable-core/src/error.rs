//! Configuration errors for tables.
//!
//! Only the column setup can fail. Rows that lack a field a column refers to are not an error:
//! the field reads as [`crate::value::Value::Null`] and displays as an empty cell.

/// Errors raised while configuring a table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("a table needs at least one column")]
    NoColumns,

    #[error("column #{index} has an empty key")]
    MissingKey { index: usize },

    #[error("column `{key}` has an empty header")]
    MissingHeader { key: String },

    #[error("column key `{key}` is used more than once")]
    DuplicateKey { key: String },
}

pub type Result<T> = std::result::Result<T, TableError>;
