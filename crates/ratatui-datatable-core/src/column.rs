use crate::error::Result;
use crate::error::TableError;
use crate::value::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Formats a raw field value for display.
pub type CellRenderer = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Describes how one field is labeled, sorted and displayed.
///
/// A `render` function only affects display. Sorting and filtering always see the raw value.
/// Its output is passed through untouched: a host that interprets it as markup must escape
/// untrusted data inside the renderer itself.
#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub header: String,
    pub sortable: bool,
    pub width: u16,
    render: Option<CellRenderer>,
}

impl Column {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        let header = header.into();
        let width = (unicode_width::UnicodeWidthStr::width(header.as_str()) + 2).clamp(4, 24) as u16;
        Self {
            key: key.into(),
            header,
            sortable: true,
            width,
            render: None,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Display text for `value`: the renderer's output if one is set, otherwise the value's
    /// plain text (empty for `Null`).
    pub fn display(&self, value: &Value) -> String {
        match &self.render {
            Some(render) => render(value),
            None => value.to_string(),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Rejects column sets a table cannot be built from.
///
/// # Errors
///
/// Returns a [`TableError`] when `columns` is empty, or a column has an empty key or header, or
/// two columns share a key.
pub fn validate_columns(columns: &[Column]) -> Result<()> {
    if columns.is_empty() {
        return Err(TableError::NoColumns);
    }
    let mut seen = HashSet::with_capacity(columns.len());
    for (index, col) in columns.iter().enumerate() {
        if col.key.is_empty() {
            return Err(TableError::MissingKey { index });
        }
        if col.header.is_empty() {
            return Err(TableError::MissingHeader {
                key: col.key.clone(),
            });
        }
        if !seen.insert(col.key.as_str()) {
            return Err(TableError::DuplicateKey {
                key: col.key.clone(),
            });
        }
    }
    Ok(())
}
