//! Global, case-insensitive substring filtering.

use crate::record::Record;

/// Owns the filter text and derives filtered views from it.
///
/// Filtering is not column-scoped: a row matches when *any* of its fields, including fields no
/// column shows, contains the filter text.
#[derive(Clone, Debug, Default)]
pub struct FilterEngine {
    text: String,
    needle: String,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw filter text, exactly as it was set.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_active(&self) -> bool {
        !self.text.is_empty()
    }

    /// Stores `text` verbatim. Returns `true` if it differs from the previous text.
    pub fn set_filter_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.needle = text.to_lowercase();
        self.text = text;
        log::trace!("filter text -> {:?}", self.text);
        true
    }

    pub fn clear(&mut self) -> bool {
        self.set_filter_text(String::new())
    }

    pub fn matches<R: Record + ?Sized>(&self, row: &R) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        row.values()
            .iter()
            .any(|v| v.to_string().to_lowercase().contains(&self.needle))
    }

    /// The subsequence of `rows` that matches, in input order.
    pub fn filtered_view<'a, R, I>(&self, rows: I) -> Vec<&'a R>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        rows.into_iter().filter(|r| self.matches(*r)).collect()
    }
}
