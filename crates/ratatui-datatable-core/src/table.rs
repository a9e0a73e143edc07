//! The table model: sort and filter composed over caller-owned rows.
//!
//! [`DataTable`] holds the only mutable state of a table (sort and filter) plus the validated
//! columns. [`DataTable::render`] is a pure derivation: call it whenever the host redraws.

use crate::column::Column;
use crate::column::validate_columns;
use crate::error::Result;
use crate::filter::FilterEngine;
use crate::record::Record;
use crate::sort::NullsPlacement;
use crate::sort::SortDirection;
use crate::sort::SortEngine;
use crate::sort::SortSpec;

/// Options for [`DataTable`].
#[derive(Clone, Debug)]
pub struct TableOptions {
    /// Header activation sorts. When `false` no header is clickable.
    pub sortable: bool,
    /// Exposes the filter control. When `false` filter input is ignored entirely.
    pub filterable: bool,
    /// Shown instead of the body when no row survives the filter.
    pub empty_text: String,
    pub nulls: NullsPlacement,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            sortable: true,
            filterable: true,
            empty_text: "No data available".to_string(),
            nulls: NullsPlacement::Last,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortIndicator {
    #[default]
    None,
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub header: String,
    pub sort_indicator: SortIndicator,
    pub clickable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedCell {
    pub key: String,
    pub display: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedRow {
    /// Index of the row in the slice passed to [`DataTable::render`].
    pub source_index: usize,
    pub cells: Vec<RenderedCell>,
}

/// Output of [`DataTable::render`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedTable {
    pub header: Vec<HeaderCell>,
    pub body: Vec<RenderedRow>,
    /// `true` when the body is empty; show `empty_text` instead of an empty body.
    pub is_empty: bool,
    pub empty_text: String,
    /// Whether a filter control should be shown at all.
    pub filter_visible: bool,
}

impl RenderedTable {
    pub fn row_count(&self) -> usize {
        self.body.len()
    }
}

/// A sortable, filterable table over rows of any [`Record`] type.
///
/// The pipeline order is fixed: sort first, then filter.
#[derive(Clone, Debug)]
pub struct DataTable {
    columns: Vec<Column>,
    options: TableOptions,
    sort: SortEngine,
    filter: FilterEngine,
}

impl DataTable {
    /// # Errors
    ///
    /// Fails when the column set is invalid (see [`validate_columns`]).
    pub fn new(columns: Vec<Column>, options: TableOptions) -> Result<Self> {
        validate_columns(&columns)?;
        let sort = SortEngine::with_nulls(options.nulls);
        Ok(Self {
            columns,
            options,
            sort,
            filter: FilterEngine::new(),
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Replaces the columns. An active sort on a column that no longer exists (or is no longer
    /// sortable) is dropped.
    ///
    /// # Errors
    ///
    /// Fails when the new column set is invalid; the table is left unchanged.
    pub fn set_columns(&mut self, columns: Vec<Column>) -> Result<()> {
        validate_columns(&columns)?;
        self.columns = columns;
        let stale = self
            .sort
            .state()
            .is_some_and(|s| !self.column(&s.key).is_some_and(|c| c.sortable));
        if stale {
            log::debug!("dropping sort on removed column");
            self.sort.clear();
        }
        Ok(())
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn sort_state(&self) -> Option<&SortSpec> {
        self.sort.state()
    }

    pub fn set_sort(&mut self, state: Option<SortSpec>) {
        self.sort.set_sort(state);
    }

    /// Changes where null, missing and NaN sort fields go. Takes effect on the next render.
    pub fn set_nulls(&mut self, nulls: NullsPlacement) {
        self.options.nulls = nulls;
        self.sort.set_nulls(nulls);
    }

    pub fn filter_text(&self) -> &str {
        self.filter.text()
    }

    pub fn sort_engine(&self) -> &SortEngine {
        &self.sort
    }

    pub fn filter_engine(&self) -> &FilterEngine {
        &self.filter
    }

    /// Whether activating the header of `column` would sort.
    pub fn is_clickable(&self, column: &Column) -> bool {
        self.options.sortable && column.sortable
    }

    /// Handles a header click. Returns `true` if the sort state changed.
    pub fn on_header_activate(&mut self, key: &str) -> bool {
        if !self.options.sortable {
            return false;
        }
        match self.columns.iter().find(|c| c.key == key) {
            Some(col) => self.sort.request_sort(col),
            None => {
                log::debug!("header activation for unknown column {key:?} ignored");
                false
            }
        }
    }

    /// Handles filter input. Returns `true` if the filter text changed.
    pub fn on_filter_input(&mut self, text: impl Into<String>) -> bool {
        if !self.options.filterable {
            return false;
        }
        self.filter.set_filter_text(text)
    }

    /// Row indices after sort and filter, in display order.
    pub fn visible_indices<R: Record>(&self, rows: &[R]) -> Vec<usize> {
        self.sort
            .sorted_indices(rows)
            .into_iter()
            .filter(|&i| self.filter.matches(&rows[i]))
            .collect()
    }

    pub fn sort_indicator(&self, key: &str) -> SortIndicator {
        match self.sort.state() {
            Some(s) if s.key == key => match s.direction {
                SortDirection::Asc => SortIndicator::Asc,
                SortDirection::Desc => SortIndicator::Desc,
            },
            _ => SortIndicator::None,
        }
    }

    pub fn header(&self) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .map(|c| HeaderCell {
                key: c.key.clone(),
                header: c.header.clone(),
                sort_indicator: self.sort_indicator(&c.key),
                clickable: self.is_clickable(c),
            })
            .collect()
    }

    pub fn render_row<R: Record>(&self, source_index: usize, row: &R) -> RenderedRow {
        RenderedRow {
            source_index,
            cells: self
                .columns
                .iter()
                .map(|c| RenderedCell {
                    key: c.key.clone(),
                    display: c.display(&row.field_or_null(&c.key)),
                })
                .collect(),
        }
    }

    pub fn render<R: Record>(&self, rows: &[R]) -> RenderedTable {
        let body: Vec<RenderedRow> = self
            .visible_indices(rows)
            .into_iter()
            .map(|i| self.render_row(i, &rows[i]))
            .collect();
        RenderedTable {
            header: self.header(),
            is_empty: body.is_empty(),
            body,
            empty_text: self.options.empty_text.clone(),
            filter_visible: self.options.filterable,
        }
    }
}
