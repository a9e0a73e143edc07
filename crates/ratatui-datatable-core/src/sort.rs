//! Single-column, three-state header sorting.

use crate::column::Column;
use crate::record::Record;
use crate::value::Value;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The active sort column and its direction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Where rows whose sort field is null, missing or NaN end up. The placement holds in both
/// directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NullsPlacement {
    First,
    #[default]
    Last,
}

/// Owns the sort state and derives sorted views from it.
///
/// Clicking the same column cycles `unsorted -> ascending -> descending -> unsorted`. Clicking
/// another column starts that column at ascending.
#[derive(Clone, Debug, Default)]
pub struct SortEngine {
    state: Option<SortSpec>,
    nulls: NullsPlacement,
}

impl SortEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nulls(nulls: NullsPlacement) -> Self {
        Self { state: None, nulls }
    }

    pub fn state(&self) -> Option<&SortSpec> {
        self.state.as_ref()
    }

    pub fn nulls(&self) -> NullsPlacement {
        self.nulls
    }

    pub fn set_nulls(&mut self, nulls: NullsPlacement) {
        self.nulls = nulls;
    }

    /// Replaces the state outright (e.g. to restore a saved sort).
    pub fn set_sort(&mut self, state: Option<SortSpec>) {
        self.state = state;
    }

    pub fn clear(&mut self) {
        self.state = None;
    }

    /// Advances the sort cycle for `column`. Returns `false` (and changes nothing) when the
    /// column is not sortable.
    pub fn request_sort(&mut self, column: &Column) -> bool {
        if !column.sortable {
            return false;
        }
        self.state = match self.state.take() {
            Some(SortSpec {
                key,
                direction: SortDirection::Asc,
            }) if key == column.key => Some(SortSpec::desc(key)),
            Some(SortSpec {
                key,
                direction: SortDirection::Desc,
            }) if key == column.key => None,
            _ => Some(SortSpec::asc(column.key.clone())),
        };
        log::debug!("sort state -> {:?}", self.state);
        true
    }

    /// Indices into `rows` in sorted order. Identity order when unsorted.
    ///
    /// The sort is stable in both directions: rows with equal keys keep their input order.
    pub fn sorted_indices<R: Record>(&self, rows: &[R]) -> Vec<usize> {
        let Some(spec) = &self.state else {
            return (0..rows.len()).collect();
        };
        let keys: Vec<Value> = rows.iter().map(|r| r.field_or_null(&spec.key)).collect();
        let mut order: Vec<usize> = (0..rows.len()).collect();
        order.sort_by(|&a, &b| self.compare(&keys[a], &keys[b], spec.direction));
        order
    }

    /// A sorted view over `rows`. `rows` itself is never reordered.
    pub fn sorted_view<'a, R: Record>(&self, rows: &'a [R]) -> Vec<&'a R> {
        self.sorted_indices(rows)
            .into_iter()
            .map(|i| &rows[i])
            .collect()
    }

    fn compare(&self, a: &Value, b: &Value, direction: SortDirection) -> Ordering {
        match (sorts_as_null(a), sorts_as_null(b)) {
            (true, true) => Ordering::Equal,
            (true, false) => self.null_side(),
            (false, true) => self.null_side().reverse(),
            (false, false) => {
                let ord = a.sort_cmp(b);
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
        }
    }

    fn null_side(&self) -> Ordering {
        match self.nulls {
            NullsPlacement::First => Ordering::Less,
            NullsPlacement::Last => Ordering::Greater,
        }
    }
}

/// Null, missing and NaN fields have no position of their own and follow [`NullsPlacement`].
fn sorts_as_null(v: &Value) -> bool {
    v.is_null() || v.is_nan()
}
