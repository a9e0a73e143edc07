//! Row access.
//!
//! Tables never know the concrete shape of a row. Anything that can look up a field by key and
//! enumerate all of its fields implements [`Record`].

use crate::value::Value;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// A row of display data.
pub trait Record {
    /// Returns the field stored under `key`, or `None` when the row has no such field.
    fn field(&self, key: &str) -> Option<Value>;

    /// Returns every field value of the row, including fields no column displays.
    ///
    /// The global filter searches these.
    fn values(&self) -> Vec<Value>;

    /// Same as [`Record::field`] with a missing field read as [`Value::Null`].
    fn field_or_null(&self, key: &str) -> Value {
        self.field(key).unwrap_or(Value::Null)
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn field(&self, key: &str) -> Option<Value> {
        (**self).field(key)
    }

    fn values(&self) -> Vec<Value> {
        (**self).values()
    }
}

/// An insertion-ordered row built from key/value pairs.
///
/// ```
/// use ratatui_datatable_core::record::{Record, Row};
///
/// let row = Row::new().with("id", 1).with("name", "Amy");
/// assert_eq!(row.field("name").map(|v| v.to_string()), Some("Amy".to_string()));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing an existing field of the same key in place.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.set(k, v);
        }
        row
    }
}

impl Record for Row {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn values(&self) -> Vec<Value> {
        self.fields.iter().map(|(_, v)| v.clone()).collect()
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn values(&self) -> Vec<Value> {
        BTreeMap::values(self).cloned().collect()
    }
}

impl<S: std::hash::BuildHasher> Record for HashMap<String, Value, S> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn values(&self) -> Vec<Value> {
        HashMap::values(self).cloned().collect()
    }
}

#[cfg(feature = "json")]
impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).map(Value::from)
    }

    fn values(&self) -> Vec<Value> {
        serde_json::Map::values(self).map(Value::from).collect()
    }
}
