use std::cmp::Ordering;
use std::fmt;

/// A single field value of a row.
///
/// `Null` stands for both an explicit null and a field the row does not have.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of `Int` and `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(i) => Some(i as f64),
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    /// `true` for a float NaN. Sorting places NaN together with nulls.
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Float(f) if f.is_nan())
    }

    /// Orders two values the way a table header sort does. This is a total order.
    ///
    /// Numbers compare numerically and exactly: an `Int` and a `Float` are compared without
    /// rounding the integer through `f64`. NaN sorts after every other number. Text compares
    /// lexicographically by code point and `false < true`. Values of different kinds order by
    /// kind: booleans, then numbers, then text.
    ///
    /// `Null` is ordered before everything here; callers that need a different null placement
    /// handle nulls before calling this (see [`crate::sort::NullsPlacement`]).
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => cmp_f64(*a, *b),
            (Value::Int(a), Value::Float(b)) => cmp_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Text(_) => 3,
        }
    }
}

/// NaN is greater than every number and equal to itself; `-0.0 == 0.0`.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer with a float.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // 2^63: every i64 is below it, every i64 is at or above its negation.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() || f >= BOUND {
        return Ordering::Less;
    }
    if f < -BOUND {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    // `whole` is integral and within i64 range, so the cast is exact.
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0f64.partial_cmp(&(f - whole)).unwrap_or(Ordering::Equal),
        ord => ord,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(feature = "json")]
impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Text(s.clone()),
            // Nested structures are shown (and filtered) by their JSON text.
            other => Value::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_plain_text_conversion() {
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float(3.0).to_string(), "3");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from("Amy").to_string(), "Amy");
    }

    #[test]
    fn numbers_compare_numerically_across_kinds() {
        assert_eq!(Value::Int(2).sort_cmp(&Value::Int(10)), Ordering::Less);
        assert_eq!(Value::Int(2).sort_cmp(&Value::Float(1.5)), Ordering::Greater);
        assert_eq!(Value::Int(2).sort_cmp(&Value::Float(2.0)), Ordering::Equal);
        assert_eq!(Value::Float(-2.5).sort_cmp(&Value::Int(-2)), Ordering::Less);
    }

    #[test]
    fn large_ints_compare_exactly_against_floats() {
        let big = 1i64 << 53;
        // `big + 1` rounds to `big as f64`, but the exact values differ.
        assert_eq!(
            Value::Int(big + 1).sort_cmp(&Value::Float(big as f64)),
            Ordering::Greater
        );
        assert_eq!(
            Value::Float(big as f64).sort_cmp(&Value::Int(big + 1)),
            Ordering::Less
        );
        assert_eq!(Value::Int(i64::MAX).sort_cmp(&Value::Float(1e19)), Ordering::Less);
        assert_eq!(Value::Int(i64::MIN).sort_cmp(&Value::Float(-1e19)), Ordering::Greater);
    }

    #[test]
    fn nan_sorts_after_every_number() {
        let nan = Value::Float(f64::NAN);
        assert!(nan.is_nan());
        assert_eq!(nan.sort_cmp(&Value::Float(f64::INFINITY)), Ordering::Greater);
        assert_eq!(nan.sort_cmp(&Value::Int(i64::MAX)), Ordering::Greater);
        assert_eq!(Value::Int(1).sort_cmp(&nan), Ordering::Less);
        assert_eq!(nan.sort_cmp(&Value::Float(f64::NAN)), Ordering::Equal);
        assert_eq!(nan.sort_cmp(&Value::from("a")), Ordering::Less);
    }

    #[test]
    fn text_compares_lexicographically() {
        assert_eq!(Value::from("10").sort_cmp(&Value::from("9")), Ordering::Less);
        assert_eq!(Value::from("Amy").sort_cmp(&Value::from("Bob")), Ordering::Less);
    }

    #[test]
    fn mixed_kinds_order_by_kind() {
        assert_eq!(Value::Bool(true).sort_cmp(&Value::Int(0)), Ordering::Less);
        assert_eq!(Value::Int(99).sort_cmp(&Value::from("a")), Ordering::Less);
    }
}
