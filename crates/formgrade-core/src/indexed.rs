//! Index-keyed values as stored in form settings and answer payloads.
//!
//! Form editors persist per-slot data (correct answers, point values, blank
//! entries) either as a JSON object keyed by decimal strings (`{"0": 1}`) or
//! as a plain array (`[1]`). `IndexedValues` accepts both and silently drops
//! entries whose key or value does not convert.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A value that can be read leniently out of a JSON slot.
pub trait IndexedValue: Sized {
    /// Convert a JSON value, returning `None` if it has the wrong shape.
    fn from_json(value: &Value) -> Option<Self>;

    /// Convert back to JSON for persistence.
    fn to_json(&self) -> Value;
}

impl IndexedValue for String {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl IndexedValue for i64 {
    fn from_json(value: &Value) -> Option<Self> {
        integer(value)
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl IndexedValue for usize {
    fn from_json(value: &Value) -> Option<Self> {
        integer(value).and_then(|n| usize::try_from(n).ok())
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl IndexedValue for u32 {
    fn from_json(value: &Value) -> Option<Self> {
        integer(value).and_then(|n| u32::try_from(n).ok())
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

/// Read an integral JSON number. `2.0` counts, `2.5` and `"2"` do not.
pub(crate) fn integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Sparse mapping from slot index to value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedValues<T> {
    entries: BTreeMap<usize, T>,
}

impl<T> Default for IndexedValues<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: IndexedValue> IndexedValues<T> {
    /// Build from any JSON value. Objects and arrays are read; everything
    /// else yields an empty mapping.
    pub fn from_json(value: &Value) -> Self {
        let mut entries = BTreeMap::new();
        match value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if let Some(v) = T::from_json(item) {
                        entries.insert(index, v);
                    }
                }
            }
            Value::Object(map) => {
                for (key, item) in map {
                    let Some(index) = parse_index(key) else {
                        continue;
                    };
                    if let Some(v) = T::from_json(item) {
                        entries.insert(index, v);
                    }
                }
            }
            _ => {}
        }
        Self { entries }
    }
}

impl<T> IndexedValues<T> {
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

impl<T> FromIterator<(usize, T)> for IndexedValues<T> {
    fn from_iter<I: IntoIterator<Item = (usize, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Only canonical decimal keys address a slot: `"1"` does, `"01"` and `"x"` don't.
fn parse_index(key: &str) -> Option<usize> {
    let index = key.parse::<usize>().ok()?;
    (index.to_string() == key).then_some(index)
}

impl<'de, T: IndexedValue> Deserialize<'de> for IndexedValues<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&raw))
    }
}

impl<T: IndexedValue> Serialize for IndexedValues<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let map: serde_json::Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_json()))
            .collect();
        map.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_object_with_string_keys() {
        let values: IndexedValues<usize> = IndexedValues::from_json(&json!({"0": 1, "2": 0}));
        assert_eq!(values.get(0), Some(&1));
        assert_eq!(values.get(1), None);
        assert_eq!(values.get(2), Some(&0));
    }

    #[test]
    fn reads_array_positions() {
        let values: IndexedValues<String> = IndexedValues::from_json(&json!(["brown", null, "lazy"]));
        assert_eq!(values.get(0).map(String::as_str), Some("brown"));
        assert_eq!(values.get(1), None);
        assert_eq!(values.get(2).map(String::as_str), Some("lazy"));
    }

    #[test]
    fn drops_unconvertible_entries() {
        let values: IndexedValues<i64> =
            IndexedValues::from_json(&json!({"0": "2", "1": 2.5, "2": 3.0, "x": 1, "03": 1}));
        assert_eq!(values.len(), 1);
        assert_eq!(values.get(2), Some(&3));
    }

    #[test]
    fn scalars_are_empty() {
        assert!(IndexedValues::<u32>::from_json(&json!("abc")).is_empty());
        assert!(IndexedValues::<u32>::from_json(&Value::Null).is_empty());
    }

    #[test]
    fn negative_numbers_do_not_become_points() {
        let values: IndexedValues<u32> = IndexedValues::from_json(&json!({"0": -1, "1": 4}));
        assert_eq!(values.get(0), None);
        assert_eq!(values.get(1), Some(&4));
    }

    #[test]
    fn serializes_as_string_keyed_object() {
        let values: IndexedValues<u32> = [(0, 2), (3, 1)].into_iter().collect();
        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(json, json!({"0": 2, "3": 1}));
    }
}
