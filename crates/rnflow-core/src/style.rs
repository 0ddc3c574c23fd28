//! Style records.
//!
//! A style record maps CSS-like property names to values. A property that
//! is absent is different from a property set to a zero value; resolvers
//! only insert properties they actually computed.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A single style property value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Number(f64),
    Str(String),
    List(Vec<StyleValue>),
    Object(StyleMap),
}

impl StyleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// True when this is the number `value`.
    pub fn is_number(&self, value: f64) -> bool {
        self.as_number() == Some(value)
    }

    /// True when this is the string `value`.
    pub fn is_str(&self, value: &str) -> bool {
        self.as_str() == Some(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<u32> for StyleValue {
    fn from(value: u32) -> Self {
        StyleValue::Number(value as f64)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Str(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Str(value)
    }
}

impl From<Vec<StyleValue>> for StyleValue {
    fn from(value: Vec<StyleValue>) -> Self {
        StyleValue::List(value)
    }
}

impl From<StyleMap> for StyleValue {
    fn from(value: StyleMap) -> Self {
        StyleValue::Object(value)
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StyleValue::Number(n) if is_integral(*n) => serializer.serialize_i64(*n as i64),
            StyleValue::Number(n) => serializer.serialize_f64(*n),
            StyleValue::Str(s) => serializer.serialize_str(s),
            StyleValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            StyleValue::Object(map) => map.serialize(serializer),
        }
    }
}

/// An insertion-ordered style record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleMap(IndexMap<String, StyleValue>);

impl StyleMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Insert `value` under `key` when it is present; absent values leave the record untouched.
    pub fn set<V: Into<StyleValue>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.0.insert(key.to_string(), value.into());
        }
    }

    pub fn insert<V: Into<StyleValue>>(&mut self, key: &str, value: V) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Builder form of [`StyleMap::insert`].
    pub fn with<V: Into<StyleValue>>(mut self, key: &str, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert at `index`, moving an existing entry for `key` there.
    pub fn insert_at(&mut self, index: usize, key: &str, value: StyleValue) {
        let index = index.min(self.0.len());
        self.0.shift_insert(index, key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(StyleValue::as_number)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(StyleValue::as_str)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.0.get_index_of(key)
    }

    /// Remove `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        self.0.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, StyleValue)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (String, StyleValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for StyleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15
}

/// Format a number the way a JavaScript engine prints it: whole numbers
/// without a fractional part and never a negative zero.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if is_integral(value) {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
