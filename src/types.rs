//! Dynamically-typed preference values and the ordered bag that holds them
//!
//! A bag ([`PrefDict`]) is what a caller hands over when a browsing context is
//! created: a mapping from string key to a [`PrefValue`]. Nothing in a bag is
//! validated. Typed lookups return `None` when a key is absent *or* holds a
//! value of another type, so a wrong-typed entry behaves exactly like a
//! missing one.

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// A single preference value
///
/// # Example
///
/// ```rust
/// use webprefs::PrefValue;
///
/// let value = PrefValue::from("#fff");
/// assert_eq!(value.as_str(), Some("#fff"));
/// assert_eq!(value.as_bool(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PrefValue {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Number without an exact integer value; no preference reads one
    Double(f64),
    /// String value
    String(String),
    /// List of values; consumers skip elements of an unexpected type
    List(Vec<PrefValue>),
    /// Nested mapping
    Dict(PrefDict),
    /// Explicit `null`, kept so introspection shows the key
    Null,
}

impl PrefValue {
    /// Human-readable name of the variant, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            PrefValue::Bool(_) => "boolean",
            PrefValue::Integer(_) => "integer",
            PrefValue::Double(_) => "double",
            PrefValue::String(_) => "string",
            PrefValue::List(_) => "list",
            PrefValue::Dict(_) => "dictionary",
            PrefValue::Null => "null",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrefValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value if it fits the engine's `int`
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            PrefValue::Integer(i) => i32::try_from(*i).ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PrefValue]> {
        match self {
            PrefValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&PrefDict> {
        match self {
            PrefValue::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Convert a JSON value into a preference value
    ///
    /// Whole numbers become [`PrefValue::Integer`], even when written as
    /// `16.0`; any other number is kept as [`PrefValue::Double`].
    pub fn from_json(value: serde_json::Value) -> PrefValue {
        match value {
            serde_json::Value::Null => PrefValue::Null,
            serde_json::Value::Bool(b) => PrefValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return PrefValue::Integer(i);
                }
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                        PrefValue::Integer(f as i64)
                    }
                    Some(f) => PrefValue::Double(f),
                    None => {
                        tracing::debug!(number = %n, "number has no f64 value");
                        PrefValue::Null
                    }
                }
            }
            serde_json::Value::String(s) => PrefValue::String(s),
            serde_json::Value::Array(items) => {
                PrefValue::List(items.into_iter().map(PrefValue::from_json).collect())
            }
            serde_json::Value::Object(map) => PrefValue::Dict(PrefDict::from_json_map(map)),
        }
    }
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<i32> for PrefValue {
    fn from(value: i32) -> Self {
        PrefValue::Integer(value.into())
    }
}

impl From<i64> for PrefValue {
    fn from(value: i64) -> Self {
        PrefValue::Integer(value)
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        PrefValue::String(value.to_string())
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        PrefValue::String(value)
    }
}

impl From<Vec<PrefValue>> for PrefValue {
    fn from(value: Vec<PrefValue>) -> Self {
        PrefValue::List(value)
    }
}

impl From<Vec<&str>> for PrefValue {
    fn from(value: Vec<&str>) -> Self {
        PrefValue::List(value.into_iter().map(PrefValue::from).collect())
    }
}

impl From<PrefDict> for PrefValue {
    fn from(value: PrefDict) -> Self {
        PrefValue::Dict(value)
    }
}

/// Ordered mapping from preference key to value
///
/// Keys iterate in sorted order, so serializing a bag is deterministic.
///
/// # Example
///
/// ```rust
/// use webprefs::PrefDict;
///
/// let mut bag = PrefDict::new();
/// bag.set("sandbox", true);
/// bag.set("guestInstanceId", "7");
///
/// assert_eq!(bag.find_bool("sandbox"), Some(true));
/// assert_eq!(bag.find_integer("guestInstanceId"), Some(7));
/// assert_eq!(bag.find_string("sandbox"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PrefDict {
    entries: BTreeMap<String, PrefValue>,
}

impl PrefDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bag from JSON text; the top level must be an object
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Self::from_json(value)
    }

    /// Read and parse a bag from a JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Convert a JSON value into a bag; the value must be an object
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => Ok(Self::from_json_map(map)),
            serde_json::Value::Null => Err(Error::NotADictionary("null")),
            serde_json::Value::Bool(_) => Err(Error::NotADictionary("boolean")),
            serde_json::Value::Number(_) => Err(Error::NotADictionary("number")),
            serde_json::Value::String(_) => Err(Error::NotADictionary("string")),
            serde_json::Value::Array(_) => Err(Error::NotADictionary("array")),
        }
    }

    fn from_json_map(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter()
            .map(|(key, value)| (key, PrefValue::from_json(value)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&PrefValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite a value, returning the previous one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PrefValue>) -> Option<PrefValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<PrefValue> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Shallow union: every top-level entry of `other` overwrites ours
    pub fn merge(&mut self, other: &PrefDict) {
        for (key, value) in other {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, PrefValue> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn find_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(PrefValue::as_bool)
    }

    pub fn find_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PrefValue::as_str)
    }

    /// Integer lookup that also accepts a string holding a decimal integer
    pub fn find_integer(&self, key: &str) -> Option<i32> {
        match self.get(key)? {
            PrefValue::String(s) => s.parse().ok(),
            value => value.as_i32(),
        }
    }

    pub fn find_list(&self, key: &str) -> Option<&[PrefValue]> {
        self.get(key).and_then(PrefValue::as_list)
    }

    pub fn find_dict(&self, key: &str) -> Option<&PrefDict> {
        self.get(key).and_then(PrefValue::as_dict)
    }

    /// Convert the bag back into a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        fn convert(value: &PrefValue) -> serde_json::Value {
            match value {
                PrefValue::Bool(b) => serde_json::Value::Bool(*b),
                PrefValue::Integer(i) => serde_json::Value::from(*i),
                PrefValue::Double(f) => serde_json::Number::from_f64(*f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
                PrefValue::String(s) => serde_json::Value::String(s.clone()),
                PrefValue::List(items) => {
                    serde_json::Value::Array(items.iter().map(convert).collect())
                }
                PrefValue::Dict(dict) => dict.to_json(),
                PrefValue::Null => serde_json::Value::Null,
            }
        }

        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), convert(value)))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<PrefValue>> FromIterator<(K, V)> for PrefDict {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PrefDict {
    type Item = (&'a String, &'a PrefValue);
    type IntoIter = btree_map::Iter<'a, String, PrefValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
