//! Generic field map produced from E-utilities JSON and XML bodies
//!
//! Both body formats are reduced to the same shape so record construction does
//! not care which one was requested. Keys are lower-cased: the XML tag
//! `ScientificName` and the JSON key `scientificname` are the same field.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// A single parsed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<FieldValue>),
    Record(FieldMap),
}

impl FieldValue {
    /// The value as text, if it is a plain text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a nested record, if it is one
    pub fn as_record(&self) -> Option<&FieldMap> {
        match self {
            FieldValue::Record(map) => Some(map),
            _ => None,
        }
    }

    /// All text leaves under this value, in document order
    ///
    /// A record contributes the leaves of its values, which lets an XML
    /// `<IdList><Id>1</Id><Id>2</Id></IdList>` flatten the same way as the JSON
    /// `"idlist": ["1", "2"]`.
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts(&self, out: &mut Vec<String>) {
        match self {
            FieldValue::Text(s) => out.push(s.clone()),
            FieldValue::List(items) => items.iter().for_each(|item| item.collect_texts(out)),
            FieldValue::Record(map) => map.values().for_each(|value| value.collect_texts(out)),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// Parsed fields of one E-utilities record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<String, FieldValue>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value
    pub fn insert<K: AsRef<str>, V: Into<FieldValue>>(&mut self, key: K, value: V) {
        self.0.insert(key.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Add a field; a repeated key turns the existing value into a list
    pub fn push<K: AsRef<str>, V: Into<FieldValue>>(&mut self, key: K, value: V) {
        let value = value.into();
        match self.0.entry(key.as_ref().to_ascii_lowercase()) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(value);
            }
            btree_map::Entry::Occupied(mut entry) => match entry.get_mut() {
                FieldValue::List(items) => items.push(value),
                existing => {
                    let first = std::mem::replace(existing, FieldValue::List(Vec::new()));
                    *existing = FieldValue::List(vec![first, value]);
                }
            },
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Text value of `key`, or an empty string when absent or not text
    pub fn text(&self, key: &str) -> String {
        self.get(key)
            .and_then(FieldValue::as_text)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }

    /// All text leaves under `key`, or an empty list when absent
    pub fn texts(&self, key: &str) -> Vec<String> {
        self.get(key).map(FieldValue::texts).unwrap_or_default()
    }

    /// Non-negative integer value of `key`; absent or invalid input is zero
    pub fn count(&self, key: &str) -> u64 {
        self.text(key).parse().unwrap_or(0)
    }

    /// Nested record under `key`
    pub fn record(&self, key: &str) -> Option<&FieldMap> {
        self.get(key).and_then(FieldValue::as_record)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.0.values()
    }
}

impl From<FieldMap> for FieldValue {
    fn from(map: FieldMap) -> Self {
        FieldValue::Record(map)
    }
}

impl<K: AsRef<str>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
