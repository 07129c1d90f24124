use indexmap::IndexMap;

use super::Value;
use crate::error::{Error, Result};
use crate::Tag;

/// The payload of a Compound tag: uniquely named children, kept in the order
/// they were first inserted. Replacing an existing key keeps its position, so
/// a decoded document encodes back with the same key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    map: IndexMap<String, Value>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    // Only the path navigator hands out mutable access, and only to walk to
    // the container it is about to replace a child in.
    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.map.get_mut(key)
    }

    /// Build a compound from key/value pairs, in order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self>
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut compound = Compound::new();
        for (k, v) in pairs {
            compound.insert(k, v)?;
        }
        Ok(compound)
    }

    /// Set `key` to `value`. An existing key is replaced in place and the old
    /// value returned; a new key is appended at the end. End tags only close
    /// compounds, so they are rejected as values.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let value = value.into();
        if value.tag() == Tag::End {
            return Err(Error::bespoke("End tags cannot be compound children"));
        }
        Ok(self.map.insert(key.into(), value))
    }

    /// Remove `key`, keeping the order of the remaining children.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.map.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }
}
