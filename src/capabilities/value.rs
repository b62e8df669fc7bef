//! Capability values and capability sets.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

// ============================================================================
// CapabilityKind
// ============================================================================

/// Type of a capability value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    /// UTF-8 string.
    String,
    /// Boolean flag.
    Bool,
    /// Signed integer.
    Integer,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Bool => "boolean",
            Self::Integer => "integer",
        };
        f.write_str(name)
    }
}

// ============================================================================
// CapabilityValue
// ============================================================================

/// A single capability value.
///
/// Serialized as a bare JSON string, boolean or integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapabilityValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// UTF-8 string.
    String(String),
}

impl CapabilityValue {
    /// Returns the kind of this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> CapabilityKind {
        match self {
            Self::Bool(_) => CapabilityKind::Bool,
            Self::Integer(_) => CapabilityKind::Integer,
            Self::String(_) => CapabilityKind::String,
        }
    }

    /// Converts a JSON scalar.
    ///
    /// Returns `None` for null, floats, arrays and objects.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n.as_i64().map(Self::Integer),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Returns the string if this is a string value.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the flag if this is a boolean value.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for CapabilityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CapabilityValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for CapabilityValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for CapabilityValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CapabilityValue {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// An unordered set of named capabilities.
///
/// Deserializing fails on the first value that is not a string, boolean or
/// integer, naming its key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Capabilities(FxHashMap<String, CapabilityValue>);

impl<'de> Deserialize<'de> for Capabilities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = FxHashMap::<String, Value>::deserialize(deserializer)?;

        let mut entries = FxHashMap::default();
        for (key, value) in raw {
            let Some(value) = CapabilityValue::from_json(&value) else {
                return Err(de::Error::custom(format!(
                    "capability '{key}' must be a string, boolean or integer"
                )));
            };
            entries.insert(key, value);
        }

        Ok(Self(entries))
    }
}

impl Capabilities {
    /// Creates an empty capability set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CapabilityValue> {
        self.0.get(key)
    }

    /// Returns the string value for `key`.
    ///
    /// Returns `None` if absent or not a string.
    #[inline]
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(CapabilityValue::as_str)
    }

    /// Returns the boolean value for `key`.
    #[inline]
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(CapabilityValue::as_bool)
    }

    /// Returns the integer value for `key`.
    #[inline]
    #[must_use]
    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(CapabilityValue::as_integer)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts a capability, returning the previous value.
    #[inline]
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<CapabilityValue>,
    ) -> Option<CapabilityValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    #[inline]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CapabilityValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the number of capabilities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CapabilityValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the capability names sorted lexicographically.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.0.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Merges `other` in; entries of `other` overwrite.
    pub fn extend(&mut self, other: Capabilities) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: Into<CapabilityValue>> FromIterator<(K, V)> for Capabilities {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
