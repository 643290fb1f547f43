//! Ordered key/value pairs attached to log records.

use crate::error::LogError;
use serde_json::Value;

/// Ordered sequence of key/value pairs.
///
/// Duplicate keys are kept as-is; they collapse last-write-wins only when a
/// record is encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValues(Vec<(Box<str>, Value)>);

impl KeyValues {
    /// Create an empty pair list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Create an empty pair list with room for `capacity` pairs.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Build pairs from a raw alternating `key, value, key, value, ...` list.
    ///
    /// String keys are used verbatim; any other key is rendered as its JSON
    /// text. An odd-length list is rejected.
    pub fn from_alternating(items: Vec<Value>) -> Result<Self, LogError> {
        if items.len() % 2 != 0 {
            return Err(LogError::OddKeyValues { len: items.len() });
        }

        let mut pairs = Self::with_capacity(items.len() / 2);
        let mut items = items.into_iter();
        while let (Some(key), Some(value)) = (items.next(), items.next()) {
            let key = match key {
                Value::String(key) => key,
                other => other.to_string(),
            };
            pairs.push(key, value);
        }
        Ok(pairs)
    }

    /// Append a pair.
    pub fn push(&mut self, key: impl Into<Box<str>>, value: impl Into<Value>) {
        self.0.push((key.into(), value.into()));
    }

    /// Append a pair, builder style.
    #[must_use]
    pub fn and(mut self, key: impl Into<Box<str>>, value: impl Into<Value>) -> Self {
        self.push(key, value);
        self
    }

    /// Append every pair of `other`, preserving order.
    pub fn extend_from(&mut self, other: &Self) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Number of pairs, duplicates included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no pairs are present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value a key resolves to under last-write-wins.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<&Value> {
        self.0
            .iter()
            .rev()
            .find(|(candidate, _)| candidate.as_ref() == key)
            .map(|(_, value)| value)
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_ref(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for KeyValues
where
    K: Into<Box<str>>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut pairs = Self::new();
        pairs.extend(iter);
        pairs
    }
}

impl<K, V> Extend<(K, V)> for KeyValues
where
    K: Into<Box<str>>,
    V: Into<Value>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}

impl IntoIterator for KeyValues {
    type Item = (Box<str>, Value);
    type IntoIter = std::vec::IntoIter<(Box<str>, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Build [`KeyValues`] from `key => value` pairs.
///
/// ```
/// use kvlog_ports::kv;
///
/// let pairs = kv!["foo" => "bar", "retries" => 3];
/// assert_eq!(pairs.len(), 2);
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        $crate::KeyValues::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut pairs = $crate::KeyValues::new();
        $( pairs.push($key, $value); )+
        pairs
    }};
}
