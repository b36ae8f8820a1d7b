use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use dto_utils::hash::{FixedHashState, HashMap};

use crate::value::Value;

// -----------------------------------------------------------------------------
// Mapping

/// An insertion-ordered, string keyed map.
///
/// Inserting an existing key replaces its value in place, so iteration order
/// is the order in which keys were first seen. Entries live in a `Vec`; a
/// side table maps each key to its index.
///
/// # Examples
///
/// ```
/// use dto_reflect::{Mapping, Value};
///
/// let mut m = Mapping::new();
/// m.insert("b", 1);
/// m.insert("a", 2);
/// m.insert("b", 3);
///
/// let keys: Vec<_> = m.keys().collect();
/// assert_eq!(keys, ["b", "a"]);
/// assert_eq!(m.get("b"), Some(&Value::Int(3)));
/// ```
#[derive(Clone, Default)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
    indices: HashMap<String, usize>,
}

impl Mapping {
    /// Creates an empty mapping.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            indices: HashMap::with_hasher(FixedHashState),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity_and_hasher(capacity, FixedHashState),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn position(&self, key: &str) -> Option<usize> {
        self.indices.get(key).copied()
    }

    /// Inserts `value` under `key`, returning the previous value.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(index) => Some(core::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.indices.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.position(key).map(|index| &mut self.entries[index].1)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.indices.contains_key(key)
    }

    /// Removes `key`, preserving the order of the remaining entries.
    ///
    /// Entries after the removed one are reindexed, so this is linear.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.indices.remove(key)?;
        let (_, value) = self.entries.remove(index);
        for (offset, (key, _)) in self.entries[index..].iter().enumerate() {
            if let Some(slot) = self.indices.get_mut(key.as_str()) {
                *slot = index + offset;
            }
        }
        Some(value)
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consumes the mapping, yielding values in key order.
    pub fn into_values(self) -> impl ExactSizeIterator<Item = Value> {
        self.entries.into_iter().map(|(_, v)| v)
    }
}

impl PartialEq for Mapping {
    /// Order sensitive; the index is derived from the entries.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        mapping.extend(iter);
        mapping
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Mapping {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = alloc::vec::IntoIter<(String, Value)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// -----------------------------------------------------------------------------
// mapping!

/// Builds a [`Mapping`] from `key => value` pairs.
///
/// Values go through [`ToValue`](crate::ToValue), so DTOs, vectors and
/// options can be used directly.
///
/// ```
/// use dto_reflect::{Value, mapping};
///
/// let m = mapping! {
///     "id" => 1,
///     "tags" => ["a", "b"],
///     "child" => mapping! { "id" => 2 },
/// };
/// assert_eq!(m.len(), 3);
/// assert!(matches!(m.get("tags"), Some(Value::Seq(_))));
/// ```
#[macro_export]
macro_rules! mapping {
    () => {
        $crate::value::Mapping::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut mapping = $crate::value::Mapping::new();
        $(
            mapping.insert($key, $crate::value::ToValue::to_value(&$value));
        )+
        mapping
    }};
}
