use std::ops::Index;

use indexmap::IndexMap;

use crate::{NamedTag, Tag, Value};

use super::FromValue;

/// An NBT compound: a mapping from unique names to values.
///
/// Iteration follows insertion order. Replacing the value of an existing
/// name keeps its position.
///
/// Equality ignores order: two compounds are equal when they hold the same
/// set of name and value pairs.
///
/// ```
/// # use nbtree::{Compound, Value};
/// let mut pos = Compound::new();
/// pos.set("x", 1.5);
/// pos.set("y", 64.0);
/// pos.set("x", 2.5);
///
/// assert_eq!(pos.names().collect::<Vec<_>>(), ["x", "y"]);
/// assert_eq!(pos.get_as::<f64>("x"), Some(2.5));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    entries: IndexMap<String, Value>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Build a compound from already named tags. When a name is given more
    /// than once the first occurrence is kept.
    pub fn from_tags(tags: impl IntoIterator<Item = NamedTag>) -> Self {
        let mut compound = Self::new();
        for tag in tags {
            compound.insert_tag_if_absent(tag);
        }
        compound
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Whether `name` is present and holds a value of the given tag.
    pub fn contains_kind(&self, name: &str, tag: Tag) -> bool {
        self.get(name).map_or(false, |v| v.tag() == tag)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.entries.get_mut(name)
    }

    /// Get the value of `name` as a `T`. Returns `None` when the name is
    /// absent or holds a different tag.
    ///
    /// ```
    /// # use nbtree::{compound, Compound};
    /// let c = compound! { "Health" => 20.0f32, "id" => "zombie" };
    ///
    /// assert_eq!(c.get_as::<f32>("Health"), Some(20.0));
    /// assert_eq!(c.get_as::<&str>("id"), Some("zombie"));
    /// assert_eq!(c.get_as::<i32>("id"), None);
    /// ```
    pub fn get_as<'a, T: FromValue<'a>>(&'a self, name: &str) -> Option<T> {
        self.get(name).and_then(T::from_value)
    }

    /// Like [`get_as`][Compound::get_as], falling back to `default`.
    pub fn get_or<'a, T: FromValue<'a>>(&'a self, name: &str, default: T) -> T {
        self.get_as(name).unwrap_or(default)
    }

    /// Set `name` to `value`. An existing entry is replaced in place and its
    /// previous value returned, a new name is appended.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    /// Set `name` only if it is not present yet. Returns whether the value
    /// was inserted.
    pub fn set_if_absent(&mut self, name: impl Into<String>, value: impl Into<Value>) -> bool {
        match self.entries.entry(name.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(value.into());
                true
            }
        }
    }

    /// Insert a named tag under its own name, replacing any existing entry.
    pub fn insert_tag(&mut self, tag: NamedTag) -> Option<Value> {
        let (name, value) = tag.into_parts();
        self.set(name, value)
    }

    pub fn insert_tag_if_absent(&mut self, tag: NamedTag) -> bool {
        let (name, value) = tag.into_parts();
        self.set_if_absent(name, value)
    }

    /// Remove `name`, keeping the order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.shift_remove(name)
    }

    /// Take `name` out of the compound as a named tag.
    pub fn remove_tag(&mut self, name: &str) -> Option<NamedTag> {
        self.entries
            .shift_remove_entry(name)
            .map(|(name, value)| NamedTag::new(name, value))
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.entries.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn entries(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> + '_ {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// The entries as named tags, in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = NamedTag> + '_ {
        self.entries
            .iter()
            .map(|(k, v)| NamedTag::new(k.clone(), v.clone()))
    }

    /// A copy of this compound that shares no state with it.
    pub fn dup(&self) -> Compound {
        self.clone()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Compound {
    /// Collect entries, keeping the first value of repeated names.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut compound = Compound::new();
        for (k, v) in iter {
            compound.set_if_absent(k, v);
        }
        compound
    }
}

impl FromIterator<NamedTag> for Compound {
    fn from_iter<I: IntoIterator<Item = NamedTag>>(iter: I) -> Self {
        Compound::from_tags(iter)
    }
}

impl IntoIterator for Compound {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Index<&str> for Compound {
    type Output = Value;

    /// Panics if `name` is not present, use [`Compound::get`] otherwise.
    fn index(&self, name: &str) -> &Value {
        match self.entries.get(name) {
            Some(v) => v,
            None => panic!("no entry named {:?} in compound", name),
        }
    }
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Compound {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let entries: Vec<(String, Value)> = u.arbitrary()?;
        Ok(entries.into_iter().collect())
    }
}
