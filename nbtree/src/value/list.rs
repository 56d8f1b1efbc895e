use std::ops::Index;

use crate::error::{Error, Result};
use crate::{NamedTag, Tag, Value};

/// An NBT list: an ordered sequence of unnamed values sharing one tag.
///
/// The element tag is stored rather than derived from the contents. It is set
/// by the first element, by [`List::with_kind`], or by the decoder, and it
/// survives removing every element.
///
/// Construction through [`List::from_values`] is permissive and may produce
/// a list mixing tags, check [`List::is_valid`] when that matters. [`push`]
/// and [`set`] refuse values of the wrong tag, and the encoder refuses to
/// write an invalid list.
///
/// [`push`]: List::push
/// [`set`]: List::set
#[derive(Debug, Clone, Default)]
pub struct List {
    kind: Option<Tag>,
    items: Vec<Value>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty list that remembers its element tag. `Tag::End` leaves the
    /// element tag unset.
    pub fn with_kind(kind: Tag) -> Self {
        Self {
            kind: (kind != Tag::End).then_some(kind),
            items: Vec::new(),
        }
    }

    /// Build a list without checking the elements share a tag. The element
    /// tag is taken from the first value.
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let items: Vec<Value> = values.into_iter().collect();
        Self {
            kind: items.first().map(Value::tag),
            items,
        }
    }

    /// Build a list from named tags, dropping their names.
    pub fn from_tags(tags: impl IntoIterator<Item = NamedTag>) -> Self {
        Self::from_values(tags.into_iter().map(NamedTag::into_value))
    }

    /// The element tag, if one has been established.
    pub fn kind(&self) -> Option<Tag> {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether every element has the element tag of the list.
    pub fn is_valid(&self) -> bool {
        self.first_mismatch().is_none()
    }

    pub(crate) fn first_mismatch(&self) -> Option<(Tag, Tag)> {
        let kind = self.kind?;
        self.items
            .iter()
            .map(Value::tag)
            .find(|t| *t != kind)
            .map(|found| (kind, found))
    }

    /// Append a value. An empty list adopts the tag of the value, otherwise
    /// the tag must match.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let tag = value.tag();
        match self.kind {
            Some(kind) if kind != tag && !self.items.is_empty() => {
                Err(Error::kind_mismatch(kind, tag))
            }
            _ => {
                self.kind = Some(tag);
                self.items.push(value);
                Ok(())
            }
        }
    }

    /// Append a named tag, dropping its name.
    pub fn push_tag(&mut self, tag: NamedTag) -> Result<()> {
        self.push(tag.into_value())
    }

    // Decoder only: the element tag has already been fixed by the wire.
    pub(crate) fn push_unchecked(&mut self, value: Value) {
        self.items.push(value);
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    pub fn get(&self, index: usize) -> Result<&Value> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, len))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Value> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_range(index, len))
    }

    /// Replace the element at `index`, returning the previous element. The
    /// new value must have the element tag of the list.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Value> {
        let value = value.into();
        let len = self.items.len();
        if index >= len {
            return Err(Error::index_out_of_range(index, len));
        }
        if let Some(kind) = self.kind {
            if kind != value.tag() {
                return Err(Error::kind_mismatch(kind, value.tag()));
            }
        }
        Ok(std::mem::replace(&mut self.items[index], value))
    }

    /// Remove the element at `index`. The element tag is kept even when the
    /// list becomes empty.
    pub fn remove(&mut self, index: usize) -> Result<Value> {
        let len = self.items.len();
        if index < len {
            Ok(self.items.remove(index))
        } else {
            Err(Error::index_out_of_range(index, len))
        }
    }

    /// A new list holding the elements of `self` followed by those of
    /// `other`. The result is not validated.
    pub fn concat(&self, other: &List) -> List {
        let mut list = List::from_values(self.items.iter().chain(other.items.iter()).cloned());
        if list.kind.is_none() {
            list.kind = self.kind.or(other.kind);
        }
        list
    }

    /// Remove every element, keeping the element tag.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Mutable access to the elements. Changing the tag of an element makes
    /// the list invalid.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Value> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn into_values(self) -> Vec<Value> {
        self.items
    }
}

/// Element-wise and order dependent. The stored element tag is not
/// compared, so two empty lists are always equal.
impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        List::from_values(iter)
    }
}

impl From<Vec<Value>> for List {
    fn from(values: Vec<Value>) -> Self {
        List::from_values(values)
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Index<usize> for List {
    type Output = Value;

    /// Panics when out of range, use [`List::get`] otherwise.
    fn index(&self, index: usize) -> &Value {
        &self.items[index]
    }
}

#[cfg(feature = "arbitrary1")]
fn het_list<'a, T, F>(u: &mut arbitrary::Unstructured<'a>, f: F) -> arbitrary::Result<Vec<Value>>
where
    F: FnMut(T) -> Value,
    T: arbitrary::Arbitrary<'a>,
{
    Ok(u.arbitrary_iter::<T>()?
        .collect::<arbitrary::Result<Vec<_>>>()?
        .into_iter()
        .map(f)
        .collect())
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for List {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        use Value::*;

        // Lists need to all be the same type.
        let tag = u.arbitrary::<Tag>()?;
        let values = match tag {
            Tag::End => return Ok(List::new()),
            Tag::Byte => het_list(u, Byte)?,
            Tag::Short => het_list(u, Short)?,
            Tag::Int => het_list(u, Int)?,
            Tag::Long => het_list(u, Long)?,
            Tag::Float => het_list(u, Float)?,
            Tag::Double => het_list(u, Double)?,
            Tag::ByteArray => het_list(u, ByteArray)?,
            Tag::String => het_list(u, String)?,
            Tag::List => het_list(u, List)?,
            Tag::Compound => het_list(u, Compound)?,
            Tag::IntArray => het_list(u, IntArray)?,
            Tag::LongArray => het_list(u, LongArray)?,
        };
        let mut list = List::with_kind(tag);
        for value in values {
            list.push_unchecked(value);
        }
        Ok(list)
    }
}
