use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// The three NBT array types only differ in their element type, so they share
// one definition.
macro_rules! nbt_array {
    ($(#[$meta:meta])* $name:ident, $elem:ty) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
        #[serde(transparent)]
        pub struct $name {
            data: Vec<$elem>,
        }

        impl $name {
            pub fn new(data: Vec<$elem>) -> Self {
                Self { data }
            }

            pub fn into_inner(self) -> Vec<$elem> {
                self.data
            }

            /// Get the element at `index`.
            pub fn get(&self, index: usize) -> Result<$elem> {
                self.data
                    .get(index)
                    .copied()
                    .ok_or_else(|| Error::index_out_of_range(index, self.data.len()))
            }

            /// Replace the element at `index`, returning the previous element.
            pub fn set(&mut self, index: usize, value: $elem) -> Result<$elem> {
                let len = self.data.len();
                match self.data.get_mut(index) {
                    Some(slot) => Ok(std::mem::replace(slot, value)),
                    None => Err(Error::index_out_of_range(index, len)),
                }
            }

            /// Remove the element at `index`, shifting later elements down.
            pub fn remove(&mut self, index: usize) -> Result<$elem> {
                if index < self.data.len() {
                    Ok(self.data.remove(index))
                } else {
                    Err(Error::index_out_of_range(index, self.data.len()))
                }
            }

            pub fn push(&mut self, value: $elem) {
                self.data.push(value);
            }

            pub fn extend_from_slice(&mut self, values: &[$elem]) {
                self.data.extend_from_slice(values);
            }

            /// Append every element of `other` to the end of this array.
            pub fn append(&mut self, other: &$name) {
                self.data.extend_from_slice(&other.data);
            }
        }

        impl Deref for $name {
            type Target = [$elem];

            fn deref(&self) -> &Self::Target {
                &self.data
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.data
            }
        }

        impl From<Vec<$elem>> for $name {
            fn from(data: Vec<$elem>) -> Self {
                Self::new(data)
            }
        }

        impl From<&[$elem]> for $name {
            fn from(data: &[$elem]) -> Self {
                Self::new(data.to_vec())
            }
        }

        impl FromIterator<$elem> for $name {
            fn from_iter<I: IntoIterator<Item = $elem>>(iter: I) -> Self {
                Self::new(iter.into_iter().collect())
            }
        }

        impl IntoIterator for $name {
            type Item = $elem;
            type IntoIter = std::vec::IntoIter<$elem>;

            fn into_iter(self) -> Self::IntoIter {
                self.data.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $elem;
            type IntoIter = std::slice::Iter<'a, $elem>;

            fn into_iter(self) -> Self::IntoIter {
                self.data.iter()
            }
        }

        impl PartialEq<[$elem]> for $name {
            fn eq(&self, other: &[$elem]) -> bool {
                self.data.as_slice() == other
            }
        }

        impl PartialEq<&[$elem]> for $name {
            fn eq(&self, other: &&[$elem]) -> bool {
                self.data.as_slice() == *other
            }
        }

        impl PartialEq<Vec<$elem>> for $name {
            fn eq(&self, other: &Vec<$elem>) -> bool {
                &self.data == other
            }
        }

        impl<const N: usize> PartialEq<[$elem; N]> for $name {
            fn eq(&self, other: &[$elem; N]) -> bool {
                self.data.as_slice() == other.as_slice()
            }
        }
    };
}

nbt_array!(
    /// An NBT byte array, the payload of [`Tag::ByteArray`][crate::Tag::ByteArray].
    ByteArray,
    i8
);

nbt_array!(
    /// An NBT int array, the payload of [`Tag::IntArray`][crate::Tag::IntArray].
    IntArray,
    i32
);

nbt_array!(
    /// An NBT long array, the payload of [`Tag::LongArray`][crate::Tag::LongArray].
    LongArray,
    i64
);

impl ByteArray {
    /// Create a byte array from unsigned bytes, reinterpreting each as `i8`.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::new(data.iter().map(|b| *b as i8).collect())
    }

    /// The contents as unsigned bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.iter().map(|b| *b as u8).collect()
    }
}
