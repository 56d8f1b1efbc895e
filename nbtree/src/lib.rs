//! nbtree is a library for the Named Binary Tag (NBT) format. NBT is the
//! typed, tree shaped binary format Minecraft uses to store levels, entities
//! and inventories, and to send the same data over the network.
//!
//! * For the tag tree see [`Value`], [`NamedTag`], [`Compound`] and [`List`].
//! * For NBT array types see [`ByteArray`], [`IntArray`], and [`LongArray`].
//! * For the binary codecs see [`stream`] and the [`Flavor`] of encoding.
//! * For conversion to and from `serde_json::Value` see [`json`].
//! * For compressed files and the pocket header see [`container`].
//!
//! The text notation is rendered by the `Display` impl of [`Value`]. Parsing
//! text lives in the companion `nbtree-snbt` crate.
//!
//! # Quick example
//!
//! ```
//! use nbtree::{compound, Flavor, NamedTag, Value};
//!
//! let level = NamedTag::new(
//!     "Level",
//!     compound! {
//!         "hardcore" => true,
//!         "spawnY" => 64,
//!         "name" => "world",
//!     },
//! );
//!
//! let bytes = nbtree::to_bytes(&level, Flavor::BigEndian).unwrap();
//! let back = nbtree::from_bytes(&bytes, Flavor::BigEndian).unwrap();
//!
//! assert_eq!(back, Some(level));
//! ```
//!
//! # Truncated input
//!
//! Decoding is lenient by default: reading past the end of the input yields
//! zero bytes rather than an error, which is what historic data in the wild
//! relies on. Use [`DecodeOpts::strict`] to turn truncation into an error.

pub mod container;
pub mod error;
pub mod json;
pub mod stream;

mod arrays;
mod macros;
mod text;
mod value;

pub use arrays::*;
pub use stream::{
    from_bytes, from_bytes_nameless, from_bytes_with_opts, to_bytes, to_bytes_nameless,
    DecodeOpts, Decoder, Encoder, Flavor,
};
pub use value::*;

#[cfg(test)]
mod test;

use std::convert::TryFrom;
use std::fmt;

/// An NBT tag. This does not carry the value or the name of the data, it is
/// the kind id written in front of every value on the wire.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other values, all elements share one tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

// The tags will very rarely change so writing these out by hand is not a
// burden, and it keeps the dispatch table in one visible place.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 3,
            Tag::Long => 4,
            Tag::Float => 5,
            Tag::Double => 6,
            Tag::ByteArray => 7,
            Tag::String => 8,
            Tag::List => 9,
            Tag::Compound => 10,
            Tag::IntArray => 11,
            Tag::LongArray => 12,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tag::End => "TAG_End",
            Tag::Byte => "TAG_Byte",
            Tag::Short => "TAG_Short",
            Tag::Int => "TAG_Int",
            Tag::Long => "TAG_Long",
            Tag::Float => "TAG_Float",
            Tag::Double => "TAG_Double",
            Tag::ByteArray => "TAG_Byte_Array",
            Tag::String => "TAG_String",
            Tag::List => "TAG_List",
            Tag::Compound => "TAG_Compound",
            Tag::IntArray => "TAG_Int_Array",
            Tag::LongArray => "TAG_Long_Array",
        };
        f.write_str(name)
    }
}
