//! Parse the stringified NBT notation into [`nbtree::Value`]s.
//!
//! This is the inverse of the `Display` impl of `Value`:
//!
//! ```
//! use nbtree::{compound, Value};
//!
//! let value = Value::from(compound! { "name" => "Steve", "XpLevel" => 30 });
//! let text = value.to_string();
//!
//! assert_eq!(text, r#"{name:"Steve",XpLevel:30}"#);
//! assert_eq!(nbtree_snbt::parse(&text), Some(value));
//! ```
//!
//! Parsing is all or nothing. Empty input, or input that is not a single
//! complete value, gives `None`.
//!
//! A few things do not survive a trip through text. A list of ints or longs
//! is written as `[1,2]` and read back as an int or long array, and floats
//! that are not finite are written as words and read back as strings.

mod parser;

#[cfg(test)]
mod test;

use nbtree::Value;

/// Parse a complete value. Whitespace around the value and between tokens is
/// ignored.
pub fn parse(text: &str) -> Option<Value> {
    parser::parse_complete(text)
}
