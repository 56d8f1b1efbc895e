//! Conversion between NBT values and `serde_json::Value`.
//!
//! The conversion keeps structure but loses tag distinctions JSON cannot
//! express. Going to JSON every integer becomes a number and every array or
//! list becomes an array. Coming back from JSON
//!
//! * integers become `Long`, unsigned ones past `i64::MAX` wrapping around,
//! * floats become `Double`,
//! * booleans become `Byte` 1 or 0,
//! * arrays become lists, objects become compounds,
//! * `null` produces no value, and is dropped from arrays and objects.
//!
//! So a list of ints comes back as a list of longs, and stays a list of
//! longs on every round trip after that.
//!
//! ```
//! use nbtree::{json, list, Value};
//! use serde_json::json;
//!
//! let ints = Value::from(list![1, 2, 3]);
//! assert_eq!(json::to_json(Some(&ints)), json!([1, 2, 3]));
//!
//! let longs = json::from_json(&json!([1, 2, 3])).unwrap();
//! assert_eq!(longs, Value::from(list![1i64, 2i64, 3i64]));
//! ```

use serde::Deserialize;

use crate::{NamedTag, Value};

/// Convert a value to JSON. `None` is `null`. Floats that are not finite
/// become `null` too, as JSON has no representation for them.
pub fn to_json(value: Option<&Value>) -> serde_json::Value {
    match value {
        Some(value) => serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
        None => serde_json::Value::Null,
    }
}

/// Convert JSON to a value. `null` gives `None`.
pub fn from_json(json: &serde_json::Value) -> Option<Value> {
    Option::<Value>::deserialize(json).ok().flatten()
}

impl Value {
    pub fn to_json(&self) -> serde_json::Value {
        to_json(Some(self))
    }

    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        from_json(json)
    }
}

impl NamedTag {
    /// The value of this tag as JSON. The name is not included.
    pub fn to_json(&self) -> serde_json::Value {
        to_json(Some(self.value()))
    }
}
