mod compound;
mod de;
mod list;
mod ser;

pub use compound::Compound;
pub use list::List;

use crate::{ByteArray, IntArray, LongArray, Tag};

/// Value is a complete NBT value. It owns its data. Compounds and Lists are
/// recursively owned, so a value is always a strict tree.
///
/// Values carry no name. A name is a property of where a value sits: the key
/// of a [`Compound`] entry, or the name of a root [`NamedTag`]. Elements of a
/// [`List`] are never named.
///
/// ```
/// # use nbtree::{compound, Value};
/// let player = Value::from(compound! {
///     "XpLevel" => 30,
///     "Dimension" => "minecraft:overworld",
/// });
///
/// match player.as_compound().and_then(|c| c.get("XpLevel")) {
///     Some(Value::Int(level)) => println!("Level: {}", level),
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(ByteArray),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(IntArray),
    LongArray(LongArray),
}

impl Value {
    /// The tag written in front of this value on the wire.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
        }
    }

    /// The default valued instance of a tag: zero, the empty string or an
    /// empty collection. `Tag::End` has no value.
    pub fn default_for(tag: Tag) -> Option<Value> {
        Some(match tag {
            Tag::End => return None,
            Tag::Byte => Value::Byte(0),
            Tag::Short => Value::Short(0),
            Tag::Int => Value::Int(0),
            Tag::Long => Value::Long(0),
            Tag::Float => Value::Float(0.0),
            Tag::Double => Value::Double(0.0),
            Tag::ByteArray => Value::ByteArray(ByteArray::default()),
            Tag::String => Value::String(String::new()),
            Tag::List => Value::List(List::new()),
            Tag::Compound => Value::Compound(Compound::new()),
            Tag::IntArray => Value::IntArray(IntArray::default()),
            Tag::LongArray => Value::LongArray(LongArray::default()),
        })
    }

    /// Whether every list in this tree holds a single kind of element.
    pub fn is_valid(&self) -> bool {
        match self {
            Value::List(list) => list.is_valid() && list.iter().all(Value::is_valid),
            Value::Compound(compound) => compound.values().all(Value::is_valid),
            _ => true,
        }
    }

    pub fn as_i8(&self) -> Option<i8> {
        match *self {
            Value::Byte(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match *self {
            Value::Short(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Any numeric value widened (or truncated, for floats) to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Byte(v) => Some(v as i64),
            Value::Short(v) => Some(v as i64),
            Value::Int(v) => Some(v as i64),
            Value::Long(v) => Some(v),
            Value::Float(v) => Some(v as i64),
            Value::Double(v) => Some(v as i64),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Byte(v) => Some(v as u64),
            Value::Short(v) => Some(v as u64),
            Value::Int(v) => Some(v as u64),
            Value::Long(v) => Some(v as u64),
            Value::Float(v) => Some(v as u64),
            Value::Double(v) => Some(v as u64),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Any numeric value converted to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Byte(v) => Some(v as f64),
            Value::Short(v) => Some(v as f64),
            Value::Int(v) => Some(v as f64),
            Value::Long(v) => Some(v as f64),
            Value::Float(v) => Some(v as f64),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Bytes double as booleans, anything non-zero is true.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Byte(v) => Some(v != 0),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Value::Compound(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&ByteArray> {
        match self {
            Value::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&IntArray> {
        match self {
            Value::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long_array(&self) -> Option<&LongArray> {
        match self {
            Value::LongArray(v) => Some(v),
            _ => None,
        }
    }
}

/// A value together with its name: the root of an NBT document, or a
/// compound entry taken out of its compound.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTag {
    name: String,
    value: Value,
}

impl NamedTag {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn tag(&self) -> Tag {
        self.value.tag()
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }

    /// A copy of this tag under a different name. `self` is left untouched.
    pub fn renamed(&self, name: impl Into<String>) -> NamedTag {
        NamedTag::new(name, self.value.clone())
    }

    /// Rename this tag in place, consuming it.
    pub fn with_name(mut self, name: impl Into<String>) -> NamedTag {
        self.name = name.into();
        self
    }

    /// Compare values only, ignoring names.
    pub fn value_eq(&self, other: &NamedTag) -> bool {
        self.value == other.value
    }
}

impl From<(String, Value)> for NamedTag {
    fn from((name, value): (String, Value)) -> Self {
        Self { name, value }
    }
}

/// Conversion used by the typed getters on [`Compound`]. Conversion only
/// succeeds for the exact matching tag, an `Int` is never returned as an
/// `i64`.
pub trait FromValue<'a>: Sized {
    fn from_value(value: &'a Value) -> Option<Self>;
}

macro_rules! from_value {
    ($type:ty, $method:ident) => {
        impl<'a> FromValue<'a> for $type {
            fn from_value(value: &'a Value) -> Option<Self> {
                value.$method()
            }
        }
    };
}
macro_rules! from_value_ref {
    ($type:ident, $method:ident) => {
        impl<'a> FromValue<'a> for &'a $type {
            fn from_value(value: &'a Value) -> Option<Self> {
                value.$method()
            }
        }
    };
}
from_value!(i8, as_i8);
from_value!(i16, as_i16);
from_value!(i32, as_i32);
from_value!(f32, as_f32);
from_value!(bool, as_bool);
from_value_ref!(str, as_str);
from_value_ref!(Compound, as_compound);
from_value_ref!(List, as_list);
from_value_ref!(ByteArray, as_byte_array);
from_value_ref!(IntArray, as_int_array);
from_value_ref!(LongArray, as_long_array);

impl<'a> FromValue<'a> for i64 {
    fn from_value(value: &'a Value) -> Option<Self> {
        match *value {
            Value::Long(v) => Some(v),
            _ => None,
        }
    }
}

impl<'a> FromValue<'a> for f64 {
    fn from_value(value: &'a Value) -> Option<Self> {
        match *value {
            Value::Double(v) => Some(v),
            _ => None,
        }
    }
}

impl<'a> FromValue<'a> for &'a Value {
    fn from_value(value: &'a Value) -> Option<Self> {
        Some(value)
    }
}

// ------------- From<T> impls -------------

macro_rules! from {
    ($type:ty, $variant:ident $(, $($part:tt)+)?) => {
        impl From<$type> for Value {
            fn from(val: $type) -> Self {
                Self::$variant(val$($($part)+)?)
            }
        }
        impl From<&$type> for Value {
            fn from(val: &$type) -> Self {
                Self::$variant(val.to_owned()$($($part)+)?)
            }
        }
    };
}
from!(i8, Byte);
from!(u8, Byte, as i8);
from!(i16, Short);
from!(u16, Short, as i16);
from!(i32, Int);
from!(u32, Int, as i32);
from!(i64, Long);
from!(u64, Long, as i64);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(ByteArray, ByteArray);
from!(IntArray, IntArray);
from!(LongArray, LongArray);
from!(List, List);
from!(Compound, Compound);

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}

impl From<&bool> for Value {
    fn from(val: &bool) -> Self {
        Self::Byte(i8::from(*val))
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::List(List::from_values(values))
    }
}

impl From<NamedTag> for Value {
    fn from(tag: NamedTag) -> Self {
        tag.value
    }
}

// ------------- PartialEq against primitives -------------

fn eq_i64(value: &Value, other: i64) -> bool {
    value.as_i64().map_or(false, |i| i == other)
}

fn eq_u64(value: &Value, other: u64) -> bool {
    value.as_u64().map_or(false, |i| i == other)
}

fn eq_f64(value: &Value, other: f64) -> bool {
    value.as_f64().map_or(false, |i| i == other)
}

fn eq_str(value: &Value, other: &str) -> bool {
    value.as_str().map_or(false, |i| i == other)
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        eq_str(self, other)
    }
}

impl<'a> PartialEq<&'a str> for Value {
    fn eq(&self, other: &&str) -> bool {
        eq_str(self, other)
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        eq_str(other, self)
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        eq_str(self, other.as_str())
    }
}

macro_rules! partialeq_numeric {
    ($($eq:ident [$($ty:ty)*])*) => {
        $($(
            impl PartialEq<$ty> for Value {
                fn eq(&self, other: &$ty) -> bool {
                    $eq(self, *other as _)
                }
            }

            impl PartialEq<Value> for $ty {
                fn eq(&self, other: &Value) -> bool {
                    $eq(other, *self as _)
                }
            }
        )*)*
    }
}

partialeq_numeric! {
    eq_i64[i8 i16 i32 i64]
    eq_u64[u8 u16 u32 u64]
    eq_f64[f32 f64]
}

#[cfg(feature = "arbitrary1")]
impl<'a> arbitrary::Arbitrary<'a> for Value {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        use Value::*;

        Ok(match u.arbitrary::<Tag>()? {
            Tag::End => return Err(arbitrary::Error::IncorrectFormat),
            Tag::Byte => Byte(u.arbitrary()?),
            Tag::Short => Short(u.arbitrary()?),
            Tag::Int => Int(u.arbitrary()?),
            Tag::Long => Long(u.arbitrary()?),
            Tag::Float => Float(u.arbitrary()?),
            Tag::Double => Double(u.arbitrary()?),
            Tag::ByteArray => ByteArray(u.arbitrary()?),
            Tag::String => String(u.arbitrary()?),
            Tag::List => List(u.arbitrary()?),
            Tag::Compound => Compound(u.arbitrary()?),
            Tag::IntArray => IntArray(u.arbitrary()?),
            Tag::LongArray => LongArray(u.arbitrary()?),
        })
    }
}
