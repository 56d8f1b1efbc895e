//! Text rendering of values, in the stringified NBT notation.
//!
//! Output is deterministic and compact: no whitespace, compound entries in
//! insertion order, numbers suffixed by their tag.
//!
//! | tag | example |
//! |-----|---------|
//! | byte | `1b` |
//! | short | `1s` |
//! | int | `1` |
//! | long | `1L` |
//! | float | `1.5f` |
//! | double | `1.5d` |
//! | string | `"text"` |
//! | byte array | `[B;1b,2b]` |
//! | int array | `[I;1,2]` |
//! | long array | `[L;1L,2L]` |
//! | list | `[a,b]` |
//! | compound | `{name:value}` |
use std::fmt::{self, Display, Formatter, Write};

use crate::{Compound, List, NamedTag, Value};

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(v) => write!(f, "{}b", v),
            Value::Short(v) => write!(f, "{}s", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}L", v),
            Value::Float(v) => write!(f, "{:?}f", v),
            Value::Double(v) => write!(f, "{:?}d", v),
            Value::String(v) => write_quoted(f, v),
            Value::ByteArray(v) => write_array(f, "B", v.iter().map(|b| format!("{}b", b))),
            Value::IntArray(v) => write_array(f, "I", v.iter().map(|i| i.to_string())),
            Value::LongArray(v) => write_array(f, "L", v.iter().map(|l| format!("{}L", l))),
            Value::List(v) => v.fmt(f),
            Value::Compound(v) => v.fmt(f),
        }
    }
}

impl Display for List {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            value.fmt(f)?;
        }
        f.write_char(']')
    }
}

impl Display for Compound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write_name(f, name)?;
            f.write_char(':')?;
            value.fmt(f)?;
        }
        f.write_char('}')
    }
}

/// A named tag renders as a single entry compound.
impl Display for NamedTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        write_name(f, self.name())?;
        f.write_char(':')?;
        self.value().fmt(f)?;
        f.write_char('}')
    }
}

/// Characters allowed in an unquoted word.
fn is_bare_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
}

fn write_name(f: &mut Formatter<'_>, name: &str) -> fmt::Result {
    if !name.is_empty() && name.chars().all(is_bare_char) {
        f.write_str(name)
    } else {
        write_quoted(f, name)
    }
}

fn write_quoted(f: &mut Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        if c == '"' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}

fn write_array(
    f: &mut Formatter<'_>,
    prefix: &str,
    items: impl Iterator<Item = String>,
) -> fmt::Result {
    write!(f, "[{};", prefix)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        f.write_str(&item)?;
    }
    f.write_char(']')
}
