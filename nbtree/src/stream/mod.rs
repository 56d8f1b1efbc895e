//! Binary encoding and decoding of NBT.
//!
//! Every [`Flavor`] shares the same structure. A tag is written as
//!
//! ```text
//! byte(tag) [string(name)] payload
//! ```
//!
//! where the name is only present for named tags. A compound payload is a
//! sequence of named tags closed by a lone `byte(0)`, a list payload is
//! `byte(element tag) length(count)` followed by `count` payloads.
//!
//! The flavors differ in how primitives are laid out:
//!
//! * [`Flavor::BigEndian`]: Java edition files. Fixed-width big endian
//!   numbers, `u16` string lengths and `u32` collection lengths.
//! * [`Flavor::LittleEndian`]: Bedrock edition files. The same with little
//!   endian numbers.
//! * [`Flavor::Network`]: Bedrock edition network protocol. Little endian,
//!   except that ints and every length are unsigned base-128 varints.
//!
//! ```
//! use nbtree::{compound, Flavor, NamedTag};
//!
//! let root = NamedTag::new("", compound! { "a" => 1i8 });
//! let bytes = nbtree::to_bytes(&root, Flavor::BigEndian).unwrap();
//!
//! assert_eq!(bytes, [10, 0, 0, 1, 0, 1, b'a', 1, 0]);
//! ```

mod read;
mod varint;
mod write;

pub use read::Decoder;
pub use write::Encoder;

use crate::error::Result;
use crate::{NamedTag, Value};

/// Default for [`DecodeOpts::max_depth`]. An [`Encoder`] refuses trees
/// nested deeper than this, so whatever it writes decodes with default
/// options.
pub const MAX_DEPTH: usize = 512;

/// Default for [`DecodeOpts::max_seq_len`], and the longest string, array
/// or list an [`Encoder`] writes.
pub const MAX_SEQ_LEN: usize = 1 << 24;

/// The primitive encoding used by a [`Decoder`] or [`Encoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    #[default]
    BigEndian,
    LittleEndian,
    Network,
}

/// Options for decoding NBT.
///
/// ```
/// # use nbtree::DecodeOpts;
/// let opts = DecodeOpts::new().strict(true).max_depth(64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOpts {
    pub(crate) strict: bool,
    pub(crate) max_depth: usize,
    pub(crate) max_seq_len: usize,
}

impl DecodeOpts {
    pub fn new() -> Self {
        Self {
            strict: false,
            max_depth: MAX_DEPTH,
            max_seq_len: MAX_SEQ_LEN,
        }
    }

    /// Treat running out of input as an error. By default missing bytes
    /// read as zero.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Maximum nesting of compounds and lists. Defaults to 512.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Maximum length of any single string, array or list read from the
    /// input. Defaults to 2^24.
    pub fn max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }
}

impl Default for DecodeOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a named root tag.
pub fn to_bytes(tag: &NamedTag, flavor: Flavor) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(Vec::new(), flavor);
    encoder.write_tag(tag)?;
    Ok(encoder.into_inner())
}

/// Encode a root value without a name.
pub fn to_bytes_nameless(value: &Value, flavor: Flavor) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(Vec::new(), flavor);
    encoder.write_nameless(value)?;
    Ok(encoder.into_inner())
}

/// Decode a named root tag. Returns `None` if the input starts with an end
/// tag or an unknown tag.
pub fn from_bytes(data: &[u8], flavor: Flavor) -> Result<Option<NamedTag>> {
    from_bytes_with_opts(data, flavor, DecodeOpts::default())
}

pub fn from_bytes_with_opts(
    data: &[u8],
    flavor: Flavor,
    opts: DecodeOpts,
) -> Result<Option<NamedTag>> {
    Decoder::with_opts(data, flavor, opts).read_tag()
}

/// Decode a root value that was written without a name.
pub fn from_bytes_nameless(data: &[u8], flavor: Flavor) -> Result<Option<Value>> {
    Decoder::new(data, flavor).read_nameless_tag()
}
