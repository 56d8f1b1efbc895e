//! Shared plumbing for the command line tools: reading and writing whole
//! documents in any of the supported formats.
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

use log::debug;
use nbtree::container::{self, Compression, Envelope};
use nbtree::{json, Flavor, NamedTag};

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

#[derive(Debug)]
pub struct ErrorMessage(pub String);
impl std::error::Error for ErrorMessage {}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn fail<T>(msg: impl Into<String>) -> Result<T> {
    Err(Box::new(ErrorMessage(msg.into())))
}

pub const FLAVORS: &[&str] = &["big", "little", "network"];
pub const FORMATS: &[&str] = &["snbt", "json", "nbt"];

pub fn parse_flavor(s: &str) -> Result<Flavor> {
    match s {
        "big" => Ok(Flavor::BigEndian),
        "little" => Ok(Flavor::LittleEndian),
        "network" => Ok(Flavor::Network),
        _ => fail(format!("unknown flavor: {}", s)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Snbt,
    Json,
    Nbt,
}

impl FromStr for Format {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "snbt" => Ok(Format::Snbt),
            "json" => Ok(Format::Json),
            "nbt" => Ok(Format::Nbt),
            _ => fail(format!("unknown format: {}", s)),
        }
    }
}

/// Read a document. Text formats have no root name, so they produce a tag
/// with an empty name.
pub fn decode(data: &[u8], format: Format, flavor: Flavor) -> Result<NamedTag> {
    match format {
        Format::Nbt => {
            let (envelope, tag) = container::read(data, flavor)?;
            debug!(
                "read {} bytes, {:?} compression, header {:?}",
                data.len(),
                envelope.get_compression(),
                envelope.get_header()
            );
            match tag {
                Some(tag) => Ok(tag),
                None => fail("input holds no root tag"),
            }
        }
        Format::Snbt => {
            let text = std::str::from_utf8(data)?;
            match nbtree_snbt::parse(text) {
                Some(value) => Ok(NamedTag::new("", value)),
                None => fail("input is not valid snbt"),
            }
        }
        Format::Json => {
            let value: serde_json::Value = serde_json::from_slice(data)?;
            match json::from_json(&value) {
                Some(value) => Ok(NamedTag::new("", value)),
                None => fail("input is json null"),
            }
        }
    }
}

/// Write a document. Text formats drop the root name.
pub fn encode(tag: &NamedTag, format: Format, flavor: Flavor, gzip: bool) -> Result<Vec<u8>> {
    match format {
        Format::Nbt => {
            let compression = if gzip {
                Compression::Gzip
            } else {
                Compression::None
            };
            Ok(Envelope::new(flavor).compression(compression).encode(tag)?)
        }
        Format::Snbt => Ok(format!("{}\n", tag.value()).into_bytes()),
        Format::Json => {
            let mut out = serde_json::to_vec_pretty(&tag.to_json())?;
            out.push(b'\n');
            Ok(out)
        }
    }
}
