//! File level envelopes around an encoded root tag.
//!
//! NBT files are rarely stored bare. Java edition files like `level.dat` are
//! gzip compressed, chunks inside region files are zlib compressed, and
//! Bedrock edition `level.dat` files are uncompressed little endian NBT with
//! an 8 byte header:
//!
//! ```text
//! u32le(version) u32le(payload length) payload
//! ```
//!
//! An [`Envelope`] describes one such wrapping. [`read`] works out the
//! wrapping of existing data.
//!
//! ```
//! use nbtree::container::{Compression, Envelope};
//! use nbtree::{compound, Flavor, NamedTag};
//!
//! let root = NamedTag::new("", compound! { "DataVersion" => 3465 });
//! let envelope = Envelope::new(Flavor::BigEndian).compression(Compression::Gzip);
//!
//! let file = envelope.encode(&root).unwrap();
//! assert_eq!(envelope.decode(&file).unwrap(), Some(root));
//! ```
use std::io::{Read, Write};

use byteorder::{ByteOrder, LittleEndian};
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use log::debug;

use crate::error::{Error, Result};
use crate::stream::{self, DecodeOpts, Flavor};
use crate::NamedTag;

const HEADER_LEN: usize = 8;
const MAX_POCKET_VERSION: u32 = 64;

/// Compression applied to the encoded tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Zlib,
}

impl Compression {
    /// Guess the compression of `data` from its first bytes.
    pub fn detect(data: &[u8]) -> Compression {
        match data {
            [0x1f, 0x8b, ..] => Compression::Gzip,
            // A zlib header is a CMF byte of 0x78 (deflate, 32K window) and
            // an FLG byte making the pair a multiple of 31.
            [0x78, flg, ..] if (0x7800u16 | *flg as u16) % 31 == 0 => Compression::Zlib,
            _ => Compression::None,
        }
    }

    fn compress(self, data: Vec<u8>) -> Result<Vec<u8>> {
        Ok(match self {
            Compression::None => data,
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
                encoder.write_all(&data)?;
                encoder.finish()?
            }
            Compression::Zlib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
                encoder.write_all(&data)?;
                encoder.finish()?
            }
        })
    }

    fn decompress(self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        match self {
            Compression::None => out.extend_from_slice(data),
            Compression::Gzip => {
                GzDecoder::new(data).read_to_end(&mut out)?;
            }
            Compression::Zlib => {
                ZlibDecoder::new(data).read_to_end(&mut out)?;
            }
        }
        Ok(out)
    }
}

/// A fixed header written in front of the (possibly compressed) payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    /// Bedrock edition `level.dat` header: storage version and payload
    /// length, both little endian `u32`.
    Pocket { version: u32 },
}

impl Header {
    fn write(&self, payload_len: usize, out: &mut Vec<u8>) -> Result<()> {
        let Header::Pocket { version } = *self;
        let len = u32::try_from(payload_len)
            .map_err(|_| Error::length_too_large(payload_len, u32::MAX as usize))?;
        let mut buf = [0u8; HEADER_LEN];
        LittleEndian::write_u32(&mut buf[..4], version);
        LittleEndian::write_u32(&mut buf[4..], len);
        out.extend_from_slice(&buf);
        Ok(())
    }

    /// Recognise a pocket header: a small version followed by the length of
    /// the rest of the data.
    fn detect(data: &[u8]) -> Option<Header> {
        if data.len() < HEADER_LEN {
            return None;
        }
        let version = LittleEndian::read_u32(&data[..4]);
        let len = LittleEndian::read_u32(&data[4..HEADER_LEN]) as usize;
        (version <= MAX_POCKET_VERSION && len == data.len() - HEADER_LEN)
            .then_some(Header::Pocket { version })
    }
}

/// How an encoded root tag is wrapped into a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Envelope {
    flavor: Flavor,
    compression: Compression,
    header: Option<Header>,
    opts: DecodeOpts,
}

impl Envelope {
    pub fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            ..Default::default()
        }
    }

    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn header(mut self, header: Header) -> Self {
        self.header = Some(header);
        self
    }

    /// Options used when decoding the payload.
    pub fn decode_opts(mut self, opts: DecodeOpts) -> Self {
        self.opts = opts;
        self
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn get_compression(&self) -> Compression {
        self.compression
    }

    pub fn get_header(&self) -> Option<Header> {
        self.header
    }

    /// Encode `tag`, compress it, and prefix the header.
    pub fn encode(&self, tag: &NamedTag) -> Result<Vec<u8>> {
        let payload = self.compression.compress(stream::to_bytes(tag, self.flavor)?)?;
        match self.header {
            Some(header) => {
                let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
                header.write(payload.len(), &mut out)?;
                out.extend_from_slice(&payload);
                Ok(out)
            }
            None => Ok(payload),
        }
    }

    /// Strip the header, decompress, and decode the root tag.
    pub fn decode(&self, data: &[u8]) -> Result<Option<NamedTag>> {
        let payload = match self.header {
            Some(Header::Pocket { .. }) => {
                if data.len() < HEADER_LEN {
                    return Err(Error::bespoke("data too short for pocket header"));
                }
                let len = LittleEndian::read_u32(&data[4..HEADER_LEN]) as usize;
                let rest = &data[HEADER_LEN..];
                &rest[..len.min(rest.len())]
            }
            None => data,
        };
        let payload = self.compression.decompress(payload)?;
        stream::from_bytes_with_opts(&payload, self.flavor, self.opts)
    }
}

/// Work out how `data` is wrapped and decode it.
///
/// Compression is detected from magic bytes. A pocket header is only looked
/// for in little endian data, where it is recognised by its length field.
pub fn read(data: &[u8], flavor: Flavor) -> Result<(Envelope, Option<NamedTag>)> {
    let mut envelope = Envelope::new(flavor);

    if flavor == Flavor::LittleEndian {
        if let Some(header) = Header::detect(data) {
            debug!("found pocket header: {:?}", header);
            envelope = envelope.header(header);
        }
    }

    let body = if envelope.header.is_some() {
        &data[HEADER_LEN..]
    } else {
        data
    };
    let compression = Compression::detect(body);
    debug!("detected compression: {:?}", compression);

    let envelope = envelope.compression(compression);
    let tag = envelope.decode(data)?;
    Ok((envelope, tag))
}
