use std::convert::TryFrom;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{Error, Result};
use crate::{ByteArray, Compound, IntArray, List, LongArray, NamedTag, Tag, Value};

use super::{varint, DecodeOpts, Flavor};

/// Decoder reads NBT from an in-memory buffer.
///
/// By default the decoder is lenient about truncated input: any primitive
/// read past the end of the buffer is filled with zero bytes. A collection
/// stops growing once the buffer is exhausted. Set
/// [`DecodeOpts::strict`] to get [`ErrorKind::UnexpectedEof`] instead.
///
/// Unknown tags are not errors. At the top level they decode as `None`,
/// inside a compound they end the compound, and as the element tag of a
/// list they produce an empty list.
///
/// [`ErrorKind::UnexpectedEof`]: crate::error::ErrorKind::UnexpectedEof
///
/// ```
/// use nbtree::{Decoder, Flavor, Value};
///
/// // An int, -2, written by the network flavor without a name.
/// let data = [3, 0xfe, 0xff, 0xff, 0xff, 0x0f];
/// let mut decoder = Decoder::new(&data, Flavor::Network);
///
/// assert_eq!(decoder.read_nameless_tag().unwrap(), Some(Value::Int(-2)));
/// assert_eq!(decoder.remaining(), 0);
/// ```
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    flavor: Flavor,
    opts: DecodeOpts,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8], flavor: Flavor) -> Self {
        Self::with_opts(data, flavor, DecodeOpts::default())
    }

    pub fn with_opts(data: &'a [u8], flavor: Flavor, opts: DecodeOpts) -> Self {
        Self {
            data,
            pos: 0,
            flavor,
            opts,
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// The part of the buffer that has not been read yet.
    pub fn into_inner(self) -> &'a [u8] {
        let data = self.data;
        &data[self.pos..]
    }

    /// Read a tag, its name and its payload. Returns `None` for an end tag
    /// or a tag id that is not known.
    pub fn read_tag(&mut self) -> Result<Option<NamedTag>> {
        let tag = match self.read_kind()? {
            Some(tag) => tag,
            None => return Ok(None),
        };
        let name = self.read_string()?;
        Ok(self.read_payload(tag)?.map(|value| NamedTag::new(name, value)))
    }

    /// Read a tag and its payload, with no name in between.
    pub fn read_nameless_tag(&mut self) -> Result<Option<Value>> {
        match self.read_kind()? {
            Some(tag) => self.read_payload(tag),
            None => Ok(None),
        }
    }

    /// Read the payload of a value of the given tag.
    ///
    /// Nested compounds and lists are tracked on a heap allocated stack, so
    /// deep input is bounded by [`DecodeOpts::max_depth`] and never by the
    /// thread's stack.
    pub fn read_payload(&mut self, tag: Tag) -> Result<Option<Value>> {
        if tag == Tag::End {
            return Ok(None);
        }
        let mut stack: Vec<Frame> = Vec::new();
        let mut next = tag;
        loop {
            let mut done = match next {
                Tag::Compound => {
                    self.open(&stack)?;
                    stack.push(Frame::Compound {
                        compound: Compound::new(),
                        name: String::new(),
                    });
                    None
                }
                Tag::List => {
                    self.open(&stack)?;
                    let element = self.read_u8()?;
                    let len = self.read_len()?;
                    match Tag::try_from(element) {
                        Ok(Tag::End) | Err(_) => Some(Value::List(List::new())),
                        Ok(kind) => {
                            let mut list = List::with_kind(kind);
                            list.reserve(len.min(self.remaining()));
                            stack.push(Frame::List {
                                list,
                                kind,
                                left: len,
                            });
                            None
                        }
                    }
                }
                scalar => Some(self.read_scalar(scalar)?),
            };

            // Hand finished values to their parents until one of them wants
            // another child.
            loop {
                let frame = match stack.last_mut() {
                    Some(frame) => frame,
                    None => return Ok(done),
                };
                if let Some(value) = done.take() {
                    frame.push(value);
                }
                let child = match frame {
                    Frame::Compound { name, .. } => match self.read_kind()? {
                        Some(tag) => {
                            *name = self.read_string()?;
                            Some(tag)
                        }
                        None => None,
                    },
                    Frame::List { kind, left, .. } => {
                        if *left > 0 && !self.stop_collection()? {
                            *left -= 1;
                            Some(*kind)
                        } else {
                            None
                        }
                    }
                };
                match child {
                    Some(tag) => {
                        next = tag;
                        break;
                    }
                    None => done = stack.pop().map(Frame::into_value),
                }
            }
        }
    }

    #[inline(never)]
    fn read_scalar(&mut self, tag: Tag) -> Result<Value> {
        Ok(match tag {
            Tag::Byte => Value::Byte(self.read_i8()?),
            Tag::Short => Value::Short(self.read_i16()?),
            Tag::Int => Value::Int(self.read_i32()?),
            Tag::Long => Value::Long(self.read_i64()?),
            Tag::Float => Value::Float(self.read_f32()?),
            Tag::Double => Value::Double(self.read_f64()?),
            Tag::String => Value::String(self.read_string()?),
            Tag::ByteArray => {
                let len = self.read_len()?;
                let bytes = self.take_collection(len)?;
                Value::ByteArray(ByteArray::from_bytes(bytes))
            }
            Tag::IntArray => {
                let len = self.read_len()?;
                let mut data = Vec::with_capacity(len.min(self.remaining()));
                for _ in 0..len {
                    if self.stop_collection()? {
                        break;
                    }
                    data.push(self.read_i32()?);
                }
                Value::IntArray(IntArray::new(data))
            }
            Tag::LongArray => {
                let len = self.read_len()?;
                let mut data = Vec::with_capacity(len.min(self.remaining() / 8 + 1));
                for _ in 0..len {
                    if self.stop_collection()? {
                        break;
                    }
                    data.push(self.read_i64()?);
                }
                Value::LongArray(LongArray::new(data))
            }
            Tag::End | Tag::List | Tag::Compound => {
                return Err(Error::bespoke(format!("{} is not a scalar tag", tag)))
            }
        })
    }

    /// Read a tag id. End and unknown ids are `None`.
    fn read_kind(&mut self) -> Result<Option<Tag>> {
        let id = self.read_u8()?;
        Ok(match Tag::try_from(id) {
            Ok(Tag::End) | Err(_) => None,
            Ok(tag) => Some(tag),
        })
    }

    /// Check there is room for one more open compound or list.
    fn open(&self, stack: &[Frame]) -> Result<()> {
        if stack.len() >= self.opts.max_depth {
            return Err(Error::depth_limit(self.opts.max_depth));
        }
        Ok(())
    }

    /// Whether a collection should stop before its next element. Lenient
    /// decoding stops at the end of the input, strict decoding errors.
    fn stop_collection(&self) -> Result<bool> {
        if !self.is_exhausted() {
            Ok(false)
        } else if self.opts.strict {
            Err(Error::unexpected_eof())
        } else {
            Ok(true)
        }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        let available = self.remaining().min(N);
        if available < N && self.opts.strict {
            return Err(Error::unexpected_eof());
        }
        buf[..available].copy_from_slice(&self.data[self.pos..self.pos + available]);
        self.pos += available;
        Ok(buf)
    }

    /// Take `len` bytes, zero padded if the input is short.
    fn take_padded(&mut self, len: usize) -> Result<Vec<u8>> {
        let available = self.remaining().min(len);
        if available < len && self.opts.strict {
            return Err(Error::unexpected_eof());
        }
        let mut bytes = self.data[self.pos..self.pos + available].to_vec();
        self.pos += available;
        bytes.resize(len, 0);
        Ok(bytes)
    }

    /// Take up to `len` bytes for a byte array, which shortens rather than
    /// pads when the input is short.
    fn take_collection(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.remaining().min(len);
        if available < len && self.opts.strict {
            return Err(Error::unexpected_eof());
        }
        let data = self.data;
        let bytes = &data[self.pos..self.pos + available];
        self.pos += available;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let bs = self.take::<2>()?;
        Ok(match self.flavor {
            Flavor::BigEndian => BigEndian::read_i16(&bs),
            Flavor::LittleEndian | Flavor::Network => LittleEndian::read_i16(&bs),
        })
    }

    /// Read an int. This is a varint in the network flavor, where negative
    /// numbers are their unsigned 32-bit reinterpretation.
    pub fn read_i32(&mut self) -> Result<i32> {
        match self.flavor {
            Flavor::Network => Ok(self.read_varint()? as i32),
            Flavor::BigEndian => Ok(BigEndian::read_i32(&self.take::<4>()?)),
            Flavor::LittleEndian => Ok(LittleEndian::read_i32(&self.take::<4>()?)),
        }
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let bs = self.take::<8>()?;
        Ok(match self.flavor {
            Flavor::BigEndian => BigEndian::read_i64(&bs),
            Flavor::LittleEndian | Flavor::Network => LittleEndian::read_i64(&bs),
        })
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let bs = self.take::<4>()?;
        Ok(match self.flavor {
            Flavor::BigEndian => BigEndian::read_f32(&bs),
            Flavor::LittleEndian | Flavor::Network => LittleEndian::read_f32(&bs),
        })
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let bs = self.take::<8>()?;
        Ok(match self.flavor {
            Flavor::BigEndian => BigEndian::read_f64(&bs),
            Flavor::LittleEndian | Flavor::Network => LittleEndian::read_f64(&bs),
        })
    }

    fn read_varint(&mut self) -> Result<u32> {
        varint::read_u32(|| self.read_u8())
    }

    /// Read a length prefixed string. Invalid UTF-8 is replaced with
    /// U+FFFD, or rejected in strict mode.
    pub fn read_string(&mut self) -> Result<String> {
        let len = match self.flavor {
            Flavor::Network => self.read_varint()? as usize,
            _ => {
                let bs = self.take::<2>()?;
                match self.flavor {
                    Flavor::BigEndian => BigEndian::read_u16(&bs) as usize,
                    _ => LittleEndian::read_u16(&bs) as usize,
                }
            }
        };
        self.check_len(len)?;

        let bytes = self.take_padded(len)?;
        match String::from_utf8(bytes) {
            Ok(s) => Ok(s),
            Err(e) if self.opts.strict => Err(Error::bespoke(format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(e.as_bytes())
            ))),
            Err(e) => Ok(String::from_utf8_lossy(e.as_bytes()).into_owned()),
        }
    }

    /// Read a collection length: the element count of an array or list.
    pub fn read_len(&mut self) -> Result<usize> {
        let len = match self.flavor {
            Flavor::Network => self.read_varint()?,
            Flavor::BigEndian => BigEndian::read_u32(&self.take::<4>()?),
            Flavor::LittleEndian => LittleEndian::read_u32(&self.take::<4>()?),
        } as usize;
        self.check_len(len)?;
        Ok(len)
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len > self.opts.max_seq_len {
            return Err(Error::length_too_large(len, self.opts.max_seq_len));
        }
        Ok(())
    }
}

/// A compound or list whose payload is still being read.
enum Frame {
    /// `name` belongs to the child currently being read.
    Compound { compound: Compound, name: String },
    List { list: List, kind: Tag, left: usize },
}

impl Frame {
    fn push(&mut self, value: Value) {
        match self {
            // The first of any repeated names is kept, the same as when
            // constructing a compound.
            Frame::Compound { compound, name } => {
                compound.set_if_absent(std::mem::take(name), value);
            }
            Frame::List { list, .. } => list.push_unchecked(value),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Frame::Compound { compound, .. } => Value::Compound(compound),
            Frame::List { list, .. } => Value::List(list),
        }
    }
}
