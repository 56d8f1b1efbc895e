use std::io::Write;

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::{List, NamedTag, Tag, Value};

use super::{varint, Flavor, MAX_DEPTH, MAX_SEQ_LEN};

/// Encoder writes NBT to any [`Write`].
///
/// Strings longer than the length field of the flavor allows, strings and
/// collections longer than [`MAX_SEQ_LEN`], trees nested deeper than
/// [`MAX_DEPTH`] and lists mixing tags are refused with an error. Nothing is buffered, so on error
/// the writer may hold a partial value.
pub struct Encoder<W: Write> {
    writer: W,
    flavor: Flavor,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W, flavor: Flavor) -> Self {
        Self { writer, flavor }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write the tag id, name and payload.
    pub fn write_tag(&mut self, tag: &NamedTag) -> Result<()> {
        self.write_named(tag.name(), tag.value())
    }

    /// Write a value as a named tag.
    pub fn write_named(&mut self, name: &str, value: &Value) -> Result<()> {
        self.write_kind(value.tag())?;
        self.write_string(name)?;
        self.write_payload(value)
    }

    /// Write the tag id and payload without any name.
    pub fn write_nameless(&mut self, value: &Value) -> Result<()> {
        self.write_kind(value.tag())?;
        self.write_payload(value)
    }

    /// Write only the payload of a value.
    ///
    /// Nesting is walked with a heap allocated stack and is bounded by
    /// [`MAX_DEPTH`].
    pub fn write_payload(&mut self, value: &Value) -> Result<()> {
        let mut stack: Vec<Frame<'_>> = Vec::new();
        let mut next = Some(value);
        loop {
            match next.take() {
                Some(Value::Compound(compound)) => {
                    open(&stack)?;
                    stack.push(Frame::Compound(compound.entries()));
                }
                Some(Value::List(list)) => {
                    open(&stack)?;
                    self.write_list_header(list)?;
                    stack.push(Frame::List(list.iter()));
                }
                Some(scalar) => self.write_scalar(scalar)?,
                None => {}
            }

            let frame = match stack.last_mut() {
                Some(frame) => frame,
                None => return Ok(()),
            };
            next = match frame {
                Frame::Compound(entries) => match entries.next() {
                    Some((name, value)) => {
                        self.write_kind(value.tag())?;
                        self.write_string(name)?;
                        Some(value)
                    }
                    None => {
                        self.write_kind(Tag::End)?;
                        None
                    }
                },
                Frame::List(items) => items.next(),
            };
            if next.is_none() {
                stack.pop();
            }
        }
    }

    #[inline(never)]
    fn write_scalar(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Byte(v) => self.write_i8(*v),
            Value::Short(v) => self.write_i16(*v),
            Value::Int(v) => self.write_i32(*v),
            Value::Long(v) => self.write_i64(*v),
            Value::Float(v) => self.write_f32(*v),
            Value::Double(v) => self.write_f64(*v),
            Value::String(v) => self.write_string(v),
            Value::ByteArray(v) => {
                self.write_len(v.len())?;
                self.writer.write_all(&v.to_bytes())?;
                Ok(())
            }
            Value::IntArray(v) => {
                self.write_len(v.len())?;
                v.iter().try_for_each(|i| self.write_i32(*i))
            }
            Value::LongArray(v) => {
                self.write_len(v.len())?;
                v.iter().try_for_each(|i| self.write_i64(*i))
            }
            Value::List(_) | Value::Compound(_) => Err(Error::bespoke(format!(
                "{} is not a scalar tag",
                value.tag()
            ))),
        }
    }

    fn write_list_header(&mut self, list: &List) -> Result<()> {
        if let Some((expected, found)) = list.first_mismatch() {
            return Err(Error::kind_mismatch(expected, found));
        }
        self.write_kind(list.kind().unwrap_or(Tag::End))?;
        self.write_len(list.len())
    }

    pub fn write_kind(&mut self, tag: Tag) -> Result<()> {
        self.writer.write_u8(tag.into())?;
        Ok(())
    }

    pub fn write_i8(&mut self, v: i8) -> Result<()> {
        self.writer.write_i8(v)?;
        Ok(())
    }

    pub fn write_i16(&mut self, v: i16) -> Result<()> {
        match self.flavor {
            Flavor::BigEndian => self.writer.write_i16::<BigEndian>(v)?,
            Flavor::LittleEndian | Flavor::Network => self.writer.write_i16::<LittleEndian>(v)?,
        }
        Ok(())
    }

    /// Write an int. The network flavor writes the unsigned 32-bit
    /// reinterpretation as a varint, so negative numbers take five bytes.
    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        match self.flavor {
            Flavor::BigEndian => self.writer.write_i32::<BigEndian>(v)?,
            Flavor::LittleEndian => self.writer.write_i32::<LittleEndian>(v)?,
            Flavor::Network => varint::write_u32(&mut self.writer, v as u32)?,
        }
        Ok(())
    }

    pub fn write_i64(&mut self, v: i64) -> Result<()> {
        match self.flavor {
            Flavor::BigEndian => self.writer.write_i64::<BigEndian>(v)?,
            Flavor::LittleEndian | Flavor::Network => self.writer.write_i64::<LittleEndian>(v)?,
        }
        Ok(())
    }

    pub fn write_f32(&mut self, v: f32) -> Result<()> {
        match self.flavor {
            Flavor::BigEndian => self.writer.write_f32::<BigEndian>(v)?,
            Flavor::LittleEndian | Flavor::Network => self.writer.write_f32::<LittleEndian>(v)?,
        }
        Ok(())
    }

    pub fn write_f64(&mut self, v: f64) -> Result<()> {
        match self.flavor {
            Flavor::BigEndian => self.writer.write_f64::<BigEndian>(v)?,
            Flavor::LittleEndian | Flavor::Network => self.writer.write_f64::<LittleEndian>(v)?,
        }
        Ok(())
    }

    /// Write a length prefixed UTF-8 string.
    pub fn write_string(&mut self, s: &str) -> Result<()> {
        let len = s.len();
        match self.flavor {
            Flavor::Network => {
                if len > MAX_SEQ_LEN {
                    return Err(Error::length_too_large(len, MAX_SEQ_LEN));
                }
                varint::write_u32(&mut self.writer, len as u32)?;
            }
            Flavor::BigEndian | Flavor::LittleEndian => {
                let len = u16::try_from(len)
                    .map_err(|_| Error::length_too_large(len, u16::MAX as usize))?;
                if self.flavor == Flavor::BigEndian {
                    self.writer.write_u16::<BigEndian>(len)?;
                } else {
                    self.writer.write_u16::<LittleEndian>(len)?;
                }
            }
        }
        self.writer.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Write a collection length.
    pub fn write_len(&mut self, len: usize) -> Result<()> {
        if len > MAX_SEQ_LEN {
            return Err(Error::length_too_large(len, MAX_SEQ_LEN));
        }
        let len = len as u32;
        match self.flavor {
            Flavor::BigEndian => self.writer.write_u32::<BigEndian>(len)?,
            Flavor::LittleEndian => self.writer.write_u32::<LittleEndian>(len)?,
            Flavor::Network => varint::write_u32(&mut self.writer, len)?,
        }
        Ok(())
    }
}

/// A compound or list whose children are still being written.
enum Frame<'v> {
    Compound(indexmap::map::Iter<'v, String, Value>),
    List(std::slice::Iter<'v, Value>),
}

fn open(stack: &[Frame<'_>]) -> Result<()> {
    if stack.len() >= MAX_DEPTH {
        return Err(Error::depth_limit(MAX_DEPTH));
    }
    Ok(())
}
