//! The binary NBT format.
//!
//! A document is a single named tag: a tag id byte, a big-endian `u16` length
//! prefixed name, then the payload for that tag. Compounds hold further named
//! tags ending with an End tag; list elements are written with neither tag id
//! nor name since the list header gives the element tag once.
//!
//! ```
//! use nbtree::binary::{decode_binary, encode_binary};
//! use nbtree::{NamedTag, Value};
//!
//! let input = [1, 0, 1, b'a', 5];
//! let (tag, consumed) = decode_binary(&input, 0).unwrap();
//! assert_eq!(tag, NamedTag::new("a", Value::Byte(5)));
//! assert_eq!(consumed, 5);
//! assert_eq!(tag.byte_len(), 5);
//! assert_eq!(encode_binary(&tag).unwrap(), input);
//! ```

use std::io::Write;

use log::trace;

use crate::{
    error::{Error, Result},
    Compound, DecodeOptions, List, NamedTag, Tag, Value,
};

use self::input::{try_size, Slice};
use self::write_nbt::WriteNbt;

mod input;
mod write_nbt;

/// Decode the named tag starting at `offset` in `bytes`. Returns the tag and
/// the number of bytes it took up, so further tags can be read after it.
pub fn decode_binary(bytes: &[u8], offset: usize) -> Result<(NamedTag, usize)> {
    decode_binary_with(bytes, offset, &DecodeOptions::default())
}

/// Like [`decode_binary`] with explicit options.
pub fn decode_binary_with(
    bytes: &[u8],
    offset: usize,
    opts: &DecodeOptions,
) -> Result<(NamedTag, usize)> {
    let data = bytes.get(offset..).ok_or_else(Error::unexpected_eof)?;
    let mut decoder = Decoder {
        input: Slice::new(data),
        max_depth: opts.max_depth,
        layers: Vec::new(),
    };

    let tag = decoder.named_tag()?;
    Ok((tag, decoder.input.consumed()))
}

/// Encode a named tag into a fresh buffer. The length of the output is always
/// [`NamedTag::byte_len`].
pub fn encode_binary(tag: &NamedTag) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(tag.byte_len());
    write_binary(&mut out, tag)?;
    Ok(out)
}

/// Encode a named tag into any writer.
pub fn write_binary<W: Write>(mut writer: W, tag: &NamedTag) -> Result<()> {
    write_named(&mut writer, tag.name(), tag.value())
}

/// A list or compound that has been opened but not yet finished.
enum Layer {
    List {
        element: Tag,
        remaining: usize,
        items: Vec<Value>,
    },
    Compound {
        compound: Compound,
        // Key the child currently being read will be stored under.
        key: String,
    },
}

// Nesting is tracked on the heap in `layers` rather than by recursion, so the
// depth limit is the only bound on how deep a document can go.
struct Decoder<'de> {
    input: Slice<'de>,
    max_depth: usize,
    layers: Vec<Layer>,
}

impl<'de> Decoder<'de> {
    fn named_tag(&mut self) -> Result<NamedTag> {
        let tag = self.input.consume_tag()?;
        if tag == Tag::End {
            // End tags have no name or value.
            return Ok(NamedTag::end());
        }

        let name = self.input.consume_str()?;
        trace!("decoding {} {:?}", tag, name);

        let mut next = self.begin(tag)?;
        loop {
            if let Some(value) = next {
                match self.layers.last_mut() {
                    None => return Ok(NamedTag::new(name, value)),
                    Some(Layer::List { items, .. }) => items.push(value),
                    Some(Layer::Compound { compound, key }) => {
                        compound.insert(std::mem::take(key), value)?;
                    }
                }
            }
            next = self.step()?;
        }
    }

    /// Start reading a payload. Scalars and arrays are read whole; lists and
    /// compounds are opened as a new layer and give `None`.
    fn begin(&mut self, tag: Tag) -> Result<Option<Value>> {
        Ok(Some(match tag {
            Tag::End => Value::End,
            Tag::Byte => Value::Byte(self.input.consume_i8()?),
            Tag::Short => Value::Short(self.input.consume_i16()?),
            Tag::Int => Value::Int(self.input.consume_i32()?),
            Tag::Long => Value::Long(self.input.consume_i64()?),
            Tag::Float => Value::Float(self.input.consume_f32()?),
            Tag::Double => Value::Double(self.input.consume_f64()?),
            Tag::String => Value::String(self.input.consume_str()?),
            Tag::ByteArray => {
                let size = self.input.consume_i32()?;
                let bs = self.input.consume_bytes(try_size(size, 1)?)?;
                Value::ByteArray(bs.iter().map(|b| *b as i8).collect())
            }
            Tag::IntArray => {
                let size = self.input.consume_i32()?;
                self.check_fits(size, std::mem::size_of::<i32>())?;
                let mut buf = Vec::with_capacity(size as usize);
                for _ in 0..size {
                    buf.push(self.input.consume_i32()?);
                }
                Value::IntArray(buf)
            }
            Tag::LongArray => {
                let size = self.input.consume_i32()?;
                self.check_fits(size, std::mem::size_of::<i64>())?;
                let mut buf = Vec::with_capacity(size as usize);
                for _ in 0..size {
                    buf.push(self.input.consume_i64()?);
                }
                Value::LongArray(buf)
            }
            Tag::List => {
                self.enter()?;
                let element = self.input.consume_tag()?;
                let size = self.input.consume_i32()?;
                let size = try_size(size, 1)?;
                if element == Tag::End && size > 0 {
                    return Err(Error::invalid_length(format!(
                        "list of End tags with {} elements",
                        size
                    )));
                }

                trace!("list of {} {}", size, element);

                // Every element takes at least one byte, so never reserve
                // more than what is left of the input.
                let items = Vec::with_capacity(size.min(self.input.remaining()));
                self.layers.push(Layer::List {
                    element,
                    remaining: size,
                    items,
                });
                return Ok(None);
            }
            Tag::Compound => {
                self.enter()?;
                self.layers.push(Layer::Compound {
                    compound: Compound::new(),
                    key: String::new(),
                });
                return Ok(None);
            }
        }))
    }

    /// Advance the innermost open layer by one child. Gives the finished
    /// value if that completed one.
    fn step(&mut self) -> Result<Option<Value>> {
        let next = match self.layers.last_mut() {
            Some(Layer::List {
                element, remaining, ..
            }) if *remaining > 0 => {
                *remaining -= 1;
                *element
            }
            Some(Layer::Compound { key, .. }) => {
                let tag = self.input.consume_tag()?;
                if tag == Tag::End {
                    return self.close().map(Some);
                }
                *key = self.input.consume_str()?;
                trace!("decoding {} {:?}", tag, key);
                tag
            }
            _ => return self.close().map(Some),
        };
        self.begin(next)
    }

    fn close(&mut self) -> Result<Value> {
        match self.layers.pop() {
            Some(Layer::List { element, items, .. }) => {
                Ok(Value::List(List::with_values(element, items)?))
            }
            Some(Layer::Compound { compound, .. }) => Ok(Value::Compound(compound)),
            None => Err(Error::bespoke("no open list or compound to close")),
        }
    }

    fn enter(&self) -> Result<()> {
        if self.layers.len() >= self.max_depth {
            return Err(Error::depth_exceeded(self.max_depth));
        }
        Ok(())
    }

    /// Fail early on arrays that claim more elements than the input has room
    /// for, rather than reserving memory for them.
    fn check_fits(&self, size: i32, element_size: usize) -> Result<()> {
        if try_size(size, element_size)? > self.input.remaining() {
            return Err(Error::unexpected_eof());
        }
        Ok(())
    }
}

fn write_named<W: Write>(writer: &mut W, name: &str, value: &Value) -> Result<()> {
    writer.write_tag(value.tag())?;
    if let Value::End = value {
        return Ok(());
    }
    writer.write_size_prefixed_str(name)?;
    write_payload(writer, value)
}

fn write_payload<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    use byteorder::{BigEndian, WriteBytesExt};

    match value {
        Value::End => {}
        Value::Byte(v) => writer.write_i8(*v)?,
        Value::Short(v) => writer.write_i16::<BigEndian>(*v)?,
        Value::Int(v) => writer.write_i32::<BigEndian>(*v)?,
        Value::Long(v) => writer.write_i64::<BigEndian>(*v)?,
        Value::Float(v) => writer.write_f32::<BigEndian>(*v)?,
        Value::Double(v) => writer.write_f64::<BigEndian>(*v)?,
        Value::String(s) => writer.write_size_prefixed_str(s)?,
        Value::ByteArray(bs) => {
            writer.write_len(bs.len())?;
            for b in bs {
                writer.write_i8(*b)?;
            }
        }
        Value::IntArray(is) => {
            writer.write_len(is.len())?;
            for i in is {
                writer.write_i32::<BigEndian>(*i)?;
            }
        }
        Value::LongArray(ls) => {
            writer.write_len(ls.len())?;
            for l in ls {
                writer.write_i64::<BigEndian>(*l)?;
            }
        }
        Value::List(list) => {
            writer.write_tag(list.element_tag())?;
            writer.write_len(list.len())?;
            for item in list {
                write_payload(writer, item)?;
            }
        }
        Value::Compound(compound) => {
            for (name, child) in compound.iter() {
                write_named(writer, name, child)?;
            }
            write_named(writer, "", &Value::End)?;
        }
    }

    Ok(())
}
