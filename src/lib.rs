//! nbtree holds NBT data from *Minecraft: Java Edition* as an owned tree of
//! tags, and converts that tree to and from the two forms the game uses: the
//! big-endian binary format found in `.dat` files, and the stringified form
//! (SNBT) used by commands.
//!
//! * For the tree types see [`Value`], [`NamedTag`], [`List`] and [`Compound`].
//! * For the binary format see [`binary`].
//! * For SNBT see [`snbt`].
//! * For reading and writing nested tags by a dotted path see [`path`].
//!
//! Compression is not handled here. Files written by the game are usually
//! GZip compressed, so wrap the input in a decoder first:
//!
//! ```no_run
//! use flate2::read::GzDecoder;
//! use std::io::Read;
//!
//! let file = std::fs::File::open("level.dat").unwrap();
//! let mut decoder = GzDecoder::new(file);
//! let mut data = vec![];
//! decoder.read_to_end(&mut data).unwrap();
//!
//! let (root, _) = nbtree::binary::decode_binary(&data, 0).unwrap();
//! let spawn = nbtree::path::resolve(root.value(), "Data.SpawnX").unwrap();
//! println!("{:#}", spawn.value());
//! ```
//!
//! ```
//! use nbtree::{path, snbt, Value};
//!
//! let mut root = snbt::decode_text("{a:{b:[I;0,5,9]}}").unwrap().into_value();
//! let nine = path::resolve(&root, "a.b[2]").unwrap();
//! assert_eq!(nine.value(), &Value::Int(9));
//!
//! path::replace(&mut root, "a.c", Value::Long(7)).unwrap();
//! assert_eq!(root.to_string(), "{a:{b:[I;0,5,9],c:7l}}");
//! ```

use serde::Serialize;

pub mod binary;
pub mod error;
pub mod path;
pub mod snbt;

mod value;

pub use value::*;

#[cfg(test)]
mod test;

use std::convert::TryFrom;

/// Nesting limit used when no [`DecodeOptions`] are given. Matches the limit
/// the game itself enforces.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Serialize, Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other objects, all elements share one tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// Represents as array of Long (i64).
    LongArray = 12,
}

impl Tag {
    /// Size in bytes of the payload for tags with a fixed size, `None` for the
    /// variable sized ones.
    pub fn size(self) -> Option<usize> {
        match self {
            Tag::End => Some(0),
            Tag::Byte => Some(1),
            Tag::Short => Some(2),
            Tag::Int => Some(4),
            Tag::Long => Some(8),
            Tag::Float => Some(4),
            Tag::Double => Some(8),
            Tag::ByteArray
            | Tag::String
            | Tag::List
            | Tag::Compound
            | Tag::IntArray
            | Tag::LongArray => None,
        }
    }

    /// Canonical display name of the tag, eg `"ByteArray"`.
    pub fn name(self) -> &'static str {
        match self {
            Tag::End => "End",
            Tag::Byte => "Byte",
            Tag::Short => "Short",
            Tag::Int => "Int",
            Tag::Long => "Long",
            Tag::Float => "Float",
            Tag::Double => "Double",
            Tag::ByteArray => "ByteArray",
            Tag::String => "String",
            Tag::List => "List",
            Tag::Compound => "Compound",
            Tag::IntArray => "IntArray",
            Tag::LongArray => "LongArray",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// Crates exist to generate this code for us, but would add to our compile
// times, so we instead write it out manually. The tags will very rarely change.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 3,
            Tag::Long => 4,
            Tag::Float => 5,
            Tag::Double => 6,
            Tag::ByteArray => 7,
            Tag::String => 8,
            Tag::List => 9,
            Tag::Compound => 10,
            Tag::IntArray => 11,
            Tag::LongArray => 12,
        }
    }
}

/// Options shared by the binary and SNBT decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// How deeply lists and compounds may nest before decoding gives
    /// up with [`ErrorKind::DepthExceeded`][`error::ErrorKind::DepthExceeded`].
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
