mod compound;
mod list;
mod ser;

use crate::Tag;

pub use self::compound::Compound;
pub use self::list::List;

/// Value is a complete NBT payload. It owns its data. Compounds and Lists
/// recursively own their children.
///
/// Values carry no name; a name only exists where a tag sits inside a
/// [`Compound`] (the key) or at the root of a document (see [`NamedTag`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Value {
    /// The tag this value is encoded with.
    pub fn tag(&self) -> Tag {
        match self {
            Value::End => Tag::End,
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

    /// Number of bytes the payload takes in the binary format, excluding the
    /// tag id and name.
    pub fn payload_len(&self) -> usize {
        match self {
            Value::End => 0,
            Value::Byte(_) => 1,
            Value::Short(_) => 2,
            Value::Int(_) | Value::Float(_) => 4,
            Value::Long(_) | Value::Double(_) => 8,
            Value::ByteArray(v) => 4 + v.len(),
            Value::String(s) => 2 + s.len(),
            // Elements of a list have neither a tag id nor a name.
            Value::List(l) => 1 + 4 + l.iter().map(Value::payload_len).sum::<usize>(),
            Value::Compound(c) => {
                c.iter()
                    .map(|(k, v)| 1 + 2 + k.len() + v.payload_len())
                    .sum::<usize>()
                    + 1
            }
            Value::IntArray(v) => 4 + 4 * v.len(),
            Value::LongArray(v) => 4 + 8 * v.len(),
        }
    }

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

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }
}

/// A tag together with its name. This is the unit the binary format is built
/// from: a document is a single named tag, usually a compound with an empty
/// name.
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

    /// The End tag that terminates a compound. It has no name.
    pub fn end() -> Self {
        Self {
            name: String::new(),
            value: Value::End,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> Tag {
        self.value.tag()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }

    /// Size of this tag in the binary format: tag id, length prefixed name
    /// and payload. Always equal to the length of
    /// [`encode_binary`][`crate::binary::encode_binary`]'s output.
    pub fn byte_len(&self) -> usize {
        match self.value {
            Value::End => 1,
            _ => 1 + 2 + self.name.len() + self.value.payload_len(),
        }
    }
}

impl From<NamedTag> for Value {
    fn from(tag: NamedTag) -> Self {
        tag.value
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
    };
}
from!(i8, Byte);
from!(i16, Short);
from!(i32, Int);
from!(i64, Long);
from!(f32, Float);
from!(f64, Double);
from!(String, String);
from!(&str, String, .to_owned());
from!(List, List);
from!(Compound, Compound);

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Self::Byte(i8::from(val))
    }
}
