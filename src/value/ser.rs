//! `Serialize` for the tree, giving a self-describing view where every tag is
//! an object of its type, name and payload. Useful for dumping NBT as JSON.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::{Compound, List, NamedTag, Value};

/// A tag borrowed from somewhere in the tree along with the name it has there.
struct Entry<'a> {
    name: &'a str,
    value: &'a Value,
}

impl Serialize for Entry<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Value::End = self.value {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("type", &self.value.tag())?;
            return map.end();
        }

        let mut map = serializer.serialize_map(None)?;
        if let Value::List(list) = self.value {
            map.serialize_entry("listType", &list.element_tag())?;
        }
        map.serialize_entry("type", &self.value.tag())?;
        map.serialize_entry("name", self.name)?;
        map.serialize_entry("payload", self.value)?;
        map.end()
    }
}

impl Serialize for NamedTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Entry {
            name: self.name(),
            value: self.value(),
        }
        .serialize(serializer)
    }
}

/// Serializes just the payload. Scalars and arrays become plain numbers and
/// sequences, lists and compounds become sequences of tag objects.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::End => serializer.serialize_unit(),
            Value::Byte(v) => serializer.serialize_i8(*v),
            Value::Short(v) => serializer.serialize_i16(*v),
            Value::Int(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f32(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::ByteArray(v) => v.serialize(serializer),
            Value::IntArray(v) => v.serialize(serializer),
            Value::LongArray(v) => v.serialize(serializer),
            Value::List(v) => v.serialize(serializer),
            Value::Compound(v) => v.serialize(serializer),
        }
    }
}

impl Serialize for List {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            seq.serialize_element(&Entry { name: "", value })?;
        }
        seq.end()
    }
}

impl Serialize for Compound {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (name, value) in self.iter() {
            seq.serialize_element(&Entry { name, value })?;
        }
        seq.end()
    }
}
