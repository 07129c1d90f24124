//! Reading and writing tags deep inside a tree by path.
//!
//! A path is a series of compound keys separated by `.`, each optionally
//! followed by list or array indices in brackets: `Data.Player.Inventory[0].id`.
//! A path may also start with an index when the root is a list. Keys holding
//! `.` or `[` can be double-quoted: `a."minecraft:x.y"`.
//!
//! ```
//! use nbtree::{path, snbt::decode_text, Value};
//!
//! let mut root = decode_text("{a:{}}").unwrap().into_value();
//! path::replace(&mut root, "a.c", Value::Int(7)).unwrap();
//!
//! let c = path::resolve(&root, "a.c").unwrap();
//! assert_eq!(c.name(), "c");
//! assert_eq!(c.value(), &Value::Int(7));
//! ```

use std::str::FromStr;

use log::debug;

use crate::{
    error::{Error, Result},
    NamedTag, Tag, Value,
};

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A key of a compound.
    Key(String),
    /// An element of a list or array. Kept signed so that a negative index
    /// reports as out of bounds rather than failing to parse.
    Index(i64),
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// A parsed path. An empty path refers to the root itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = s;

        while let Some(c) = rest.chars().next() {
            match c {
                '.' => {
                    rest = &rest[1..];
                    if rest.is_empty() || rest.starts_with(['.', ']']) {
                        return Err(Error::path_syntax(s, "empty key"));
                    }
                }
                '[' => {
                    let end = rest
                        .find(']')
                        .ok_or_else(|| Error::path_syntax(s, "unclosed '['"))?;
                    let index = rest[1..end]
                        .trim()
                        .parse()
                        .map_err(|_| Error::path_syntax(s, "index is not an integer"))?;
                    segments.push(Segment::Index(index));
                    rest = &rest[end + 1..];
                }
                '"' => {
                    let end = rest[1..]
                        .find('"')
                        .ok_or_else(|| Error::path_syntax(s, "unclosed quote"))?;
                    segments.push(Segment::Key(rest[1..end + 1].to_owned()));
                    rest = &rest[end + 2..];
                }
                ']' => return Err(Error::path_syntax(s, "unexpected ']'")),
                _ => {
                    let end = rest.find(['.', '[', ']']).unwrap_or(rest.len());
                    segments.push(Segment::Key(rest[..end].to_owned()));
                    rest = &rest[end..];
                }
            }
        }

        Ok(Path { segments })
    }
}

/// Fetch a copy of the tag at `path`. The result is named after the last key
/// in the path, or unnamed if the path ends in an index.
pub fn resolve(root: &Value, path: &str) -> Result<NamedTag> {
    let path: Path = path.parse()?;
    let name = match path.segments.last() {
        Some(Segment::Key(key)) => key.as_str(),
        _ => "",
    };

    let value = match walk(root, &path.segments)? {
        Found::Child(value) => value.clone(),
        Found::Element(value) => value,
    };
    Ok(NamedTag::new(name, value))
}

/// Set the tag at `path` to `value`, returning what was there before.
///
/// The last segment may name a compound key that does not exist yet, in
/// which case it is appended to the compound. An existing key keeps its
/// position. A final index must already exist; lists and arrays are never
/// grown.
pub fn replace(root: &mut Value, path: &str, value: impl Into<Value>) -> Result<Option<Value>> {
    let value = value.into();
    let parsed: Path = path.parse()?;
    debug!("replacing {} with a {}", path, value.tag());
    let (last, parents) = parsed
        .segments
        .split_last()
        .ok_or_else(|| Error::path_syntax(path, "cannot replace the root"))?;

    let mut current = root;
    for segment in parents {
        current = match (segment, current) {
            (Segment::Key(key), Value::Compound(c)) => {
                c.get_mut(key).ok_or_else(|| Error::path_not_found(key))?
            }
            (Segment::Index(index), Value::List(l)) => {
                let len = l.len();
                let i = checked_index(*index, len)?;
                l.get_mut(i)
                    .ok_or_else(|| Error::index_out_of_bounds(*index, len))?
            }
            (segment, other) => return Err(descend_error(segment, other)),
        };
    }

    match (last, current) {
        (Segment::Key(key), Value::Compound(c)) => c.insert(key.clone(), value),
        (Segment::Index(index), Value::List(l)) => {
            let i = checked_index(*index, l.len())?;
            l.set(i, value).map(Some)
        }
        (Segment::Index(index), Value::ByteArray(v)) => {
            let i = checked_index(*index, v.len())?;
            match value {
                Value::Byte(b) => Ok(Some(Value::Byte(std::mem::replace(&mut v[i], b)))),
                other => Err(element_mismatch(Tag::ByteArray, &other)),
            }
        }
        (Segment::Index(index), Value::IntArray(v)) => {
            let i = checked_index(*index, v.len())?;
            match value {
                Value::Int(n) => Ok(Some(Value::Int(std::mem::replace(&mut v[i], n)))),
                other => Err(element_mismatch(Tag::IntArray, &other)),
            }
        }
        (Segment::Index(index), Value::LongArray(v)) => {
            let i = checked_index(*index, v.len())?;
            match value {
                Value::Long(n) => Ok(Some(Value::Long(std::mem::replace(&mut v[i], n)))),
                other => Err(element_mismatch(Tag::LongArray, &other)),
            }
        }
        (segment, other) => Err(descend_error(segment, other)),
    }
}

/// The children of the tag at `path` with their tags. Compound children are
/// listed by key, list and array elements as `[index]`.
pub fn keys(root: &Value, path: &str) -> Result<Vec<(String, Tag)>> {
    let path: Path = path.parse()?;
    let target = match walk(root, &path.segments)? {
        Found::Child(value) => value,
        Found::Element(value) => {
            return Err(Error::path_type_mismatch(format!(
                "{} has no keys",
                value.tag()
            )))
        }
    };

    let indexed = |len: usize, tag: Tag| -> Vec<(String, Tag)> {
        (0..len).map(|i| (format!("[{}]", i), tag)).collect()
    };

    Ok(match target {
        Value::Compound(c) => c.iter().map(|(k, v)| (k.to_owned(), v.tag())).collect(),
        Value::List(l) => indexed(l.len(), l.element_tag()),
        Value::ByteArray(v) => indexed(v.len(), Tag::Byte),
        Value::IntArray(v) => indexed(v.len(), Tag::Int),
        Value::LongArray(v) => indexed(v.len(), Tag::Long),
        other => {
            return Err(Error::path_type_mismatch(format!(
                "{} has no keys",
                other.tag()
            )))
        }
    })
}

/// Where a walk ended: a tag in the tree, or an element of a primitive array
/// that only exists once built.
enum Found<'a> {
    Child(&'a Value),
    Element(Value),
}

fn walk<'a>(root: &'a Value, segments: &[Segment]) -> Result<Found<'a>> {
    let mut current = root;

    for (i, segment) in segments.iter().enumerate() {
        let element = match (segment, current) {
            (Segment::Key(key), Value::Compound(c)) => {
                current = c.get(key).ok_or_else(|| Error::path_not_found(key))?;
                continue;
            }
            (Segment::Index(index), Value::List(l)) => {
                let at = checked_index(*index, l.len())?;
                current = l
                    .get(at)
                    .ok_or_else(|| Error::index_out_of_bounds(*index, l.len()))?;
                continue;
            }
            (Segment::Index(index), Value::ByteArray(v)) => {
                Value::Byte(v[checked_index(*index, v.len())?])
            }
            (Segment::Index(index), Value::IntArray(v)) => {
                Value::Int(v[checked_index(*index, v.len())?])
            }
            (Segment::Index(index), Value::LongArray(v)) => {
                Value::Long(v[checked_index(*index, v.len())?])
            }
            (segment, other) => return Err(descend_error(segment, other)),
        };

        // Array elements are scalars, so nothing can follow them.
        return match segments.get(i + 1) {
            None => Ok(Found::Element(element)),
            Some(next) => Err(descend_error(next, &element)),
        };
    }

    Ok(Found::Child(current))
}

fn checked_index(index: i64, len: usize) -> Result<usize> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or_else(|| Error::index_out_of_bounds(index, len))
}

fn descend_error(segment: &Segment, found: &Value) -> Error {
    let what = match segment {
        Segment::Key(_) => "key",
        Segment::Index(_) => "index",
    };
    Error::path_type_mismatch(format!(
        "cannot access {} {} on {} tag",
        what,
        segment,
        found.tag()
    ))
}

fn element_mismatch(array: Tag, found: &Value) -> Error {
    Error::path_type_mismatch(format!("{} cannot hold a {}", array, found.tag()))
}
