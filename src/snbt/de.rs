use log::trace;

use crate::{
    error::{Error, Result},
    Compound, DecodeOptions, List, Tag, Value,
};

use super::parser;

/// Recursive descent over SNBT text. Every production takes the byte offset
/// it starts at and returns what it produced along with how many bytes it
/// consumed, so the enclosing production can advance past it.
pub(crate) struct Parser<'a> {
    src: &'a str,
    max_depth: usize,
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

// A number or bare word must be followed by one of these to count as a
// complete token.
fn ends_token(rest: &str) -> bool {
    match rest.as_bytes().first() {
        None => true,
        Some(b) => is_whitespace(*b) || matches!(b, b',' | b']' | b'}'),
    }
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str, opts: &DecodeOptions) -> Self {
        Self {
            src,
            max_depth: opts.max_depth,
        }
    }

    /// Parse the whole input as one value. Only whitespace may follow it.
    pub fn parse_root(&self) -> Result<Value> {
        let (value, len) = self.value(0, 0, None)?;
        let end = self.skip_ws(len);
        if end != self.src.len() {
            return Err(Error::syntax(end, "input wasn't fully consumed"));
        }
        Ok(value)
    }

    fn peek(&self, at: usize) -> Option<u8> {
        self.src.as_bytes().get(at).copied()
    }

    fn skip_ws(&self, mut at: usize) -> usize {
        while self.peek(at).map_or(false, is_whitespace) {
            at += 1;
        }
        at
    }

    fn enter(&self, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(Error::depth_exceeded(self.max_depth));
        }
        Ok(depth)
    }

    /// Any value. `force` is the element tag of an enclosing typed array and
    /// decides the tag of a numeric literal regardless of its suffix.
    fn value(&self, at: usize, depth: usize, force: Option<Tag>) -> Result<(Value, usize)> {
        let start = self.skip_ws(at);
        let (value, len) = match self.peek(start) {
            None => return Err(Error::syntax(start, "unexpected end of input")),
            Some(b'[') => self.array(start, depth)?,
            Some(b'{') => self.compound(start, depth)?,
            Some(quote @ (b'"' | b'\'')) => {
                let (s, len) = self.quoted(start, quote)?;
                (Value::String(s), len)
            }
            Some(_) => self.scalar(start, force)?,
        };

        trace!("{:depth$}{} at {}", "", value.tag(), start, depth = depth * 2);
        Ok((value, start - at + len))
    }

    /// `[B;...]`, `[I;...]`, `[L;...]` or a generic list.
    fn array(&self, start: usize, depth: usize) -> Result<(Value, usize)> {
        let depth = self.enter(depth)?;

        let force = match &self.src.as_bytes()[start + 1..] {
            [b'B', b';', ..] => Some(Tag::Byte),
            [b'I', b';', ..] => Some(Tag::Int),
            [b'L', b';', ..] => Some(Tag::Long),
            _ => None,
        };

        let mut items = match force {
            Some(Tag::Byte) => Items::Bytes(Vec::new()),
            Some(Tag::Int) => Items::Ints(Vec::new()),
            Some(Tag::Long) => Items::Longs(Vec::new()),
            _ => Items::List(List::default()),
        };

        let mut pos = start + 1 + if force.is_some() { 2 } else { 0 };
        pos = self.skip_ws(pos);

        if self.peek(pos) != Some(b']') {
            loop {
                let element_start = self.skip_ws(pos);
                let (value, len) = self.value(pos, depth, force)?;
                items
                    .push(value)
                    .map_err(|msg| Error::syntax(element_start, msg))?;

                pos = self.skip_ws(pos + len);
                match self.peek(pos) {
                    Some(b',') => pos += 1,
                    Some(b']') => break,
                    None => return Err(Error::syntax(pos, "expected array end")),
                    Some(_) => return Err(Error::syntax(pos, "expected comma")),
                }
            }
        }

        Ok((items.into_value(), pos + 1 - start))
    }

    fn compound(&self, start: usize, depth: usize) -> Result<(Value, usize)> {
        let depth = self.enter(depth)?;
        let mut compound = Compound::new();

        let mut pos = self.skip_ws(start + 1);
        if self.peek(pos) == Some(b'}') {
            return Ok((Value::Compound(compound), pos + 1 - start));
        }

        loop {
            let (key, len) = self.key(pos)?;
            pos = self.skip_ws(pos + len);
            if self.peek(pos) != Some(b':') {
                return Err(Error::syntax(pos, "expected colon"));
            }

            let (value, len) = self.value(pos + 1, depth, None)?;
            compound.insert(key, value)?;

            pos = self.skip_ws(pos + 1 + len);
            match self.peek(pos) {
                Some(b',') => pos += 1,
                Some(b'}') => break,
                None => return Err(Error::syntax(pos, "expected compound tag end")),
                Some(_) => return Err(Error::syntax(pos, "expected comma")),
            }
        }

        Ok((Value::Compound(compound), pos + 1 - start))
    }

    /// A compound key: quoted, or everything up to the colon with trailing
    /// whitespace removed.
    fn key(&self, at: usize) -> Result<(String, usize)> {
        let start = self.skip_ws(at);
        match self.peek(start) {
            Some(quote @ (b'"' | b'\'')) => {
                let (key, len) = self.quoted(start, quote)?;
                Ok((key, start - at + len))
            }
            _ => {
                let mut end = start;
                loop {
                    match self.peek(end) {
                        Some(b':') => break,
                        Some(b'{' | b'}' | b'[' | b']' | b',' | b'"' | b'\'') | None => {
                            return Err(Error::syntax(end, "malformed key"));
                        }
                        Some(_) => end += 1,
                    }
                }

                let key = self.src[start..end].trim_end_matches([' ', '\t', '\r', '\n']);
                if key.is_empty() {
                    return Err(Error::syntax(start, "malformed key"));
                }
                Ok((key.to_owned(), end - at))
            }
        }
    }

    /// A string in `quote`s. A backslash makes the next character literal,
    /// so `\"` and `\\` both work.
    fn quoted(&self, start: usize, quote: u8) -> Result<(String, usize)> {
        let body = &self.src[start + 1..];
        let mut owned = String::new();
        let mut chars = body.char_indices();

        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some((_, escaped)) => owned.push(escaped),
                    None => break,
                }
            } else if c as u32 == quote as u32 {
                // opening quote, body, closing quote
                return Ok((owned, 1 + i + 1));
            } else {
                owned.push(c);
            }
        }

        Err(Error::syntax(start, "unterminated string"))
    }

    /// A numeric literal, or failing that a bare word.
    fn scalar(&self, start: usize, force: Option<Tag>) -> Result<(Value, usize)> {
        let input = &self.src[start..];

        if let Ok((rest, (text, suffix))) = parser::number(input) {
            if ends_token(rest) {
                let value = number_value(text, suffix, force)
                    .map_err(|msg| Error::syntax(start, msg))?;
                return Ok((value, input.len() - rest.len()));
            }
        }

        if force.is_some() {
            return Err(Error::syntax(start, "expected a number"));
        }

        match parser::bare_word(input) {
            Ok((rest, word)) if ends_token(rest) => {
                let value = match word {
                    "true" => Value::Byte(1),
                    "false" => Value::Byte(0),
                    _ => Value::String(word.to_owned()),
                };
                Ok((value, word.len()))
            }
            _ => Err(Error::syntax(start, "invalid input")),
        }
    }
}

/// Choose the tag for a numeric literal and convert it, checking range.
fn number_value(
    text: &str,
    suffix: Option<char>,
    force: Option<Tag>,
) -> std::result::Result<Value, String> {
    let tag = match (force, suffix.map(|c| c.to_ascii_lowercase())) {
        (Some(tag), _) => tag,
        (None, Some('b')) => Tag::Byte,
        (None, Some('s')) => Tag::Short,
        (None, Some('l')) => Tag::Long,
        (None, Some('f')) => Tag::Float,
        (None, Some('d')) => Tag::Double,
        (None, _) if parser::is_integer(text) && text.parse::<i32>().is_ok() => Tag::Int,
        (None, _) => Tag::Double,
    };

    fn int<T: std::str::FromStr>(text: &str, tag: Tag) -> std::result::Result<T, String> {
        if !parser::is_integer(text) {
            return Err(format!("expected an integer for {}, found {}", tag, text));
        }
        text.parse()
            .map_err(|_| format!("{} out of range for {}", text, tag))
    }

    fn float<T: std::str::FromStr>(text: &str) -> std::result::Result<T, String> {
        text.parse().map_err(|_| format!("not a number: {}", text))
    }

    Ok(match tag {
        Tag::Byte => Value::Byte(int(text, tag)?),
        Tag::Short => Value::Short(int(text, tag)?),
        Tag::Int => Value::Int(int(text, tag)?),
        Tag::Long => Value::Long(int(text, tag)?),
        Tag::Float => Value::Float(float(text)?),
        Tag::Double => Value::Double(float(text)?),
        other => return Err(format!("{} is not a numeric tag", other)),
    })
}

/// Elements collected for a `[...]` production.
enum Items {
    Bytes(Vec<i8>),
    Ints(Vec<i32>),
    Longs(Vec<i64>),
    List(List),
}

impl Items {
    fn push(&mut self, value: Value) -> std::result::Result<(), String> {
        match (self, value) {
            (Items::Bytes(v), Value::Byte(b)) => v.push(b),
            (Items::Ints(v), Value::Int(i)) => v.push(i),
            (Items::Longs(v), Value::Long(l)) => v.push(l),
            (Items::List(list), value) => list.push(value).map_err(|e| e.to_string())?,
            (_, value) => return Err(format!("unexpected {} in typed array", value.tag())),
        }
        Ok(())
    }

    fn into_value(self) -> Value {
        match self {
            Items::Bytes(v) => Value::ByteArray(v),
            Items::Ints(v) => Value::IntArray(v),
            Items::Longs(v) => Value::LongArray(v),
            Items::List(list) => Value::List(list),
        }
    }
}
