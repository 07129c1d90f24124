use std::fmt::{self, Write};

use crate::{Compound, List, Value};

pub(crate) fn write_escaped_str<W: Write>(writer: &mut W, v: &str) -> fmt::Result {
    writer.write_char('"')?;
    let mut start = 0;
    for (i, byte) in v.bytes().enumerate() {
        if byte != b'"' && byte != b'\\' {
            continue;
        }
        if start < i {
            writer.write_str(&v[start..i])?;
        }
        if byte == b'"' {
            writer.write_str("\\\"")?;
        } else {
            writer.write_str("\\\\")?;
        }
        start = i + 1;
    }
    if start != v.len() {
        writer.write_str(&v[start..])?;
    }
    writer.write_char('"')
}

fn needs_quotes(key: &str) -> bool {
    key.is_empty()
        || key.chars().any(|c| {
            c.is_whitespace() || matches!(c, ':' | ',' | '"' | '\'' | '{' | '}' | '[' | ']')
        })
}

/// Writes values as SNBT. `depth` is how many containers deep the value being
/// written is, starting at 1 for the root, and sets the indent when pretty.
pub(crate) struct Writer<'w, W> {
    out: &'w mut W,
    pretty: bool,
}

impl<'w, W: Write> Writer<'w, W> {
    pub fn new(out: &'w mut W, pretty: bool) -> Self {
        Self { out, pretty }
    }

    pub fn value(&mut self, value: &Value, depth: usize) -> fmt::Result {
        match value {
            Value::End => Ok(()),
            Value::Byte(v) => self.int(*v, "b"),
            Value::Short(v) => self.int(*v, "s"),
            Value::Int(v) => self.int(*v, ""),
            Value::Long(v) => self.int(*v, "l"),
            Value::Float(v) => {
                let mut buffer = ryu::Buffer::new();
                self.out.write_str(buffer.format(*v))?;
                self.out.write_char('f')
            }
            Value::Double(v) => {
                let mut buffer = ryu::Buffer::new();
                self.out.write_str(buffer.format(*v))?;
                self.out.write_char('d')
            }
            Value::String(s) => write_escaped_str(&mut *self.out, s),
            Value::ByteArray(v) => self.array("[B;", v, "b", depth),
            Value::IntArray(v) => self.array("[I;", v, "", depth),
            Value::LongArray(v) => self.array("[L;", v, "l", depth),
            Value::List(list) => self.list(list, depth),
            Value::Compound(compound) => self.compound(compound, depth),
        }
    }

    fn int<I: itoa::Integer>(&mut self, v: I, suffix: &str) -> fmt::Result {
        let mut buffer = itoa::Buffer::new();
        self.out.write_str(buffer.format(v))?;
        self.out.write_str(suffix)
    }

    fn array<I: itoa::Integer + Copy>(
        &mut self,
        open: &str,
        items: &[I],
        suffix: &str,
        depth: usize,
    ) -> fmt::Result {
        self.out.write_str(open)?;
        for (i, item) in items.iter().enumerate() {
            self.separator(i, depth)?;
            self.int(*item, suffix)?;
        }
        self.close(items.is_empty(), depth, ']')
    }

    fn list(&mut self, list: &List, depth: usize) -> fmt::Result {
        self.out.write_char('[')?;
        for (i, item) in list.iter().enumerate() {
            self.separator(i, depth)?;
            self.value(item, depth + 1)?;
        }
        self.close(list.is_empty(), depth, ']')
    }

    fn compound(&mut self, compound: &Compound, depth: usize) -> fmt::Result {
        self.out.write_char('{')?;
        for (i, (key, item)) in compound.iter().enumerate() {
            self.separator(i, depth)?;
            if needs_quotes(key) {
                write_escaped_str(&mut *self.out, key)?;
            } else {
                self.out.write_str(key)?;
            }
            self.out.write_str(if self.pretty { ": " } else { ":" })?;
            self.value(item, depth + 1)?;
        }
        self.close(compound.is_empty(), depth, '}')
    }

    // Before the i-th element of a container: a comma after the first, and a
    // newline plus indent when pretty.
    fn separator(&mut self, i: usize, depth: usize) -> fmt::Result {
        if i > 0 {
            self.out.write_char(',')?;
        }
        if self.pretty {
            self.out.write_char('\n')?;
            self.indent(depth)?;
        }
        Ok(())
    }

    fn close(&mut self, empty: bool, depth: usize, bracket: char) -> fmt::Result {
        if self.pretty && !empty {
            self.out.write_char('\n')?;
            self.indent(depth - 1)?;
        }
        self.out.write_char(bracket)
    }

    fn indent(&mut self, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            self.out.write_str("  ")?;
        }
        Ok(())
    }
}
