//! Stringified NBT, the text form of NBT used in commands.
//!
//! ```
//! use nbtree::snbt::{decode_text, encode_text};
//!
//! let tag = decode_text(r#"{foo: 1, bar: "hi", nums: [B; 1b, 2b, 3b]}"#).unwrap();
//! assert_eq!(encode_text(tag.value(), false), r#"{foo:1,bar:"hi",nums:[B;1b,2b,3b]}"#);
//! ```
//!
//! Numbers take their tag from a suffix: `b`yte, `s`hort, `l`ong, `f`loat
//! and `d`ouble, in either case. Without a suffix a number is an Int if it is
//! a whole number that fits, and a Double otherwise. Inside `[B;`, `[I;` and
//! `[L;` arrays the array decides the tag of every element.
//!
//! The encoder writes floats with the shortest text that reads back to the
//! same value, which may use an exponent (`1e-7f`).

use std::fmt;

use crate::{error::Result, DecodeOptions, NamedTag, Value};

use self::de::Parser;
use self::ser::Writer;

mod de;
mod parser;
mod ser;

/// Decode SNBT text into an unnamed tag.
pub fn decode_text(text: &str) -> Result<NamedTag> {
    decode_text_with(text, &DecodeOptions::default())
}

/// Like [`decode_text`] with explicit options.
pub fn decode_text_with(text: &str, opts: &DecodeOptions) -> Result<NamedTag> {
    let value = Parser::new(text, opts).parse_root()?;
    Ok(NamedTag::new("", value))
}

/// Encode a value as SNBT. Compact output has no whitespace at all; pretty
/// output puts each element on its own line indented by two spaces per level.
pub fn encode_text(value: &Value, pretty: bool) -> String {
    if pretty {
        format!("{:#}", value)
    } else {
        value.to_string()
    }
}

/// Formats as compact SNBT, or pretty SNBT with the alternate flag (`{:#}`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = f.alternate();
        Writer::new(f, pretty).value(self, 1)
    }
}
