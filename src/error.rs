//! Contains the Error and Result type used by the codecs and the path
//! navigator.

use crate::Tag;

/// Various errors that can occur while decoding, encoding or walking a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Any other errors. Users should not match on this variant and should
    /// instead use a wildcard `_`. Errors in this category may be moved to new variants.
    Other,

    /// A binary tag id outside of 0..=12.
    UnknownTagKind(u8),

    /// Input ended part way through some NBT value.
    TruncatedInput,

    /// A length prefix was negative or could not fit the format.
    InvalidLength,

    /// Expected unicode data but was not valid. Contained bytes are the
    /// invalid data.
    Nonunicode(Vec<u8>),

    /// SNBT did not follow the grammar. `pos` is the byte offset into the
    /// text where the problem was found.
    TextSyntax { pos: usize },

    /// Nesting went beyond the configured maximum depth.
    DepthExceeded,

    /// A list was given an element that does not match its element tag.
    ListElementMismatch { expected: Tag, found: Tag },

    /// A path string could not be parsed.
    PathSyntax,

    /// A path segment was applied to a tag of the wrong kind, eg a key on a
    /// list.
    PathTypeMismatch,

    /// A compound key in a path does not exist.
    PathNotFound,

    /// A list or array index in a path is negative or past the end.
    IndexOutOfBounds { index: i64, len: usize },
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub(crate) fn bespoke(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Other,
        }
    }

    pub(crate) fn invalid_tag(tag: u8) -> Self {
        Self {
            msg: format!("invalid nbt tag value: {}", tag),
            kind: ErrorKind::UnknownTagKind(tag),
        }
    }

    pub(crate) fn unexpected_eof() -> Self {
        Self {
            msg: "eof: unexpectedly ran out of input".into(),
            kind: ErrorKind::TruncatedInput,
        }
    }

    pub(crate) fn invalid_length(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::InvalidLength,
        }
    }

    pub(crate) fn nonunicode(data: &[u8]) -> Self {
        Self {
            msg: format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(data)
            ),
            kind: ErrorKind::Nonunicode(data.to_vec()),
        }
    }

    pub(crate) fn syntax(pos: usize, msg: impl std::fmt::Display) -> Self {
        Self {
            msg: format!("invalid snbt at {}: {}", pos, msg),
            kind: ErrorKind::TextSyntax { pos },
        }
    }

    pub(crate) fn depth_exceeded(max: usize) -> Self {
        Self {
            msg: format!("nesting deeper than {} levels", max),
            kind: ErrorKind::DepthExceeded,
        }
    }

    pub(crate) fn list_mismatch(expected: Tag, found: Tag) -> Self {
        Self {
            msg: format!("list of {} cannot hold a {}", expected, found),
            kind: ErrorKind::ListElementMismatch { expected, found },
        }
    }

    pub(crate) fn path_syntax(path: &str, msg: &str) -> Self {
        Self {
            msg: format!("invalid path '{}': {}", path, msg),
            kind: ErrorKind::PathSyntax,
        }
    }

    pub(crate) fn path_type_mismatch(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::PathTypeMismatch,
        }
    }

    pub(crate) fn path_not_found(key: &str) -> Self {
        Self {
            msg: format!("tag not found: {}", key),
            kind: ErrorKind::PathNotFound,
        }
    }

    pub(crate) fn index_out_of_bounds(index: i64, len: usize) -> Self {
        Self {
            msg: format!("index {} out of bounds for length {}", index, len),
            kind: ErrorKind::IndexOutOfBounds { index, len },
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self {
                msg: e.to_string(),
                kind: ErrorKind::TruncatedInput,
            },
            _ => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Other,
            },
        }
    }
}
