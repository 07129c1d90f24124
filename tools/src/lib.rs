//! The pieces of the `nbt` command line tool that do not touch the process:
//! loading and saving documents, and the interactive shell.

use std::error::Error;
use std::fmt::Display;
use std::io::{BufRead, Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, warn};
use nbtree::{binary, path, snbt, NamedTag, Value};

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

#[derive(Debug)]
struct ErrorMessage(String);
impl std::error::Error for ErrorMessage {}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn bail<T>(msg: impl Into<String>) -> Result<T> {
    Err(ErrorMessage(msg.into()).into())
}

/// Which decoder to read input with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Binary NBT, gzipped or not.
    Binary,
    /// SNBT text.
    Text,
}

/// How to write the final document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Snbt { pretty: bool },
    Json { pretty: bool },
    /// Gzipped binary NBT.
    Binary,
}

/// Decode a whole document. Binary input is decompressed first if it starts
/// with the gzip magic bytes.
pub fn load(data: &[u8], format: InputFormat) -> Result<NamedTag> {
    match format {
        InputFormat::Text => {
            let text = std::str::from_utf8(data)?;
            Ok(snbt::decode_text(text)?)
        }
        InputFormat::Binary => {
            let mut buf = vec![];
            let data = if data.starts_with(&[0x1f, 0x8b]) {
                GzDecoder::new(data).read_to_end(&mut buf)?;
                debug!("decompressed {} bytes to {}", data.len(), buf.len());
                &buf[..]
            } else {
                data
            };

            let (tag, consumed) = binary::decode_binary(data, 0)?;
            if consumed < data.len() {
                warn!("ignoring {} bytes after the root tag", data.len() - consumed);
            }
            Ok(tag)
        }
    }
}

/// Encode a document as gzipped binary NBT, the way it is stored on disk.
pub fn to_gzip_binary(tag: &NamedTag) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    binary::write_binary(&mut encoder, tag)?;
    Ok(encoder.finish()?)
}

pub fn render(tag: &NamedTag, format: OutputFormat) -> Result<Vec<u8>> {
    Ok(match format {
        OutputFormat::Snbt { pretty } => {
            let mut text = snbt::encode_text(tag.value(), pretty);
            text.push('\n');
            text.into_bytes()
        }
        OutputFormat::Json { pretty: true } => serde_json::to_vec_pretty(tag)?,
        OutputFormat::Json { pretty: false } => serde_json::to_vec(tag)?,
        OutputFormat::Binary => to_gzip_binary(tag)?,
    })
}

/// A line typed into the interactive shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Keys(String),
    Get(String),
    Set(String, Value),
    Help,
    Exit,
}

const HELP: &str = "\
commands:
  keys [path]          list the children of the tag at path
  get [path]           print the tag at path
  set <path> <snbt>    replace the tag at path with an SNBT value
  help                 show this message
  exit                 leave the shell";

/// Parse one line of shell input. Blank lines give `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (line, ""),
    };

    let command = match word {
        "keys" | "ls" => Command::Keys(rest.to_owned()),
        "get" => Command::Get(rest.to_owned()),
        "set" => {
            let (target, value) = match rest.split_once(char::is_whitespace) {
                Some(parts) => parts,
                None => return bail("usage: set <path> <snbt>"),
            };
            let value = snbt::decode_text(value.trim())?.into_value();
            Command::Set(target.to_owned(), value)
        }
        "help" | "?" => Command::Help,
        "exit" | "quit" => Command::Exit,
        other => return bail(format!("unknown command '{}', try help", other)),
    };

    Ok(Some(command))
}

/// Run a command against the tree, returning what to print.
pub fn execute(root: &mut Value, command: &Command, pretty: bool) -> Result<String> {
    Ok(match command {
        Command::Keys(at) => path::keys(root, at)?
            .into_iter()
            .map(|(name, tag)| format!("{}: {}", name, tag))
            .collect::<Vec<_>>()
            .join("\n"),
        Command::Get(at) => {
            let found = path::resolve(root, at)?;
            snbt::encode_text(found.value(), pretty)
        }
        Command::Set(at, value) => {
            path::replace(root, at, value.clone())?;
            format!("{} = {}", at, value)
        }
        Command::Help => HELP.to_owned(),
        Command::Exit => String::new(),
    })
}

/// Read commands from `input` until `exit` or end of input. Errors from a
/// command are printed and the shell carries on.
pub fn run_shell<R: BufRead, W: Write>(
    root: &mut Value,
    input: R,
    mut out: W,
    pretty: bool,
) -> Result<()> {
    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        let command = match parse_command(&line) {
            Ok(Some(Command::Exit)) => break,
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };

        match execute(root, &command, pretty) {
            Ok(text) if text.is_empty() => {}
            Ok(text) => writeln!(out, "{}", text)?,
            Err(e) => writeln!(out, "error: {}", e)?,
        }
    }

    writeln!(out)?;
    Ok(())
}
