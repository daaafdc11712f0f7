//! Error type describing why a character could not be read

use std::fmt;
use std::io;

use thiserror::Error;

/// Failure encountered while reading a single character
///
/// Each variant corresponds to one point at which a read may fail.
/// [`CharReader::read_char`] reports every variant the same way: a
/// diagnostic line followed by `None`.
///
/// [`CharReader::read_char`]: ../reader/struct.CharReader.html#method.read_char
#[derive(Debug, Error)]
pub enum ReadError {
    /// The operating system could not be identified
    #[error("failed to identify the operating system: {0}")]
    PlatformQuery(#[source] io::Error),
    /// The operating system was identified, but is not supported
    #[error("operating system {0:?} is not supported")]
    Unsupported(String),
    /// A required input primitive does not exist on this host
    #[error("{0} is not available on this system")]
    Unavailable(&'static str),
    /// An input primitive was invoked and failed
    #[error("failed to {step}: {source}")]
    Primitive {
        /// Operation which failed
        step: Step,
        /// Underlying operating system error
        #[source]
        source: io::Error,
    },
    /// Input was closed before any byte arrived
    #[error("end of input reached before a character was read")]
    EndOfInput,
    /// The input does not form a valid UTF-8 character
    ///
    /// Contains the first byte of the rejected input.
    #[error("input byte {0:#04x} does not begin a valid UTF-8 character")]
    Decode(u8),
}

impl ReadError {
    pub(crate) fn primitive(step: Step, source: io::Error) -> ReadError {
        ReadError::Primitive{step, source}
    }
}

/// Input primitive operation named in [`ReadError::Primitive`]
///
/// [`ReadError::Primitive`]: enum.ReadError.html#variant.Primitive
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Step {
    /// Capturing the current terminal attributes
    GetAttributes,
    /// Applying non-canonical, no-echo attributes
    SetAttributes,
    /// Reading input bytes from the terminal
    ReadInput,
    /// Restoring the captured terminal attributes
    RestoreAttributes,
    /// Reading one keystroke from the console
    ReadKeystroke,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Step::GetAttributes => "read terminal attributes",
            Step::SetAttributes => "set terminal attributes",
            Step::ReadInput => "read from standard input",
            Step::RestoreAttributes => "restore terminal attributes",
            Step::ReadKeystroke => "read console keystroke",
        })
    }
}

/// Decodes a single input byte as UTF-8.
///
/// Only bytes which are complete UTF-8 sequences on their own (ASCII) can
/// be decoded; leading bytes of multi-byte sequences produce
/// `ReadError::Decode`.
pub fn decode_byte(byte: u8) -> Result<char, ReadError> {
    decode_utf8(&[byte])
}

/// Decodes one complete UTF-8 sequence.
///
/// Returns `ReadError::Decode` if `bytes` is not exactly one valid
/// UTF-8 encoded character.
pub fn decode_utf8(bytes: &[u8]) -> Result<char, ReadError> {
    let first = bytes.first().cloned().unwrap_or(0);

    let s = std::str::from_utf8(bytes)
        .map_err(|_| ReadError::Decode(first))?;

    let mut chars = s.chars();

    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(ReadError::Decode(first)),
    }
}

/// Returns the length of the UTF-8 sequence introduced by `lead`,
/// or `None` if `lead` cannot begin a sequence.
pub fn utf8_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7f => Some(1),
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}
