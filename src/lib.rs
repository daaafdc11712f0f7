//! Platform-independent single character input
//!
//! [`getc`] reads one character from interactive input as soon as it is
//! typed, without waiting for a newline and without echoing it, then
//! returns the terminal to its previous state.
//!
//! On Unix systems, the terminal connected to standard input is placed in
//! non-canonical mode with echo disabled for the duration of the read.
//! On Windows, the console's raw keystroke primitive is used.
//!
//! Failures never escape to the caller: `getc` returns `None` and writes a
//! line describing the failure to standard output. [`CharReader`] offers
//! the same operation with configuration and an explicit [`ReadError`].
//!
//! ## Concurrency
//!
//! Reads are blocking and intended for a single caller. Concurrent reads
//! race on the terminal attributes of standard input.
//!
//! [`getc`]: fn.getc.html
//! [`CharReader`]: reader/struct.CharReader.html
//! [`ReadError`]: error/enum.ReadError.html

#![deny(missing_docs)]

pub use crate::error::{ReadError, Step};
pub use crate::host::{Host, Keyboard};
pub use crate::platform::PlatformKind;
pub use crate::reader::{getc, CharReader, ReadConfig};
pub use crate::sys::SystemHost;

pub mod error;
pub mod host;
pub mod platform;
pub mod reader;

#[cfg(test)]
mod testing;

#[cfg(unix)]
#[path = "unix/mod.rs"]
mod sys;

#[cfg(windows)]
#[path = "windows/mod.rs"]
mod sys;

#[cfg(unix)]
pub use crate::sys::tty as unix;

#[cfg(windows)]
pub use crate::sys::console as windows;
