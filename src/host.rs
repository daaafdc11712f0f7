//! Platform primitives consumed by `CharReader`

use std::io;

use crate::error::ReadError;

#[cfg(unix)]
use crate::unix::Tty;

/// Raw keystroke primitive
///
/// Returns one keypress immediately, without echo and without waiting
/// for a newline.
pub trait Keyboard {
    /// Blocks until a key is pressed and returns its byte value.
    fn getch(&mut self) -> io::Result<u8>;
}

/// Source of the primitives needed to read a single character
///
/// [`SystemHost`] provides the primitives of the running process.
/// Alternate implementations allow each platform branch to run
/// against substitute devices.
///
/// [`SystemHost`]: struct.SystemHost.html
pub trait Host {
    /// Returns the operating system identification string.
    fn system_name(&self) -> io::Result<String>;

    /// Returns the raw keystroke primitive used on Windows.
    ///
    /// Returns `ReadError::Unavailable` if no such primitive exists.
    fn keyboard(&mut self) -> Result<&mut dyn Keyboard, ReadError>;

    /// Returns the terminal device used on Unix.
    ///
    /// Returns `ReadError::Unavailable` if no terminal can be used.
    #[cfg(unix)]
    fn terminal(&mut self) -> Result<&dyn Tty, ReadError>;
}
