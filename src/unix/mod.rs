use std::io;

use nix::sys::utsname::uname;

use crate::error::ReadError;
use crate::host::{Host, Keyboard};

use self::tty::{nix_to_io, FdTty, Tty};

pub mod tty;

/// Primitives of the Unix host process
///
/// The terminal is the one connected to standard input.
/// No console keystroke primitive exists on Unix.
#[derive(Debug)]
pub struct SystemHost {
    tty: FdTty,
}

impl SystemHost {
    /// Returns the primitives of the current process.
    pub fn new() -> SystemHost {
        SystemHost{tty: FdTty::stdin()}
    }
}

impl Default for SystemHost {
    fn default() -> SystemHost {
        SystemHost::new()
    }
}

impl Host for SystemHost {
    fn system_name(&self) -> io::Result<String> {
        system_name()
    }

    fn keyboard(&mut self) -> Result<&mut dyn Keyboard, ReadError> {
        Err(ReadError::Unavailable("console keystroke input (msvcrt)"))
    }

    fn terminal(&mut self) -> Result<&dyn Tty, ReadError> {
        Ok(&self.tty)
    }
}

/// Returns the `sysname` field reported by `uname`, e.g. `Linux` or `Darwin`.
pub fn system_name() -> io::Result<String> {
    let uts = uname().map_err(nix_to_io)?;
    Ok(uts.sysname().to_string_lossy().into_owned())
}
