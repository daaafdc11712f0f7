//! Unix terminal primitives
//!
//! Reading a single character on Unix consists of placing the terminal in
//! non-canonical mode with echo disabled, reading one UTF-8 encoded
//! character, and restoring
//! the terminal attributes which were in effect beforehand.
//! [`RawMode`] holds the captured attributes for the duration of the read
//! and restores them on every exit path.
//!
//! [`RawMode`]: struct.RawMode.html

use std::fmt;
use std::fs::File;
use std::io;
use std::os::unix::io::{AsRawFd, FromRawFd, IntoRawFd, RawFd};
use std::path::Path;

use libc::STDIN_FILENO;
use log::{debug, warn};

use nix::errno::Errno;
use nix::sys::termios::{
    cfgetispeed, cfgetospeed, tcgetattr, tcsetattr,
    LocalFlags, SetArg, Termios,
};
use nix::unistd::read;

use crate::error::{decode_utf8, utf8_len, ReadError, Step};

/// Terminal device operations required to read a single character
pub trait Tty {
    /// Returns the current terminal attributes.
    fn get_attr(&self) -> io::Result<Termios>;

    /// Applies terminal attributes.
    fn set_attr(&self, when: SetArg, tio: &Termios) -> io::Result<()>;

    /// Reads bytes from the terminal, blocking until at least one is available
    /// or input is closed.
    fn read(&self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Terminal device identified by a file descriptor
pub struct FdTty {
    fd: RawFd,
    owned_fd: bool,
}

impl FdTty {
    /// Returns the terminal connected to standard input.
    pub fn stdin() -> FdTty {
        FdTty{fd: STDIN_FILENO, owned_fd: false}
    }

    /// Opens the terminal device at the given path, e.g. `/dev/tty`.
    ///
    /// The file descriptor is closed when the `FdTty` is dropped.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<FdTty> {
        let fd = open_read(path)?;
        Ok(FdTty{fd, owned_fd: true})
    }

    /// Uses an existing file descriptor without taking ownership of it.
    ///
    /// The descriptor must remain open for the lifetime of the `FdTty`.
    pub fn from_fd(fd: RawFd) -> FdTty {
        FdTty{fd, owned_fd: false}
    }
}

impl AsRawFd for FdTty {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl fmt::Debug for FdTty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FdTty")
            .field("fd", &self.fd)
            .field("owned_fd", &self.owned_fd)
            .finish()
    }
}

impl Tty for FdTty {
    fn get_attr(&self) -> io::Result<Termios> {
        tcgetattr(self.fd).map_err(nix_to_io)
    }

    fn set_attr(&self, when: SetArg, tio: &Termios) -> io::Result<()> {
        tcsetattr(self.fd, when, tio).map_err(nix_to_io)
    }

    fn read(&self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match read(self.fd, buf) {
                Err(Errno::EINTR) => continue,
                r => return r.map_err(nix_to_io),
            }
        }
    }
}

impl Drop for FdTty {
    fn drop(&mut self) {
        if self.owned_fd {
            unsafe { close_fd(self.fd); }
        }
    }
}

/// Snapshot of the attributes of a terminal device
///
/// Two snapshots are equal when their input, output, control and local
/// flags, control characters and line speeds are all equal.
#[derive(Clone, Debug)]
pub struct TerminalState(Termios);

impl TerminalState {
    /// Captures the current attributes of a terminal.
    pub fn capture<T: Tty + ?Sized>(tty: &T) -> Result<TerminalState, ReadError> {
        tty.get_attr()
            .map(TerminalState)
            .map_err(|e| ReadError::primitive(Step::GetAttributes, e))
    }

    /// Returns the captured attributes.
    pub fn termios(&self) -> &Termios {
        &self.0
    }

    /// Returns a copy of the captured attributes with canonical mode and
    /// echo disabled. All other settings are unchanged.
    pub fn non_canonical(&self) -> Termios {
        let mut tio = self.0.clone();

        // Canonical mode delivers input only after a newline;
        // echo writes input back to the terminal.
        tio.local_flags.remove(LocalFlags::ICANON | LocalFlags::ECHO);
        tio
    }
}

impl From<Termios> for TerminalState {
    fn from(tio: Termios) -> TerminalState {
        TerminalState(tio)
    }
}

impl PartialEq for TerminalState {
    fn eq(&self, other: &TerminalState) -> bool {
        let (a, b) = (&self.0, &other.0);

        a.input_flags == b.input_flags &&
            a.output_flags == b.output_flags &&
            a.control_flags == b.control_flags &&
            a.local_flags == b.local_flags &&
            a.control_chars == b.control_chars &&
            cfgetispeed(a) == cfgetispeed(b) &&
            cfgetospeed(a) == cfgetospeed(b)
    }
}

impl Eq for TerminalState {}

/// Holds a terminal in non-canonical, no-echo mode
///
/// The attributes captured by [`enter`] are restored when [`restore`] is
/// called or when the `RawMode` is dropped, whichever happens first.
/// Both changes are applied with `TCSADRAIN`, waiting for pending output
/// to be transmitted first.
///
/// [`enter`]: #method.enter
/// [`restore`]: #method.restore
pub struct RawMode<'a, T: Tty + ?Sized> {
    tty: &'a T,
    saved: TerminalState,
    restored: bool,
}

impl<'a, T: Tty + ?Sized> RawMode<'a, T> {
    /// Captures the current terminal attributes, then disables canonical
    /// mode and echo.
    ///
    /// If applying the new attributes fails, the captured attributes are
    /// reapplied before the error is returned.
    pub fn enter(tty: &'a T) -> Result<RawMode<'a, T>, ReadError> {
        let saved = TerminalState::capture(tty)?;
        let tio = saved.non_canonical();

        let mode = RawMode{tty, saved, restored: false};

        tty.set_attr(SetArg::TCSADRAIN, &tio)
            .map_err(|e| ReadError::primitive(Step::SetAttributes, e))?;

        debug!("terminal switched to non-canonical mode");

        Ok(mode)
    }

    /// Returns the attributes which will be restored.
    pub fn saved_state(&self) -> &TerminalState {
        &self.saved
    }

    /// Restores the captured terminal attributes.
    pub fn restore(mut self) -> Result<(), ReadError> {
        self.restored = true;
        self.apply_saved()
    }

    fn apply_saved(&self) -> Result<(), ReadError> {
        self.tty.set_attr(SetArg::TCSADRAIN, self.saved.termios())
            .map_err(|e| ReadError::primitive(Step::RestoreAttributes, e))?;

        debug!("terminal attributes restored");
        Ok(())
    }
}

impl<'a, T: Tty + ?Sized> Drop for RawMode<'a, T> {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(e) = self.apply_saved() {
                warn!("{}", e);
            }
        }
    }
}

/// Reads a single character from a terminal without waiting for a newline
/// and without echoing it.
///
/// The leading byte determines how many continuation bytes are read to
/// complete one UTF-8 encoded character; no input beyond that character is
/// consumed. An invalid leading byte or sequence results in
/// `ReadError::Decode`.
/// Terminal attributes are restored before this function returns, whether
/// or not the read succeeded.
pub fn read_char<T: Tty + ?Sized>(tty: &T) -> Result<char, ReadError> {
    let mode = RawMode::enter(tty)?;

    let res = read_utf8(tty);

    match (res, mode.restore()) {
        (Ok(ch), Ok(())) => Ok(ch),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(restore_err)) => {
            warn!("{}", restore_err);
            Err(e)
        }
    }
}

fn read_utf8<T: Tty + ?Sized>(tty: &T) -> Result<char, ReadError> {
    let mut buf = [0; 4];

    buf[0] = read_byte(tty)?;
    let len = utf8_len(buf[0]).ok_or(ReadError::Decode(buf[0]))?;

    for b in &mut buf[1..len] {
        *b = read_byte(tty)?;
    }

    decode_utf8(&buf[..len])
}

fn read_byte<T: Tty + ?Sized>(tty: &T) -> Result<u8, ReadError> {
    let mut buf = [0; 1];

    match tty.read(&mut buf) {
        Ok(0) => Err(ReadError::EndOfInput),
        Ok(_) => Ok(buf[0]),
        Err(e) => Err(ReadError::primitive(Step::ReadInput, e)),
    }
}

unsafe fn close_fd(fd: RawFd) {
    drop(File::from_raw_fd(fd));
}

fn open_read<P: AsRef<Path>>(path: P) -> io::Result<RawFd> {
    use std::fs::OpenOptions;

    let file = OpenOptions::new()
        .read(true)
        .open(path)?;

    Ok(file.into_raw_fd())
}

pub(crate) fn nix_to_io(e: nix::Error) -> io::Error {
    io::Error::from_raw_os_error(e as i32)
}
