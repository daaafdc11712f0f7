//! Reads a single character from interactive input

use std::io::{self, Write};

use log::debug;

use crate::error::{decode_byte, ReadError, Step};
use crate::host::Host;
use crate::platform::PlatformKind;
use crate::sys::SystemHost;

/// Configures the behavior of a [`CharReader`]
///
/// This struct implements the [`Default`] trait, providing default
/// values for all options.
///
/// To override only some options while using the remaining default values,
/// one may use the following construct:
///
/// ```no_run
/// use getc::{CharReader, ReadConfig};
///
/// let reader = CharReader::with_config(ReadConfig{
///     diagnostics: false,
///     .. ReadConfig::default()
/// });
/// ```
///
/// [`CharReader`]: struct.CharReader.html
/// [`Default`]: https://doc.rust-lang.org/std/default/trait.Default.html
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReadConfig {
    /// Operating system identification string used in place of the one
    /// reported by the host
    ///
    /// Default is `None`.
    pub system_name: Option<String>,
    /// Whether to write a diagnostic line to standard output when a
    /// character cannot be read
    ///
    /// Default is `true`.
    pub diagnostics: bool,
}

impl Default for ReadConfig {
    fn default() -> ReadConfig {
        ReadConfig{
            system_name: None,
            diagnostics: true,
        }
    }
}

/// Reads one character at a time from interactive input, without waiting
/// for a newline and without echo
///
/// On Unix systems (Linux, Darwin and the BSDs), the terminal connected to
/// standard input is switched to non-canonical mode with echo disabled for
/// the duration of the read; its previous attributes are restored
/// afterward, whether or not the read succeeded.
///
/// On Windows, the console's raw keystroke primitive is used and the
/// console mode is not modified.
///
/// On Unix, one complete UTF-8 encoded character is read. On Windows, only
/// characters encoded in a single byte are supported.
///
/// # Concurrency
///
/// Reads block the calling thread. Concurrent reads from multiple threads
/// race on the terminal attributes of standard input and may leave them
/// modified.
#[derive(Clone, Debug, Default)]
pub struct CharReader {
    config: ReadConfig,
}

impl CharReader {
    /// Creates a `CharReader` with the default configuration.
    pub fn new() -> CharReader {
        CharReader::default()
    }

    /// Creates a `CharReader` with the given configuration.
    pub fn with_config(config: ReadConfig) -> CharReader {
        CharReader{config}
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ReadConfig {
        &self.config
    }

    /// Reads a single character.
    ///
    /// Returns `None` if no character could be read. Unless disabled by
    /// configuration, a line describing the failure is written to
    /// standard output.
    pub fn read_char(&self) -> Option<char> {
        self.read_char_from(&mut SystemHost::new(), &mut io::stdout())
    }

    /// Reads a single character, returning the reason for any failure.
    ///
    /// No diagnostics are written.
    pub fn try_read_char(&self) -> Result<char, ReadError> {
        self.try_read_char_from(&mut SystemHost::new())
    }

    /// Reads a single character using the given primitives, writing
    /// diagnostics to `out`.
    pub fn read_char_from<H, W>(&self, host: &mut H, out: &mut W) -> Option<char>
            where H: Host + ?Sized, W: Write + ?Sized {
        match self.try_read_char_from(host) {
            Ok(ch) => Some(ch),
            Err(e) => {
                if self.config.diagnostics {
                    // A failure to report is not itself reported
                    let _ = writeln!(out, "getc: {}", e);
                    let _ = out.flush();
                }
                None
            }
        }
    }

    /// Reads a single character using the given primitives.
    pub fn try_read_char_from<H>(&self, host: &mut H) -> Result<char, ReadError>
            where H: Host + ?Sized {
        let name = match self.config.system_name {
            Some(ref name) => name.clone(),
            None => host.system_name().map_err(ReadError::PlatformQuery)?,
        };

        let kind = PlatformKind::from_system_name(&name);

        debug!("system {:?} identified as {:?}", name, kind);

        match kind {
            PlatformKind::Windows => read_keystroke(host),
            PlatformKind::PosixLike => read_terminal(host),
            PlatformKind::Unsupported => Err(ReadError::Unsupported(name)),
        }
    }
}

/// Reads a single character from standard input without waiting for a
/// newline and without echo.
///
/// Returns `None` and writes a diagnostic line to standard output if no
/// character could be read.
///
/// This is equivalent to `CharReader::new().read_char()`.
///
/// # Examples
///
/// ```no_run
/// if let Some(ch) = getc::getc() {
///     println!("You pressed: {}", ch);
/// }
/// ```
pub fn getc() -> Option<char> {
    CharReader::new().read_char()
}

fn read_keystroke<H: Host + ?Sized>(host: &mut H) -> Result<char, ReadError> {
    let keyboard = host.keyboard()?;

    let byte = keyboard.getch()
        .map_err(|e| ReadError::primitive(Step::ReadKeystroke, e))?;

    decode_byte(byte)
}

#[cfg(unix)]
fn read_terminal<H: Host + ?Sized>(host: &mut H) -> Result<char, ReadError> {
    crate::unix::read_char(host.terminal()?)
}

#[cfg(not(unix))]
fn read_terminal<H: Host + ?Sized>(_host: &mut H) -> Result<char, ReadError> {
    Err(ReadError::Unavailable("POSIX terminal control (termios)"))
}
