//! Substitute primitives used by unit tests

use std::io;

use crate::error::ReadError;
use crate::host::{Host, Keyboard};

#[cfg(unix)]
pub use self::unix::{base_termios, MockTty};

#[cfg(unix)]
use crate::unix::Tty;

/// Keys are returned in order; an empty queue fails like a closed console.
impl Keyboard for Vec<u8> {
    fn getch(&mut self) -> io::Result<u8> {
        if self.is_empty() {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no key available"))
        } else {
            Ok(self.remove(0))
        }
    }
}

pub struct MockHost {
    name: Option<String>,
    pub keys: Vec<u8>,
    pub keyboard_available: bool,
    pub keyboard_calls: usize,
    pub terminal_calls: usize,
    #[cfg(unix)]
    pub tty: MockTty,
}

impl MockHost {
    pub fn new(name: &str) -> MockHost {
        MockHost::with_name(Some(name.to_owned()))
    }

    pub fn failing_query() -> MockHost {
        MockHost::with_name(None)
    }

    fn with_name(name: Option<String>) -> MockHost {
        MockHost{
            name,
            keys: Vec::new(),
            keyboard_available: true,
            keyboard_calls: 0,
            terminal_calls: 0,
            #[cfg(unix)]
            tty: MockTty::new(b""),
        }
    }
}

impl Host for MockHost {
    fn system_name(&self) -> io::Result<String> {
        self.name.clone().ok_or_else(|| io::Error::new(
            io::ErrorKind::NotFound, "uname unavailable"))
    }

    fn keyboard(&mut self) -> Result<&mut dyn Keyboard, ReadError> {
        self.keyboard_calls += 1;

        if self.keyboard_available {
            Ok(&mut self.keys)
        } else {
            Err(ReadError::Unavailable("console keystroke input (msvcrt)"))
        }
    }

    #[cfg(unix)]
    fn terminal(&mut self) -> Result<&dyn Tty, ReadError> {
        self.terminal_calls += 1;
        Ok(&self.tty)
    }
}

#[cfg(unix)]
mod unix {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::io;
    use std::mem::zeroed;

    use nix::sys::termios::{
        ControlFlags, InputFlags, LocalFlags, OutputFlags,
        SetArg, SpecialCharacterIndices, Termios,
    };

    use crate::unix::Tty;

    /// Attributes of a freshly opened, line-buffered terminal
    pub fn base_termios() -> Termios {
        let mut tio = Termios::from(unsafe { zeroed::<libc::termios>() });

        tio.input_flags = InputFlags::ICRNL | InputFlags::IXON;
        tio.output_flags = OutputFlags::OPOST | OutputFlags::ONLCR;
        tio.control_flags = ControlFlags::CREAD | ControlFlags::CS8;
        tio.local_flags = LocalFlags::ICANON | LocalFlags::ECHO |
            LocalFlags::ECHOE | LocalFlags::ISIG | LocalFlags::IEXTEN;
        tio.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;

        tio
    }

    /// Terminal which records every attribute change
    pub struct MockTty {
        state: RefCell<Termios>,
        input: RefCell<VecDeque<u8>>,
        applied: RefCell<Vec<(SetArg, Termios)>>,
        at_read: RefCell<Option<Termios>>,
        set_calls: Cell<usize>,
        pub fail_get: bool,
        /// Number of leading `set_attr` calls which fail
        pub fail_set_count: usize,
        /// Fail every `set_attr` call after the first
        pub fail_restore: bool,
        pub fail_read: Option<io::ErrorKind>,
    }

    impl MockTty {
        pub fn new(input: &[u8]) -> MockTty {
            MockTty{
                state: RefCell::new(base_termios()),
                input: RefCell::new(input.iter().cloned().collect()),
                applied: RefCell::new(Vec::new()),
                at_read: RefCell::new(None),
                set_calls: Cell::new(0),
                fail_get: false,
                fail_set_count: 0,
                fail_restore: false,
                fail_read: None,
            }
        }

        pub fn current(&self) -> Termios {
            self.state.borrow().clone()
        }

        /// Successfully applied attribute changes, in order
        pub fn applied(&self) -> Vec<(SetArg, Termios)> {
            self.applied.borrow().clone()
        }

        /// Attributes in effect when `read` was called
        pub fn state_at_read(&self) -> Option<Termios> {
            self.at_read.borrow().clone()
        }

        pub fn remaining_input(&self) -> Vec<u8> {
            self.input.borrow().iter().cloned().collect()
        }
    }

    impl Tty for MockTty {
        fn get_attr(&self) -> io::Result<Termios> {
            if self.fail_get {
                return Err(io::Error::from_raw_os_error(libc::ENOTTY));
            }

            Ok(self.current())
        }

        fn set_attr(&self, when: SetArg, tio: &Termios) -> io::Result<()> {
            let n = self.set_calls.get();
            self.set_calls.set(n + 1);

            if n < self.fail_set_count || (self.fail_restore && n >= 1) {
                return Err(io::Error::from_raw_os_error(libc::EIO));
            }

            *self.state.borrow_mut() = tio.clone();
            self.applied.borrow_mut().push((when, tio.clone()));
            Ok(())
        }

        fn read(&self, buf: &mut [u8]) -> io::Result<usize> {
            *self.at_read.borrow_mut() = Some(self.current());

            if let Some(kind) = self.fail_read {
                return Err(io::Error::new(kind, "read failed"));
            }

            let mut input = self.input.borrow_mut();
            let mut n = 0;

            while n < buf.len() {
                match input.pop_front() {
                    Some(b) => {
                        buf[n] = b;
                        n += 1;
                    }
                    None => break,
                }
            }

            Ok(n)
        }
    }
}
