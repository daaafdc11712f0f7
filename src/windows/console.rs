//! Windows console primitives

use std::io;

use winapi::ctypes::c_int;
use winapi::shared::minwindef::{DWORD, FALSE};
use winapi::shared::ntdef::HANDLE;
use winapi::um::consoleapi::GetConsoleMode;
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::processenv::GetStdHandle;
use winapi::um::winbase::STD_INPUT_HANDLE;

use crate::error::ReadError;
use crate::host::Keyboard;

extern "C" {
    // Provided by the C runtime, declared in <conio.h>
    fn _getch() -> c_int;
}

const CONSOLE_INPUT: &str = "console keystroke input (msvcrt)";

/// Raw keystroke input from the console attached to standard input
///
/// Keys are read with the C runtime's `_getch`, which neither echoes input
/// nor waits for a newline, and leaves the console mode unchanged.
#[derive(Debug)]
pub struct Console(());

impl Console {
    /// Returns the console attached to standard input.
    ///
    /// Returns `ReadError::Unavailable` if standard input is not a console,
    /// such as when input is redirected from a file or pipe.
    pub fn stdin() -> Result<Console, ReadError> {
        let handle = result_handle(unsafe { GetStdHandle(STD_INPUT_HANDLE) })
            .map_err(|_| ReadError::Unavailable(CONSOLE_INPUT))?;

        let mut mode: DWORD = 0;

        if unsafe { GetConsoleMode(handle, &mut mode) } == FALSE {
            return Err(ReadError::Unavailable(CONSOLE_INPUT));
        }

        Ok(Console(()))
    }
}

impl Keyboard for Console {
    fn getch(&mut self) -> io::Result<u8> {
        let ch = unsafe { _getch() };

        if ch < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(ch as u8)
        }
    }
}

fn result_handle(ptr: HANDLE) -> io::Result<HANDLE> {
    if ptr.is_null() || ptr == INVALID_HANDLE_VALUE {
        Err(io::Error::last_os_error())
    } else {
        Ok(ptr)
    }
}
