use std::io;

use crate::error::ReadError;
use crate::host::{Host, Keyboard};

use self::console::Console;

pub mod console;

/// Primitives of the Windows host process
///
/// The console is opened on first use.
#[derive(Debug)]
pub struct SystemHost {
    console: Option<Console>,
}

impl SystemHost {
    /// Returns the primitives of the current process.
    pub fn new() -> SystemHost {
        SystemHost{console: None}
    }
}

impl Default for SystemHost {
    fn default() -> SystemHost {
        SystemHost::new()
    }
}

impl Host for SystemHost {
    fn system_name(&self) -> io::Result<String> {
        Ok("Windows".to_owned())
    }

    fn keyboard(&mut self) -> Result<&mut dyn Keyboard, ReadError> {
        let console = match self.console.take() {
            Some(console) => console,
            None => Console::stdin()?,
        };

        Ok(self.console.get_or_insert(console))
    }
}
