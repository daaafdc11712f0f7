//! Reads a single key, then a normal line of input
//!
//! The line is read with ordinary, line-buffered input to show that the
//! terminal has been returned to its previous state.

extern crate getc;

use std::io::{self, Write};

fn main() -> io::Result<()> {
    print!("Press any key: ");
    io::stdout().flush()?;

    match getc::getc() {
        Some(ch) => println!("\nYou pressed: {:?}", ch),
        None => println!("\nNo key was read"),
    }

    print!("Now, test normal input: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    println!("You wrote: {}", line.trim_end());

    Ok(())
}
