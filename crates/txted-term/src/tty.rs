// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// The terminal device, unbuffered.
//
// `io::Stdin` keeps its own read buffer and `io::Stdout` is line-buffered.
// Neither fits here: the read buffer hides raw mode's timeout semantics
// from the key decoder, and line buffering would split a frame into one
// write per newline. `Tty` reads fd 0 and writes fd 1 directly.

use std::io::{self, Read, Write};

/// Raw reads from stdin and raw writes to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tty;

impl Tty {
    /// The process's controlling terminal, as stdin/stdout.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
impl Read for Tty {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        #[allow(clippy::cast_sign_loss)] // n >= 0 checked above.
        let n = n as usize;
        Ok(n)
    }
}

#[cfg(unix)]
impl Write for Tty {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = unsafe { libc::write(libc::STDOUT_FILENO, buf.as_ptr().cast(), buf.len()) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        #[allow(clippy::cast_sign_loss)] // n >= 0 checked above.
        let n = n as usize;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        // Nothing is buffered.
        Ok(())
    }
}

#[cfg(not(unix))]
impl Read for Tty {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        io::stdin().read(buf)
    }
}

#[cfg(not(unix))]
impl Write for Tty {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
