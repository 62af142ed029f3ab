// SPDX-License-Identifier: MIT
//
// Terminal input decoding.
//
// Turns raw bytes from the terminal into logical keys: literal characters,
// control combinations, arrows, and page keys.
//
// # Design
//
// In raw mode the device is configured with VMIN=0 / VTIME=n, so every
// read() returns after at most n deciseconds, with zero bytes if nothing
// was typed. The decoder leans on that: it pulls one byte at a time and
// every read is bounded.
//
// A bare ESC (0x1B) is ambiguous: it is the Escape key, or the first byte of
// a CSI sequence the terminal sends as a burst. After an ESC the decoder
// tries to read the continuation. If the burst is not there by the time the
// read times out, the answer is Escape. Unknown sequences also collapse to
// Escape. The decoder never waits longer than one timeout per missing byte.
//
// Nothing is buffered between calls. The only state is the position in the
// underlying byte stream, so a decoder can be dropped and rebuilt around the
// same reader at any point between keys.

use std::io::{self, Read};

use crate::error::{Result, TermError};

/// The escape byte that starts every terminal control sequence.
pub const ESC: u8 = 0x1B;

/// Map a character to its Ctrl combination by clearing bits 5 and 6.
///
/// `ctrl_key(b'q')` is `0x11`, the byte a terminal sends for Ctrl-Q.
#[inline]
#[must_use]
pub const fn ctrl_key(ch: u8) -> u8 {
    ch & 0x1f
}

// ─── Keys ───────────────────────────────────────────────────────────────────

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    /// A literal byte: printable ASCII, DEL, or a UTF-8 fragment.
    Char(u8),
    /// A control combination, the raw byte below 0x20.
    Ctrl(u8),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Escape,
}

impl LogicalKey {
    /// Classify a single non-escape byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        if byte < 0x20 {
            Self::Ctrl(byte)
        } else {
            Self::Char(byte)
        }
    }

    /// The Ctrl combination for `ch` (e.g. `LogicalKey::ctrl(b'q')`).
    #[must_use]
    pub const fn ctrl(ch: u8) -> Self {
        Self::Ctrl(ctrl_key(ch))
    }

    /// The literal byte behind a `Char` or `Ctrl` key.
    #[must_use]
    pub const fn byte(self) -> Option<u8> {
        match self {
            Self::Char(b) | Self::Ctrl(b) => Some(b),
            _ => None,
        }
    }
}

// ─── Decoder ────────────────────────────────────────────────────────────────

/// Reads logical keys from a timeout-bounded byte stream.
///
/// `R` is expected to behave like a raw-mode terminal: `read` returns
/// `Ok(0)` when the timeout elapses with nothing typed.
/// [`Tty`](crate::tty::Tty) is the real device; tests use in-memory readers.
///
/// The decoder is also an [`Iterator`] over keys. Each `next()` blocks until
/// a key arrives, so the iterator never ends on its own.
#[derive(Debug)]
pub struct KeyDecoder<R> {
    input: R,
}

impl<R: Read> KeyDecoder<R> {
    /// Wrap an input stream.
    pub const fn new(input: R) -> Self {
        Self { input }
    }

    /// Access the underlying reader.
    pub const fn get_mut(&mut self) -> &mut R {
        &mut self.input
    }

    /// Unwrap the decoder, returning the reader.
    pub fn into_inner(self) -> R {
        self.input
    }

    /// One timeout-bounded read of a single byte.
    ///
    /// `Ok(None)` means nothing arrived before the timeout. `EAGAIN` and
    /// `EINTR` count as nothing arrived.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::InputStream`] for any other read failure.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.input.read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            Err(e) if is_benign(&e) => Ok(None),
            Err(e) => Err(TermError::InputStream(e)),
        }
    }

    /// Wait for the next key and decode it.
    ///
    /// Retries timed-out reads until the first byte arrives. Continuation
    /// bytes of an escape sequence get one read each.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::InputStream`] if the device read fails.
    pub fn next_key(&mut self) -> Result<LogicalKey> {
        let first = loop {
            if let Some(b) = self.read_byte()? {
                break b;
            }
        };
        let key = self.decode(first)?;
        tracing::trace!(?key, "decoded key");
        Ok(key)
    }

    /// Decode one key only if its first byte is already pending.
    ///
    /// Makes a single bounded read and returns `Ok(None)` if it times out.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::InputStream`] if the device read fails.
    pub fn drain_pending(&mut self) -> Result<Option<LogicalKey>> {
        match self.read_byte()? {
            Some(first) => self.decode(first).map(Some),
            None => Ok(None),
        }
    }

    fn decode(&mut self, first: u8) -> Result<LogicalKey> {
        if first != ESC {
            return Ok(LogicalKey::from_byte(first));
        }

        let Some(intro) = self.read_byte()? else {
            return Ok(LogicalKey::Escape);
        };
        let Some(code) = self.read_byte()? else {
            return Ok(LogicalKey::Escape);
        };
        if intro != b'[' {
            return Ok(LogicalKey::Escape);
        }

        if code.is_ascii_digit() {
            let Some(terminator) = self.read_byte()? else {
                return Ok(LogicalKey::Escape);
            };
            return Ok(match (code, terminator) {
                (b'5', b'~') => LogicalKey::PageUp,
                (b'6', b'~') => LogicalKey::PageDown,
                _ => LogicalKey::Escape,
            });
        }

        Ok(match code {
            b'A' => LogicalKey::ArrowUp,
            b'B' => LogicalKey::ArrowDown,
            b'C' => LogicalKey::ArrowRight,
            b'D' => LogicalKey::ArrowLeft,
            _ => LogicalKey::Escape,
        })
    }
}

impl<R: Read> Iterator for KeyDecoder<R> {
    type Item = Result<LogicalKey>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_key())
    }
}

/// Read errors that only mean "no data yet".
fn is_benign(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

// ─── Tests ──────────────────────────────────────────────────────────────────
