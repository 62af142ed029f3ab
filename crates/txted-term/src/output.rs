// SPDX-License-Identifier: MIT
//
// Frame output buffering.
//
// RenderBuffer accumulates every byte of one frame in memory so the whole
// frame reaches the terminal in a single write() syscall. Nothing else in
// the editor writes to the output device while a frame is being composed,
// so the terminal never sees half a frame.
//
// A buffer lives for exactly one frame: create it, compose into it, hand it
// to `flush`, which consumes it. There is no reuse across frames.
//
// Growth is fallible. If the allocator refuses to grow the buffer, the
// bytes are dropped and the frame is drawn as far as it got. A truncated
// frame is fixed by the next redraw; an abort mid-render leaves the user's
// terminal in raw mode.

use std::io::{self, Write};

use crate::error::{Result, TermError};

/// Initial capacity. A full 80×24 frame of tildes plus directives fits.
const DEFAULT_CAPACITY: usize = 4096;

/// A byte buffer holding one complete frame.
#[derive(Debug)]
pub struct RenderBuffer {
    buf: Vec<u8>,
    /// Set once an append could not be stored.
    truncated: bool,
}

impl RenderBuffer {
    /// Create an empty frame buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
            truncated: false,
        }
    }

    /// Append `bytes` to the end of the frame.
    ///
    /// If growing the buffer fails the bytes are discarded and the frame is
    /// marked truncated. Later appends are dropped too, so a truncated frame
    /// is always a prefix of the intended one.
    pub fn append(&mut self, bytes: &[u8]) {
        if self.truncated {
            return;
        }
        if self.buf.try_reserve(bytes.len()).is_err() {
            tracing::warn!(
                len = self.buf.len(),
                wanted = bytes.len(),
                "render buffer growth failed, truncating frame"
            );
            self.truncated = true;
            return;
        }
        self.buf.extend_from_slice(bytes);
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Whether an append was dropped because the buffer could not grow.
    #[inline]
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Write the whole frame to `device` in one operation and release it.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::Output`] if the device rejects the write.
    pub fn flush(self, device: &mut impl Write) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        device.write_all(&self.buf).map_err(TermError::Output)?;
        device.flush().map_err(TermError::Output)
    }
}

impl Write for RenderBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Intentionally a no-op. Real flushing via `RenderBuffer::flush`.
        Ok(())
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
