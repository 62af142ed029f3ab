// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Terminal size discovery.
//
// Two strategies, each tried once, in order:
//
//   1. ioctl(TIOCGWINSZ) on stdout. Fast and exact, but some terminals and
//      serial links report 0 columns or reject the call entirely.
//
//   2. The cursor-position probe. Shove the cursor 999 cells right and down
//      (the terminal clamps it at the bottom-right corner), ask where it
//      ended up with DSR 6, and read the `ESC [ rows ; cols R` reply off the
//      input stream. The cursor's coordinates are the screen size.
//
// The probe reads the reply a byte at a time with the same bounded reads
// the key decoder uses, so a terminal that never answers costs one read
// timeout, not a hang.

use std::io::{Read, Write};

use crate::ansi;
use crate::config::TermConfig;
use crate::error::{Result, TermError};
use crate::input::KeyDecoder;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of rows (height in character cells).
    pub rows: u16,
    /// Number of columns (width in character cells).
    pub cols: u16,
}

impl Size {
    #[must_use]
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

// ─── Primary: window size query ─────────────────────────────────────────────

/// Query the terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal, the query fails, or the
/// driver reports a zero dimension.
#[cfg(unix)]
#[must_use]
pub fn query_window_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size::new(ws.ws_row, ws.ws_col))
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn query_window_size() -> Option<Size> {
    None
}

// ─── Probe ──────────────────────────────────────────────────────────────────

/// Determine the terminal size, falling back to the cursor-position probe.
///
/// # Errors
///
/// Returns [`TermError::SizeUnavailable`] if both strategies fail, or the
/// underlying error if the terminal cannot be written to or read from.
pub fn probe<R: Read, W: Write>(
    decoder: &mut KeyDecoder<R>,
    output: &mut W,
    config: &TermConfig,
) -> Result<Size> {
    probe_with(query_window_size(), decoder, output, config)
}

/// [`probe`] with the primary query result supplied by the caller.
///
/// # Errors
///
/// Same as [`probe`].
pub fn probe_with<R: Read, W: Write>(
    primary: Option<Size>,
    decoder: &mut KeyDecoder<R>,
    output: &mut W,
    config: &TermConfig,
) -> Result<Size> {
    if let Some(size) = primary {
        tracing::debug!(rows = size.rows, cols = size.cols, "window size from ioctl");
        return Ok(size);
    }

    tracing::debug!("window size query unavailable, probing cursor position");
    let size = cursor_probe(decoder, output, config)?;
    tracing::debug!(rows = size.rows, cols = size.cols, "window size from cursor probe");
    Ok(size)
}

fn cursor_probe<R: Read, W: Write>(
    decoder: &mut KeyDecoder<R>,
    output: &mut W,
    config: &TermConfig,
) -> Result<Size> {
    ansi::cursor_forward(output, config.probe_offset)
        .and_then(|()| ansi::cursor_down(output, config.probe_offset))
        .and_then(|()| ansi::request_cursor_position(output))
        .and_then(|()| output.flush())
        .map_err(TermError::Output)?;

    let mut reply = Vec::with_capacity(config.reply_capacity);
    while reply.len() < config.reply_capacity {
        match decoder.read_byte()? {
            Some(b'R') | None => break,
            Some(b) => reply.push(b),
        }
    }

    let size = parse_cursor_report(&reply).ok_or(TermError::SizeUnavailable)?;

    // Discard the key artifact some terminals leave behind the reply.
    if let Some(key) = decoder.drain_pending()? {
        tracing::trace!(?key, "discarded input after cursor report");
    }
    Ok(size)
}

/// Parse a cursor-position report, `ESC [ rows ; cols` with optional `R`.
///
/// Returns `None` if the prefix is missing, a field is not a decimal
/// number, or either dimension is zero.
#[must_use]
pub fn parse_cursor_report(reply: &[u8]) -> Option<Size> {
    let body = reply.strip_prefix(b"\x1b[")?;
    let body = body.strip_suffix(b"R").unwrap_or(body);
    let (rows, cols) = std::str::from_utf8(body).ok()?.split_once(';')?;

    let rows: u16 = rows.parse().ok()?;
    let cols: u16 = cols.parse().ok()?;
    if rows == 0 || cols == 0 {
        return None;
    }
    Some(Size::new(rows, cols))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PROBE_REQUEST: &[u8] = b"\x1b[999C\x1b[999B\x1b[6n";

    fn run_probe(primary: Option<Size>, input: &[u8]) -> (Result<Size>, Vec<u8>, usize) {
        let mut decoder = KeyDecoder::new(input);
        let mut out = Vec::new();
        let res = probe_with(primary, &mut decoder, &mut out, &TermConfig::default());
        let left = decoder.into_inner().len();
        (res, out, left)
    }

    // ── Reply parsing ───────────────────────────────────────────────────

    #[test]
    fn parse_standard_reply() {
        assert_eq!(parse_cursor_report(b"\x1b[24;80R"), Some(Size::new(24, 80)));
    }

    #[test]
    fn parse_without_terminator() {
        assert_eq!(parse_cursor_report(b"\x1b[50;132"), Some(Size::new(50, 132)));
    }

    #[test]
    fn parse_missing_prefix() {
        assert_eq!(parse_cursor_report(b"24;80R"), None);
        assert_eq!(parse_cursor_report(b"[24;80R"), None);
    }

    #[test]
    fn parse_non_numeric() {
        assert_eq!(parse_cursor_report(b"\x1b[ab;80R"), None);
        assert_eq!(parse_cursor_report(b"\x1b[24;xyR"), None);
    }

    #[test]
    fn parse_missing_separator() {
        assert_eq!(parse_cursor_report(b"\x1b[2480R"), None);
    }

    #[test]
    fn parse_zero_columns_is_failure() {
        assert_eq!(parse_cursor_report(b"\x1b[24;0R"), None);
    }

    #[test]
    fn parse_empty() {
        assert_eq!(parse_cursor_report(b""), None);
    }

    // ── Strategy order ──────────────────────────────────────────────────

    #[test]
    fn primary_wins_without_touching_the_terminal() {
        let (res, out, left) = run_probe(Some(Size::new(40, 100)), b"\x1b[24;80R");
        assert_eq!(res.unwrap(), Size::new(40, 100));
        assert!(out.is_empty());
        assert_eq!(left, 8);
    }

    #[test]
    fn fallback_sends_move_and_report_request() {
        let (res, out, _) = run_probe(None, b"\x1b[24;80R");
        assert_eq!(res.unwrap(), Size::new(24, 80));
        assert_eq!(out, PROBE_REQUEST);
    }

    #[test]
    fn fallback_uses_configured_offset() {
        let mut decoder = KeyDecoder::new(&b"\x1b[10;20R"[..]);
        let mut out = Vec::new();
        let cfg = TermConfig {
            probe_offset: 500,
            ..TermConfig::default()
        };
        probe_with(None, &mut decoder, &mut out, &cfg).unwrap();
        assert_eq!(out, b"\x1b[500C\x1b[500B\x1b[6n");
    }

    #[test]
    fn fallback_drains_one_trailing_key() {
        let (res, _, left) = run_probe(None, b"\x1b[24;80Rxy");
        assert_eq!(res.unwrap(), Size::new(24, 80));
        assert_eq!(left, 1);
    }

    #[test]
    fn fallback_does_not_wait_when_nothing_trails() {
        let (res, _, left) = run_probe(None, b"\x1b[24;80R");
        assert_eq!(res.unwrap(), Size::new(24, 80));
        assert_eq!(left, 0);
    }

    // ── Failure ─────────────────────────────────────────────────────────

    #[test]
    fn no_reply_is_size_unavailable() {
        let (res, _, _) = run_probe(None, b"");
        assert!(matches!(res, Err(TermError::SizeUnavailable)));
    }

    #[test]
    fn garbage_reply_is_size_unavailable() {
        let (res, _, _) = run_probe(None, b"hello R");
        assert!(matches!(res, Err(TermError::SizeUnavailable)));
    }

    #[test]
    fn reply_is_capped() {
        // No terminator: the probe stops at the cap and the reply fails to parse.
        let long = [b'9'; 64];
        let mut input = b"\x1b[1;".to_vec();
        input.extend_from_slice(&long);
        let (res, _, left) = run_probe(None, &input);
        assert!(matches!(res, Err(TermError::SizeUnavailable)));
        assert_eq!(left, input.len() - TermConfig::DEFAULT_REPLY_CAPACITY);
    }

    #[test]
    fn query_window_size_does_not_panic() {
        let _ = query_window_size();
    }
}
