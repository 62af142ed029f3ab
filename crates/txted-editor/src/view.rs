//! View — composing one frame from the editor state.
//!
//! A frame is built in a [`RenderBuffer`] and written in one go:
//!
//! ```text
//! ESC[?25l                 hide cursor while drawing
//! ESC[H                    home
//! ~ ESC[K CRLF             one line per screen row, each erased to EOL,
//! ~ ESC[K CRLF             CRLF between rows (never after the last one,
//! ...                      which would scroll the screen)
//! ~ ESC[K
//! ESC[{y+1};{x+1}H         put the cursor where the state says
//! ESC[?25h                 show cursor
//! ```
//!
//! There is no full-screen clear. Clearing and then redrawing flashes a
//! blank screen on slow links; overwriting each row and erasing whatever is
//! left to its right gives the same picture without the flash.

use std::io::{self, Write};

use txted_term::ansi;
use txted_term::output::RenderBuffer;
use txted_term::width::{clip_to_width, string_width};

use crate::state::EditorState;

/// Filler drawn on rows past the end of the (not yet existing) text.
const FILLER: &[u8] = b"~";

/// The welcome banner shown in the middle of the screen.
#[must_use]
pub fn banner() -> String {
    format!("txted editor -- version {}", env!("CARGO_PKG_VERSION"))
}

/// Row that carries the banner.
#[inline]
#[must_use]
pub const fn banner_row(rows: usize) -> usize {
    rows / 2
}

/// Compose a complete frame for `state` into `buf`.
///
/// # Errors
///
/// Propagates write errors from `buf`. Writing into a [`RenderBuffer`]
/// never fails, so in practice this always succeeds.
pub fn render_frame(state: &EditorState, buf: &mut RenderBuffer) -> io::Result<()> {
    ansi::cursor_hide(buf)?;
    ansi::cursor_home(buf)?;
    draw_rows(state, buf)?;

    let cursor = state.cursor();
    ansi::cursor_to(buf, cursor.x, cursor.y)?;
    ansi::cursor_show(buf)
}

fn draw_rows(state: &EditorState, buf: &mut RenderBuffer) -> io::Result<()> {
    let screen = state.screen();
    let rows = usize::from(screen.rows);
    let cols = usize::from(screen.cols);
    let welcome = banner_row(rows);

    for y in 0..rows {
        if y == welcome {
            draw_banner(buf, cols)?;
        } else {
            buf.write_all(FILLER)?;
        }
        ansi::erase_line(buf)?;
        if y + 1 < rows {
            buf.write_all(b"\r\n")?;
        }
    }
    Ok(())
}

/// The banner, clipped to `cols` and centered, with the filler in column 0.
fn draw_banner(buf: &mut RenderBuffer, cols: usize) -> io::Result<()> {
    let text = banner();
    let text = clip_to_width(&text, cols);
    let mut padding = (cols - string_width(text)) / 2;
    if padding > 0 {
        buf.write_all(FILLER)?;
        padding -= 1;
    }
    for _ in 0..padding {
        buf.write_all(b" ")?;
    }
    buf.write_all(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CursorPosition, Direction};
    use pretty_assertions::assert_eq;
    use txted_term::Size;

    fn frame(state: &EditorState) -> Vec<u8> {
        let mut buf = RenderBuffer::new();
        render_frame(state, &mut buf).unwrap();
        buf.as_bytes().to_vec()
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    fn screen_of(state: &EditorState) -> vt100::Parser {
        let size = state.screen();
        let mut parser = vt100::Parser::new(size.rows, size.cols, 0);
        parser.process(&frame(state));
        parser
    }

    // ── Structure ───────────────────────────────────────────────────────

    #[test]
    fn frame_starts_hidden_and_homed() {
        let out = frame(&EditorState::new(Size::new(24, 80)));
        assert!(out.starts_with(b"\x1b[?25l\x1b[H"));
    }

    #[test]
    fn frame_ends_with_cursor_then_show() {
        let out = frame(&EditorState::new(Size::new(24, 80)));
        assert!(out.ends_with(b"\x1b[K\x1b[1;1H\x1b[?25h"));
    }

    #[test]
    fn frame_never_clears_screen() {
        let out = frame(&EditorState::new(Size::new(24, 80)));
        assert_eq!(count(&out, b"\x1b[2J"), 0);
    }

    #[test]
    fn every_row_is_erased_to_eol() {
        let out = frame(&EditorState::new(Size::new(24, 80)));
        assert_eq!(count(&out, b"\x1b[K"), 24);
    }

    #[test]
    fn crlf_between_rows_only() {
        let out = frame(&EditorState::new(Size::new(24, 80)));
        assert_eq!(count(&out, b"\r\n"), 23);
        assert_eq!(count(&out, b"\x1b[K\r\n"), 23);
    }

    #[test]
    fn single_row_screen_has_no_crlf() {
        let out = frame(&EditorState::new(Size::new(1, 80)));
        assert_eq!(count(&out, b"\r\n"), 0);
        assert_eq!(count(&out, b"\x1b[K"), 1);
    }

    #[test]
    fn cursor_directive_is_one_indexed() {
        let mut state = EditorState::new(Size::new(24, 80));
        state.move_cursor(Direction::Right);
        state.move_cursor(Direction::Right);
        state.move_cursor(Direction::Down);
        let out = frame(&state);
        assert!(out.ends_with(b"\x1b[2;3H\x1b[?25h"));
    }

    // ── What the terminal shows ─────────────────────────────────────────

    #[test]
    fn filler_on_every_other_row() {
        let parser = screen_of(&EditorState::new(Size::new(24, 80)));
        let rows: Vec<String> = parser.screen().rows(0, 80).collect();
        assert_eq!(rows.len(), 24);
        for (y, row) in rows.iter().enumerate() {
            if y == banner_row(24) {
                continue;
            }
            assert_eq!(row, "~", "row {y}");
        }
    }

    #[test]
    fn banner_is_centered_on_middle_row() {
        let parser = screen_of(&EditorState::new(Size::new(24, 80)));
        let row = parser.screen().rows(0, 80).nth(12).unwrap();
        let text = banner();
        let expected_col = (80 - text.len()) / 2;
        assert!(row.starts_with('~'));
        assert_eq!(row.find(&text), Some(expected_col));
    }

    #[test]
    fn banner_is_clipped_on_narrow_screen() {
        let parser = screen_of(&EditorState::new(Size::new(10, 12)));
        let row = parser.screen().rows(0, 12).nth(5).unwrap();
        // No room to pad, so no filler either. The last column is left out:
        // erase-to-EOL from a pending-wrap position may blank it.
        assert!(row.starts_with(&banner()[..11]), "row was {row:?}");
        assert!(row.len() <= 12);
    }

    #[test]
    fn terminal_cursor_follows_state() {
        let mut state = EditorState::new(Size::new(24, 80));
        state.move_cursor(Direction::Down);
        state.move_cursor(Direction::Down);
        state.move_cursor(Direction::Right);
        let parser = screen_of(&state);
        assert_eq!(state.cursor(), CursorPosition::new(1, 2));
        assert_eq!(parser.screen().cursor_position(), (2, 1));
        assert!(!parser.screen().hide_cursor());
    }

    #[test]
    fn banner_mentions_version() {
        assert!(banner().ends_with(env!("CARGO_PKG_VERSION")));
    }
}
