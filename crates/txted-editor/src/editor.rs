//! Editor — key dispatch and screen refresh.
//!
//! The [`Editor`] owns the [`EditorState`] and is driven by the process main
//! loop, which strictly alternates two calls:
//!
//! ```text
//! loop {
//!     editor.refresh_screen(&mut stdout)?;       // one frame, one write
//!     let key = keys.next_key()?;                // blocks up to the timeout
//!     if editor.process_key(key) == Action::Quit { break }
//! }
//! ```
//!
//! Both calls are generic over their I/O, so the whole loop runs in tests
//! against in-memory readers and writers.

use std::io::Write;

use txted_term::ansi;
use txted_term::error::{Result, TermError};
use txted_term::input::LogicalKey;
use txted_term::output::RenderBuffer;
use txted_term::Size;

use crate::state::{Direction, EditorState};
use crate::view;

/// Key that quits the editor.
pub const QUIT_KEY: LogicalKey = LogicalKey::ctrl(b'q');

/// What the main loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep going.
    Continue,
    /// Clear the screen and exit.
    Quit,
}

/// The editor.
#[derive(Debug, Clone)]
pub struct Editor {
    state: EditorState,
}

impl Editor {
    /// An editor for a screen of the given size.
    #[must_use]
    pub const fn new(screen: Size) -> Self {
        Self {
            state: EditorState::new(screen),
        }
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    /// Apply one key to the editor state.
    pub fn process_key(&mut self, key: LogicalKey) -> Action {
        match key {
            QUIT_KEY => return Action::Quit,
            LogicalKey::ArrowLeft => self.state.move_cursor(Direction::Left),
            LogicalKey::ArrowRight => self.state.move_cursor(Direction::Right),
            LogicalKey::ArrowUp => self.state.move_cursor(Direction::Up),
            LogicalKey::ArrowDown => self.state.move_cursor(Direction::Down),
            LogicalKey::PageUp => self.page(Direction::Up),
            LogicalKey::PageDown => self.page(Direction::Down),
            _ => tracing::trace!(?key, "unbound key"),
        }
        Action::Continue
    }

    /// One screen height of single-row moves.
    fn page(&mut self, dir: Direction) {
        for _ in 0..self.state.screen().rows {
            self.state.move_cursor(dir);
        }
    }

    /// Compose a frame and write it to `out` in one operation.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::Output`] if `out` rejects the write.
    pub fn refresh_screen(&self, out: &mut impl Write) -> Result<()> {
        let mut frame = RenderBuffer::new();
        view::render_frame(&self.state, &mut frame).map_err(TermError::Output)?;
        frame.flush(out)
    }
}

/// Clear the screen and home the cursor, for a clean exit.
///
/// # Errors
///
/// Returns [`TermError::Output`] if `out` rejects the write.
pub fn clear_and_home(out: &mut impl Write) -> Result<()> {
    out.write_all(ansi::CLEAR_AND_HOME)
        .and_then(|()| out.flush())
        .map_err(TermError::Output)
}
