//! Editor state — where the cursor is and how big the screen is.
//!
//! This is all the state the editor has today. There is no text buffer yet,
//! so the cursor is only bounded below: it never goes negative, but nothing
//! stops it from walking off the right or bottom edge of the screen. Bounds
//! will come from line lengths once there are lines to measure.

use txted_term::Size;

/// A 0-indexed cursor position in screen cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CursorPosition {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl CursorPosition {
    /// The top-left corner.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Everything the renderer needs to draw a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    cursor: CursorPosition,
    screen: Size,
}

impl EditorState {
    /// Fresh state with the cursor at the origin.
    #[must_use]
    pub const fn new(screen: Size) -> Self {
        Self {
            cursor: CursorPosition::ORIGIN,
            screen,
        }
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    /// Screen dimensions, fixed for the life of the editor.
    #[inline]
    #[must_use]
    pub const fn screen(&self) -> Size {
        self.screen
    }

    /// Move the cursor one cell. Left and Up stop at zero.
    pub const fn move_cursor(&mut self, dir: Direction) {
        match dir {
            Direction::Left => self.cursor.x = self.cursor.x.saturating_sub(1),
            Direction::Right => self.cursor.x = self.cursor.x.saturating_add(1),
            Direction::Up => self.cursor.y = self.cursor.y.saturating_sub(1),
            Direction::Down => self.cursor.y = self.cursor.y.saturating_add(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> EditorState {
        EditorState::new(Size::new(24, 80))
    }

    #[test]
    fn starts_at_origin() {
        let s = state();
        assert_eq!(s.cursor(), CursorPosition::ORIGIN);
        assert_eq!(s.screen(), Size::new(24, 80));
    }

    #[test]
    fn left_at_zero_stays_at_zero() {
        let mut s = state();
        s.move_cursor(Direction::Left);
        assert_eq!(s.cursor().x, 0);
    }

    #[test]
    fn up_at_zero_stays_at_zero() {
        let mut s = state();
        s.move_cursor(Direction::Up);
        assert_eq!(s.cursor().y, 0);
    }

    #[test]
    fn right_and_down_increment() {
        let mut s = state();
        s.move_cursor(Direction::Right);
        s.move_cursor(Direction::Down);
        s.move_cursor(Direction::Down);
        assert_eq!(s.cursor(), CursorPosition::new(1, 2));
    }

    #[test]
    fn axes_are_independent() {
        let mut s = state();
        s.move_cursor(Direction::Down);
        s.move_cursor(Direction::Left);
        assert_eq!(s.cursor(), CursorPosition::new(0, 1));
    }

    #[test]
    fn no_upper_clamp() {
        let mut s = EditorState::new(Size::new(2, 2));
        for _ in 0..5 {
            s.move_cursor(Direction::Right);
            s.move_cursor(Direction::Down);
        }
        assert_eq!(s.cursor(), CursorPosition::new(5, 5));
    }

    #[test]
    fn round_trip_returns_home() {
        let mut s = state();
        s.move_cursor(Direction::Right);
        s.move_cursor(Direction::Left);
        s.move_cursor(Direction::Left);
        assert_eq!(s.cursor(), CursorPosition::ORIGIN);
    }
}
