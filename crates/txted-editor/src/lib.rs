//! # txted-editor — Editor core for txted
//!
//! - **[`state`]** — `EditorState`: cursor position and screen size
//! - **[`view`]** — composing a full frame into a `RenderBuffer`
//! - **[`editor`]** — `Editor`: key dispatch and screen refresh
//!
//! Terminal I/O (raw mode, key decoding, size probing) lives in
//! `txted-term`; this crate only decides what keys mean and what a frame
//! looks like.

pub mod editor;
pub mod state;
pub mod view;

pub use editor::{Action, Editor};
pub use state::{CursorPosition, Direction, EditorState};
