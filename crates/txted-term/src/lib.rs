// SPDX-License-Identifier: MIT
//
// txted-term — Terminal I/O core for txted.
//
// Everything between the editor and the terminal device lives here: raw
// mode with guaranteed restore, decoding input bytes into logical keys,
// finding out how big the screen is, and batching a frame into one write.
//
// No TUI framework sits underneath. The crate talks to the terminal with
// termios and ANSI escape sequences directly, and every read it makes is
// bounded by the raw-mode timeout.

pub mod ansi;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod size;
pub mod terminal;
pub mod tty;
pub mod width;

pub use config::TermConfig;
pub use error::{Result, TermError};
pub use input::{ctrl_key, KeyDecoder, LogicalKey};
pub use output::RenderBuffer;
pub use size::Size;
pub use terminal::TerminalSession;
pub use tty::Tty;
