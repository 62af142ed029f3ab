// SPDX-License-Identifier: MIT
//
// Error taxonomy for the terminal core.
//
// Every failure that reaches the editor's fatal path is one of these. Benign
// conditions (a read that times out with zero bytes, an unsupported window
// size ioctl) never become errors; they are handled where they happen.
// Render-buffer allocation failure has no variant either: the frame is
// truncated in place and drawing continues.

use std::io;

use thiserror::Error;

/// Errors produced by the terminal core.
#[derive(Debug, Error)]
pub enum TermError {
    /// Capturing or applying the terminal mode failed.
    ///
    /// `op` names the call that failed (`"tcgetattr"` or `"tcsetattr"`).
    #[error("terminal configuration failed ({op})")]
    DeviceConfig {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// Reading from the input device failed for a reason other than a timeout.
    #[error("failed to read terminal input")]
    InputStream(#[source] io::Error),

    /// Neither the window-size query nor the cursor-position probe worked.
    #[error("unable to determine terminal size")]
    SizeUnavailable,

    /// Writing a frame or directive to the output device failed.
    #[error("failed to write terminal output")]
    Output(#[source] io::Error),
}

/// Result alias used throughout `txted-term`.
pub type Result<T> = std::result::Result<T, TermError>;
