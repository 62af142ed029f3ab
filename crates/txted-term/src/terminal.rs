// SPDX-License-Identifier: MIT
//
// Terminal session — raw mode with guaranteed restore.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr) and raw fd writes. These are the standard POSIX interfaces for
// terminal control; there is no safe alternative. Each unsafe block is
// minimal.
#![allow(unsafe_code)]
//
// `TerminalSession::enter` snapshots the terminal's mode, switches it to raw
// mode, and hands back a guard. Dropping the guard puts the snapshot back.
// That covers normal return, early `?` returns and unwinding panics.
//
// The panic hook covers the rest. It restores termios from a global backup
// and writes the clear-and-home directives straight to fd 1, bypassing
// Rust's stdout lock (a panic mid-flush would otherwise deadlock on it),
// then lets the original hook print its message to a working terminal.

use std::io;
use std::sync::{Mutex, Once};

use crate::ansi;
use crate::config::TermConfig;
use crate::error::{Result, TermError};

// ─── Raw mode config ────────────────────────────────────────────────────────

/// Derive the raw-mode settings from a captured mode snapshot.
///
/// Input: no CR→NL translation, no XON/XOFF flow control, no SIGINT on
/// break, no parity checking, no 8th-bit stripping. Output: no
/// post-processing. Local: no echo, no canonical line buffering, no
/// Ctrl-V literal-next, no signal keys. 8-bit characters.
///
/// Reads return as soon as any byte is available, or after
/// `read_timeout_ds` deciseconds with nothing (`VMIN = 0`, `VTIME = n`).
#[cfg(unix)]
#[must_use]
pub fn raw_mode_config(snapshot: &libc::termios, config: &TermConfig) -> libc::termios {
    let mut raw = *snapshot;
    raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
    raw.c_oflag &= !libc::OPOST;
    raw.c_cflag &= !libc::CSIZE;
    raw.c_cflag |= libc::CS8;
    raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
    raw.c_cc[libc::VMIN] = 0;
    raw.c_cc[libc::VTIME] = config.read_timeout_ds;
    raw
}

// ─── Panic-safe restore ─────────────────────────────────────────────────────

/// Global backup of the snapshot for the panic hook.
///
/// The session owns its own copy, but the hook can't reach it.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Restore termios from the global backup. Best-effort, ignores errors.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, original);
            }
        }
    }
}

static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before the message prints.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            #[cfg(unix)]
            restore_termios_from_backup();

            emergency_clear();
            original(info);
        }));
    });
}

/// Clear the screen and home the cursor, writing directly to fd 1.
///
/// Used on the fatal error path and from the panic hook, where a structured
/// frame cannot be trusted. Bypasses `io::stdout()` and its lock.
pub fn emergency_clear() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            ansi::CLEAR_AND_HOME.as_ptr().cast::<libc::c_void>(),
            ansi::CLEAR_AND_HOME.len(),
        );
    }

    #[cfg(not(unix))]
    {
        use std::io::Write;
        let _ = io::stdout().write_all(ansi::CLEAR_AND_HOME);
        let _ = io::stdout().flush();
    }
}

// ─── Session ────────────────────────────────────────────────────────────────

/// Exclusive raw-mode control of the terminal.
///
/// The original mode is restored when the session is dropped, or earlier
/// with [`exit`](Self::exit). Restoration happens once.
///
/// # Example
///
/// ```no_run
/// use txted_term::config::TermConfig;
/// use txted_term::terminal::TerminalSession;
///
/// let session = TerminalSession::enter(&TermConfig::default())?;
/// // ... read keys, draw frames ...
/// drop(session); // terminal restored
/// # Ok::<(), txted_term::error::TermError>(())
/// ```
#[derive(Debug)]
pub struct TerminalSession {
    /// Mode captured at `enter`. Taken when restored.
    #[cfg(unix)]
    snapshot: Option<libc::termios>,
}

impl TerminalSession {
    /// Capture the terminal mode and switch to raw mode.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::DeviceConfig`] if stdin is not a terminal or the
    /// mode cannot be read or applied.
    #[cfg(unix)]
    pub fn enter(config: &TermConfig) -> Result<Self> {
        install_panic_hook();

        let fd = libc::STDIN_FILENO;
        let snapshot = unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &raw mut termios) != 0 {
                return Err(device_error("tcgetattr"));
            }
            termios
        };

        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = Some(snapshot);
        }

        // From here on, dropping the session restores the snapshot, including
        // when the apply below fails half way.
        let session = Self {
            snapshot: Some(snapshot),
        };

        let raw = raw_mode_config(&snapshot, config);
        if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const raw) } != 0 {
            return Err(device_error("tcsetattr"));
        }

        tracing::debug!(vtime = config.read_timeout_ds, "entered raw mode");
        Ok(session)
    }

    #[cfg(not(unix))]
    pub fn enter(_config: &TermConfig) -> Result<Self> {
        install_panic_hook();
        Ok(Self {})
    }

    /// Whether the original mode is still waiting to be restored.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        #[cfg(unix)]
        {
            self.snapshot.is_some()
        }
        #[cfg(not(unix))]
        {
            false
        }
    }

    /// Restore the captured mode. Later calls are no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::DeviceConfig`] if the mode cannot be applied.
    #[cfg(unix)]
    pub fn exit(&mut self) -> Result<()> {
        let Some(original) = self.snapshot.take() else {
            return Ok(());
        };

        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = None;
        }

        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const original) }
            != 0
        {
            return Err(device_error("tcsetattr"));
        }
        tracing::debug!("restored terminal mode");
        Ok(())
    }

    #[cfg(not(unix))]
    pub fn exit(&mut self) -> Result<()> {
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            tracing::error!(error = %err, "failed to restore terminal mode");
        }
    }
}

fn device_error(op: &'static str) -> TermError {
    TermError::DeviceConfig {
        op,
        source: io::Error::last_os_error(),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
