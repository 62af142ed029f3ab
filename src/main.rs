// SPDX-License-Identifier: MIT
//
// txted — a small screen-oriented terminal text editor.
//
// This binary wires the two crates together and owns process concerns:
//
//   txted-term   → raw mode, key decoding, size probing, frame output
//   txted-editor → cursor state, key dispatch, frame composition
//
// Startup: enter raw mode, probe the screen size once. Then strictly
// alternate one full redraw with one key. Ctrl-Q clears the screen and
// exits.
//
// Every fatal error takes the same path out. `run` returns, which drops the
// terminal session and restores the original mode. `main` then clears the
// screen with a direct write (no frame, the renderer may be what broke),
// reports the error on stderr, and exits with status 1.
//
// Logging goes to the file named by `TXTED_LOG`, never to the terminal we
// are drawing on. `RUST_LOG` sets the filter (default `info`).

use std::env;
use std::fs::OpenOptions;
use std::process;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use txted_editor::editor::{clear_and_home, Action, Editor};
use txted_term::{size, terminal, KeyDecoder, TermConfig, TerminalSession, Tty};

/// Environment variable naming the log file.
const LOG_ENV: &str = "TXTED_LOG";

fn main() {
    init_logging();

    if let Err(err) = run() {
        terminal::emergency_clear();
        tracing::error!("fatal: {err:#}");
        eprintln!("txted: {err:#}");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = TermConfig::default();
    let _session = TerminalSession::enter(&config).context("cannot enter raw mode")?;

    let mut keys = KeyDecoder::new(Tty::new());
    let mut out = Tty::new();

    let screen = size::probe(&mut keys, &mut out, &config).context("cannot size the screen")?;
    tracing::info!(rows = screen.rows, cols = screen.cols, "txted starting");

    let mut editor = Editor::new(screen);
    loop {
        editor.refresh_screen(&mut out).context("cannot draw")?;
        let key = keys.next_key().context("cannot read key")?;
        if editor.process_key(key) == Action::Quit {
            clear_and_home(&mut out).context("cannot clear screen")?;
            tracing::info!("txted exiting");
            return Ok(());
        }
    }
}

/// Install a file-backed subscriber if `TXTED_LOG` is set.
fn init_logging() {
    let Some(path) = env::var_os(LOG_ENV) else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
