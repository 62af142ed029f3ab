// SPDX-License-Identifier: MIT
//
// Tunables for the terminal core.
//
// There is no config file and no command-line surface. These values are
// fixed at compile time through `Default`, and exist as a struct so tests
// (and a future settings layer) can change them without touching the code
// that uses them.

/// Terminal core settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermConfig {
    /// Read timeout applied in raw mode (`VTIME`), in deciseconds.
    ///
    /// A read returns after this long even if no byte arrived, which is what
    /// lets a lone Escape keypress resolve instead of blocking.
    pub read_timeout_ds: u8,

    /// Relative move used by the cursor-position size probe.
    ///
    /// Large enough that the terminal clamps the cursor at the bottom-right
    /// corner on any real screen.
    pub probe_offset: u16,

    /// Maximum bytes of a cursor-position reply kept by the size probe.
    pub reply_capacity: usize,
}

impl TermConfig {
    /// Default read timeout: one decisecond.
    pub const DEFAULT_READ_TIMEOUT_DS: u8 = 1;
    /// Default probe offset: 999 cells right and down.
    pub const DEFAULT_PROBE_OFFSET: u16 = 999;
    /// Default reply scratch capacity.
    pub const DEFAULT_REPLY_CAPACITY: usize = 31;
}

impl Default for TermConfig {
    fn default() -> Self {
        Self {
            read_timeout_ds: Self::DEFAULT_READ_TIMEOUT_DS,
            probe_offset: Self::DEFAULT_PROBE_OFFSET,
            reply_capacity: Self::DEFAULT_REPLY_CAPACITY,
        }
    }
}
