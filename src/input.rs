//! Discrete player intents, the targeting cursor and input debouncing.

use crate::board::TargetGrid;

/// Minimum spacing between accepted button presses on the device.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// An already-debounced button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// Targeting cursor on the enemy grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
}

impl Cursor {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Move one cell in the intent's direction, clamped to an `N×N` grid.
    /// Returns `false` if the cursor did not move.
    pub fn step<const N: usize>(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Up if self.y > 0 => self.y -= 1,
            Intent::Down if self.y + 1 < N => self.y += 1,
            Intent::Left if self.x > 0 => self.x -= 1,
            Intent::Right if self.x + 1 < N => self.x += 1,
            _ => return false,
        }
        true
    }
}

/// Drops button presses that arrive too soon after the last accepted one.
///
/// The caller decides which presses restart the window: a cursor move that
/// changed position, and any fire attempt, accepted or not.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    delay_ms: u64,
    last_ms: Option<u64>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            last_ms: None,
        }
    }

    /// Milliseconds until a press at `now_ms` would be accepted.
    pub fn wait_ms(&self, now_ms: u64) -> u64 {
        match self.last_ms {
            Some(last) => (last + self.delay_ms).saturating_sub(now_ms),
            None => 0,
        }
    }

    pub fn ready(&self, now_ms: u64) -> bool {
        self.wait_ms(now_ms) == 0
    }

    /// Start a new window at `now_ms`.
    pub fn register(&mut self, now_ms: u64) {
        self.last_ms = Some(now_ms);
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

/// Produces intents for the control loop: buttons, a script, or a bot.
pub trait InputSource<const N: usize> {
    /// Next intent, given what we know of the enemy grid and where the
    /// cursor is. `None` means nothing was pressed.
    fn poll(&mut self, view: &TargetGrid<N>, cursor: Cursor) -> Option<Intent>;
}
