//! Per-cycle input summary.
//!
//! The app loop folds every [`InputEvent`] that arrives between two cycles
//! into one [`InputFrame`]. Widgets only ever see the frame: edge flags for
//! the primary button, the latest pointer position, wheel notches and the key
//! transitions in arrival order.

use crate::geometry::Offset;

use super::input::{InputEvent, KeyEvent, MouseAction, MouseBtn};

/// Default wheel step in surface units.
pub const DEFAULT_SCROLL_STEP: i32 = 20;
/// Default delay before a held key starts repeating, in seconds.
pub const DEFAULT_REPEAT_DELAY: f64 = 0.5;
/// Default gap between repeats of a held key, in seconds.
pub const DEFAULT_REPEAT_INTERVAL: f64 = 0.05;
/// Default caret blink half-period, in seconds.
pub const DEFAULT_CARET_BLINK: f64 = 0.5;

// ---------------------------------------------------------------------------
// InputFrame
// ---------------------------------------------------------------------------

/// Everything that happened to the input devices during one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// The primary button went down this cycle.
    pub click_edge: bool,
    /// The primary button came up this cycle.
    pub release_edge: bool,
    /// Last known pointer position.
    pub pointer: Offset,
    /// Net wheel notches; positive scrolls the content down.
    pub scroll: i32,
    /// Key transitions in arrival order.
    pub keys: Vec<KeyEvent>,
}

impl InputFrame {
    /// An empty frame with the pointer at `pointer`.
    pub fn at(pointer: Offset) -> Self {
        Self { pointer, ..Self::default() }
    }

    /// A frame with a primary-button press at `(x, y)`.
    pub fn click(x: i32, y: i32) -> Self {
        Self { click_edge: true, ..Self::at(Offset::new(x, y)) }
    }

    /// A frame with a primary-button release at `(x, y)`.
    pub fn release(x: i32, y: i32) -> Self {
        Self { release_edge: true, ..Self::at(Offset::new(x, y)) }
    }

    /// Fold one raw event into the frame.
    pub fn push(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Mouse(me) => {
                self.pointer = Offset::new(i32::from(me.x), i32::from(me.y));
                match me.kind {
                    MouseAction::Down(MouseBtn::Left) => self.click_edge = true,
                    MouseAction::Up(MouseBtn::Left) => self.release_edge = true,
                    MouseAction::ScrollUp => self.scroll -= 1,
                    MouseAction::ScrollDown => self.scroll += 1,
                    _ => {}
                }
            }
            InputEvent::Key(ke) => self.keys.push(*ke),
            _ => {}
        }
    }

    /// Hand out the accumulated frame and start a fresh one at the same pointer.
    pub fn take(&mut self) -> InputFrame {
        let pointer = self.pointer;
        std::mem::replace(self, InputFrame::at(pointer))
    }

    /// Whether nothing but the pointer is set.
    pub fn is_idle(&self) -> bool {
        !self.click_edge && !self.release_edge && self.scroll == 0 && self.keys.is_empty()
    }
}

// ---------------------------------------------------------------------------
// InputSettings
// ---------------------------------------------------------------------------

/// Tunables the focus pass hands to widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSettings {
    pub scroll_step: i32,
    pub repeat_delay: f64,
    pub repeat_interval: f64,
    pub caret_blink: f64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            scroll_step: DEFAULT_SCROLL_STEP,
            repeat_delay: DEFAULT_REPEAT_DELAY,
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
            caret_blink: DEFAULT_CARET_BLINK,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
