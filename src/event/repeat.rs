//! Time-threshold state machines: held-key repeat and caret blink.
//!
//! Both are driven by the cycle clock (`now`, seconds) instead of timers, so a
//! stalled frame never produces a burst of catch-up events.

use super::input::Key;

// ---------------------------------------------------------------------------
// KeyRepeat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RepeatPhase {
    /// Key went down; fire on the next poll.
    #[default]
    First,
    /// Fired once; waiting out the initial delay.
    Delay,
    /// Firing once per interval.
    Repeating,
}

/// Repeat generator for the most recently pressed key.
///
/// Fires once on the first poll after key-down, then stays quiet for the
/// initial delay, then fires once per interval until the key comes up.
#[derive(Debug, Clone, Default)]
pub struct KeyRepeat {
    held: Option<Key>,
    phase: RepeatPhase,
    pressed_at: f64,
    last_fired: f64,
}

impl KeyRepeat {
    pub fn new() -> Self {
        Self::default()
    }

    /// A key went down. It replaces whatever was held.
    pub fn press(&mut self, key: Key, now: f64) {
        self.held = Some(key);
        self.phase = RepeatPhase::First;
        self.pressed_at = now;
        self.last_fired = now;
    }

    /// A key came up. Stops repetition if it is the held key.
    pub fn release(&mut self, key: Key) {
        if self.held == Some(key) {
            self.held = None;
        }
    }

    /// Forget the held key.
    pub fn clear(&mut self) {
        self.held = None;
    }

    pub fn held(&self) -> Option<Key> {
        self.held
    }

    /// Return the held key if it should act this cycle.
    pub fn poll(&mut self, now: f64, delay: f64, interval: f64) -> Option<Key> {
        let key = self.held?;
        let fire = match self.phase {
            RepeatPhase::First => {
                self.phase = RepeatPhase::Delay;
                true
            }
            RepeatPhase::Delay if now - self.pressed_at >= delay => {
                self.phase = RepeatPhase::Repeating;
                true
            }
            RepeatPhase::Delay => false,
            RepeatPhase::Repeating => now - self.last_fired >= interval,
        };
        if fire {
            self.last_fired = now;
            Some(key)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Blink
// ---------------------------------------------------------------------------

/// Caret visibility toggling once per period, measured from the last toggle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blink {
    visible: bool,
    last_toggle: f64,
}

impl Blink {
    pub fn new(now: f64) -> Self {
        Self { visible: true, last_toggle: now }
    }

    /// Show the caret and restart the period.
    pub fn reset(&mut self, now: f64) {
        self.visible = true;
        self.last_toggle = now;
    }

    /// Advance to `now` and report visibility.
    pub fn update(&mut self, now: f64, period: f64) -> bool {
        if now - self.last_toggle >= period {
            self.visible = !self.visible;
            self.last_toggle = now;
        }
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Default for Blink {
    fn default() -> Self {
        Self::new(0.0)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: f64 = 0.5;
    const INTERVAL: f64 = 0.05;

    // ── KeyRepeat ────────────────────────────────────────────────────

    #[test]
    fn nothing_held_never_fires() {
        let mut repeat = KeyRepeat::new();
        assert_eq!(repeat.poll(0.0, DELAY, INTERVAL), None);
    }

    #[test]
    fn fires_immediately_then_waits_then_repeats() {
        let mut repeat = KeyRepeat::new();
        repeat.press(Key::Char('a'), 1.0);

        assert_eq!(repeat.poll(1.0, DELAY, INTERVAL), Some(Key::Char('a')));
        assert_eq!(repeat.poll(1.1, DELAY, INTERVAL), None);
        assert_eq!(repeat.poll(1.4, DELAY, INTERVAL), None);
        assert_eq!(repeat.poll(1.5, DELAY, INTERVAL), Some(Key::Char('a')));
        assert_eq!(repeat.poll(1.52, DELAY, INTERVAL), None);
        assert_eq!(repeat.poll(1.56, DELAY, INTERVAL), Some(Key::Char('a')));
        assert_eq!(repeat.poll(1.58, DELAY, INTERVAL), None);
        assert_eq!(repeat.poll(1.62, DELAY, INTERVAL), Some(Key::Char('a')));
    }

    #[test]
    fn release_stops_repetition() {
        let mut repeat = KeyRepeat::new();
        repeat.press(Key::Backspace, 0.0);
        assert!(repeat.poll(0.0, DELAY, INTERVAL).is_some());
        repeat.release(Key::Backspace);
        assert_eq!(repeat.poll(2.0, DELAY, INTERVAL), None);
        assert_eq!(repeat.held(), None);
    }

    #[test]
    fn releasing_another_key_keeps_repeating() {
        let mut repeat = KeyRepeat::new();
        repeat.press(Key::Char('a'), 0.0);
        repeat.release(Key::Char('b'));
        assert_eq!(repeat.poll(0.0, DELAY, INTERVAL), Some(Key::Char('a')));
    }

    #[test]
    fn new_press_restarts_the_cycle() {
        let mut repeat = KeyRepeat::new();
        repeat.press(Key::Char('a'), 0.0);
        repeat.poll(0.0, DELAY, INTERVAL);
        repeat.press(Key::Char('b'), 0.3);
        assert_eq!(repeat.poll(0.3, DELAY, INTERVAL), Some(Key::Char('b')));
        assert_eq!(repeat.poll(0.6, DELAY, INTERVAL), None);
        assert_eq!(repeat.poll(0.8, DELAY, INTERVAL), Some(Key::Char('b')));
    }

    // ── Blink ────────────────────────────────────────────────────────

    #[test]
    fn blink_toggles_every_period_from_last_toggle() {
        let mut blink = Blink::new(0.0);
        assert!(blink.update(0.2, 0.5));
        assert!(!blink.update(0.5, 0.5));
        assert!(!blink.update(0.9, 0.5));
        assert!(blink.update(1.0, 0.5));
        // A long stall toggles once, not once per missed period.
        assert!(!blink.update(5.0, 0.5));
        assert!(!blink.update(5.3, 0.5));
    }

    #[test]
    fn blink_reset_shows_caret() {
        let mut blink = Blink::new(0.0);
        blink.update(0.6, 0.5);
        assert!(!blink.is_visible());
        blink.reset(0.7);
        assert!(blink.is_visible());
        assert!(blink.update(1.1, 0.5));
    }
}
