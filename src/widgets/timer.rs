//! Circular countdown timer cycling through a list of intervals.
//!
//! The timer keeps no background state between cycles: every draw recomputes
//! its progress from the cycle clock and rolls over to the next interval once
//! the current one has run out.

use std::any::Any;

use tracing::debug;

use crate::geometry::{Offset, Size};
use crate::render::color::Color;
use crate::widget::traits::{DrawCtx, Widget};

/// Size given to a freshly inserted timer.
pub const TIMER_SIZE: Size = Size::new(300, 300);

const TEXT_SIZE: u16 = 40;
const RING_WIDTH: i32 = 3;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimerError {
    #[error("a timer needs at least one interval")]
    NoIntervals,
    #[error("timer intervals must be positive seconds, got {0}")]
    InvalidInterval(f64),
}

/// Format seconds as `m:ss`, rounding down. Negative values show as `0:00`.
pub fn format_remaining(seconds: f64) -> String {
    let whole = seconds.max(0.0) as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

// ---------------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Timer {
    intervals: Vec<f64>,
    current: usize,
    started: Option<f64>,
    pub bar_color: Color,
    pub center_color: Color,
    pub ring_color: Color,
    pub text_color: Color,
}

impl Timer {
    /// A timer over `intervals` (seconds). It starts on its first draw.
    pub fn new(intervals: Vec<f64>) -> Result<Self, TimerError> {
        if intervals.is_empty() {
            return Err(TimerError::NoIntervals);
        }
        if let Some(&bad) = intervals.iter().find(|&&s| !(s.is_finite() && s > 0.0)) {
            return Err(TimerError::InvalidInterval(bad));
        }
        Ok(Self {
            intervals,
            current: 0,
            started: None,
            bar_color: Color::BLUE,
            center_color: Color::RED,
            ring_color: Color::BLACK,
            text_color: Color::BLACK,
        })
    }

    /// Index of the running interval.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Start the current interval over at `now`.
    pub fn restart(&mut self, now: f64) {
        self.started = Some(now);
    }

    /// Fraction of the current interval elapsed at `now` (may exceed 1).
    pub fn fraction(&self, now: f64) -> f64 {
        let start = self.started.unwrap_or(now);
        (now - start) / self.intervals[self.current]
    }

    /// Seconds left in the current interval at `now`.
    pub fn remaining(&self, now: f64) -> f64 {
        let start = self.started.unwrap_or(now);
        self.intervals[self.current] - (now - start)
    }

    fn roll_over(&mut self, now: f64) {
        self.current = (self.current + 1) % self.intervals.len();
        self.started = Some(now);
        debug!(interval = self.current, "timer advanced");
    }
}

impl Widget for Timer {
    fn widget_type(&self) -> &str {
        "Timer"
    }

    fn default_size(&self) -> Size {
        TIMER_SIZE
    }

    fn draw(&mut self, cx: &mut DrawCtx<'_>) {
        let now = cx.now;
        if self.started.is_none() {
            self.started = Some(now);
        }
        let fraction = self.fraction(now);
        let region = cx.region;
        let center = Offset::new(region.x + region.width / 2, region.y + region.height / 2);

        // Progress wedge, clockwise from twelve o'clock.
        let reach = f64::from(region.width / 2 - 2);
        let swept = (fraction.min(1.0) * 360.0) as i32;
        for degree in 0..swept {
            let angle = f64::from(degree - 90).to_radians();
            let tip = Offset::new(
                center.x + (reach * angle.cos()).round() as i32,
                center.y + (reach * angle.sin()).round() as i32,
            );
            cx.canvas.line(center, tip, self.bar_color, 2);
        }

        cx.canvas.stroke_circle(center, region.width / 2 - 1, self.ring_color, RING_WIDTH);
        cx.canvas.fill_circle(center, (f64::from(region.width) / 2.7) as i32, self.center_color);

        let text = cx.shaper.shape(&format_remaining(self.remaining(now)), TEXT_SIZE, self.text_color);
        let at = Offset::new(
            region.x + (region.width - text.width()) / 2,
            region.y + (region.height - text.height()) / 2,
        );
        cx.canvas.blit_text(&text, at);

        if fraction >= 1.0 {
            self.roll_over(now);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
