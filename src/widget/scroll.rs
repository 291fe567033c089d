//! Scroll state for containers.
//!
//! `ScrollState` tracks how far a container's content has been scrolled.
//! The offset is always clamped to `[0, max(0, content - viewport)]` per axis,
//! so the bias it produces never pushes content past its leading edge and the
//! last child never rises above the viewport's trailing edge.

use crate::geometry::{Offset, Size};

// ---------------------------------------------------------------------------
// ScrollState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrollState {
    /// Current scroll offset (always >= 0, clamped to max).
    pub offset: Offset,
    /// Extent of the scrollable content.
    pub content_size: Size,
    /// Extent of the visible area.
    pub viewport_size: Size,
}

impl ScrollState {
    pub fn new(content_size: Size, viewport_size: Size) -> Self {
        Self {
            offset: Offset::default(),
            content_size,
            viewport_size,
        }
    }

    /// Largest permitted offset on each axis.
    pub fn max_scroll(&self) -> Offset {
        Offset::new(
            (self.content_size.width - self.viewport_size.width).max(0),
            (self.content_size.height - self.viewport_size.height).max(0),
        )
    }

    /// Scroll to an absolute position, clamped.
    pub fn scroll_to(&mut self, x: i32, y: i32) {
        let max = self.max_scroll();
        self.offset = Offset::new(x.clamp(0, max.x), y.clamp(0, max.y));
    }

    /// Scroll by a relative delta, clamped.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.scroll_to(self.offset.x + dx, self.offset.y + dy);
    }

    /// Update both extents and re-clamp the offset.
    pub fn set_extents(&mut self, content: Size, viewport: Size) {
        self.content_size = content;
        self.viewport_size = viewport;
        self.scroll_to(self.offset.x, self.offset.y);
    }

    /// Displacement to apply to content: the negated offset, never positive.
    pub fn bias(&self) -> Offset {
        -self.offset
    }

    pub fn is_scrollable_y(&self) -> bool {
        self.content_size.height > self.viewport_size.height
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tall() -> ScrollState {
        ScrollState::new(Size::new(100, 200), Size::new(100, 50))
    }

    #[test]
    fn max_scroll_is_overflow() {
        assert_eq!(tall().max_scroll(), Offset::new(0, 150));
        let fits = ScrollState::new(Size::new(10, 10), Size::new(40, 30));
        assert_eq!(fits.max_scroll(), Offset::new(0, 0));
        assert!(!fits.is_scrollable_y());
    }

    #[test]
    fn scroll_by_clamps_both_ends() {
        let mut state = tall();
        state.scroll_by(0, -20);
        assert_eq!(state.offset, Offset::new(0, 0));
        state.scroll_by(0, 60);
        assert_eq!(state.offset, Offset::new(0, 60));
        state.scroll_by(0, 1000);
        assert_eq!(state.offset, Offset::new(0, 150));
        state.scroll_by(5, 0);
        assert_eq!(state.offset.x, 0);
    }

    #[test]
    fn bias_is_never_positive() {
        let mut state = tall();
        assert_eq!(state.bias(), Offset::new(0, 0));
        state.scroll_to(0, 40);
        assert_eq!(state.bias(), Offset::new(0, -40));
        state.scroll_to(0, -40);
        assert_eq!(state.bias(), Offset::new(0, 0));
    }

    #[test]
    fn set_extents_reclamps() {
        let mut state = tall();
        state.scroll_to(0, 120);
        state.set_extents(Size::new(100, 80), Size::new(100, 50));
        assert_eq!(state.offset, Offset::new(0, 30));
    }
}
