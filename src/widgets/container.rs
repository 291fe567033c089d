//! Container widget: a background and a vertical scroll position.
//!
//! Children live in the [`WidgetTree`](crate::tree::WidgetTree), not in the
//! container. The container's part in layout is [`Widget::content_offset`]:
//! the scroll bias that the solver adds to every child's origin, so children
//! are laid out and hit-tested without knowing they scroll.

use std::any::Any;

use tracing::debug;

use crate::geometry::{Offset, Size};
use crate::render::color::Color;
use crate::widget::scroll::ScrollState;
use crate::widget::traits::{DrawCtx, FocusCtx, Widget};

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// A widget that holds children.
///
/// # Examples
///
/// ```ignore
/// let list = tree.insert(Container::new().with_background(Color::WHITE).scrollable());
/// tree.set_relative(list, root)?;
/// if let Some(layout) = tree.layout_mut(list) {
///     layout.match_parent();
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub background: Option<Color>,
    pub scroll: ScrollState,
    pub scrollable: bool,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Let the wheel scroll this container while the pointer is over it.
    pub fn scrollable(mut self) -> Self {
        self.scrollable = true;
        self
    }

    /// Current scroll offset; `0` is the natural top.
    pub fn scroll_offset(&self) -> i32 {
        self.scroll.offset.y
    }
}

impl Widget for Container {
    fn widget_type(&self) -> &str {
        "Container"
    }

    fn accepts_children(&self) -> bool {
        true
    }

    fn content_offset(&self) -> Offset {
        self.scroll.bias()
    }

    fn draw(&mut self, cx: &mut DrawCtx<'_>) {
        if let Some(color) = self.background {
            cx.canvas.fill_rect(cx.region, color);
        }
    }

    fn process_focus(&mut self, cx: &mut FocusCtx<'_>) {
        let notches = cx.frame.scroll;
        if !self.scrollable || notches == 0 || !cx.hovered() {
            return;
        }
        let content = Size::new(cx.region.width, cx.content_height);
        self.scroll.set_extents(content, cx.region.size());
        self.scroll.scroll_by(0, notches * cx.settings.scroll_step);
        debug!(id = ?cx.id, offset = self.scroll.offset.y, "container scrolled");
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
