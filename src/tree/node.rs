//! Node types: WidgetId, Node.

use slotmap::new_key_type;

use crate::geometry::Region;
use crate::layout::LayoutSpec;
use crate::widget::Widget;

new_key_type! {
    /// Handle to a widget in a [`WidgetTree`](super::WidgetTree). Copy, lightweight (u64).
    pub struct WidgetId;
}

/// Per-node state the engine owns on behalf of a widget.
pub struct Node {
    /// Resolved rectangle in surface coordinates.
    pub geometry: Region,
    pub layout: LayoutSpec,
    /// Invisible nodes (and their subtrees) are neither drawn nor dispatched to.
    pub visible: bool,
    /// Draw after all non-floating nodes this cycle.
    pub draw_to_front: bool,
    pub(crate) widget: Box<dyn Widget>,
}

impl Node {
    /// Wrap a widget at the origin with its default size and fixed layout.
    pub fn new(widget: Box<dyn Widget>) -> Self {
        let geometry = widget.default_size().to_region();
        Self {
            geometry,
            layout: LayoutSpec::new(),
            visible: true,
            draw_to_front: false,
            widget,
        }
    }

    pub fn widget(&self) -> &dyn Widget {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> &mut dyn Widget {
        self.widget.as_mut()
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("widget", &self.widget.widget_type())
            .field("geometry", &self.geometry)
            .field("visible", &self.visible)
            .field("draw_to_front", &self.draw_to_front)
            .finish_non_exhaustive()
    }
}
