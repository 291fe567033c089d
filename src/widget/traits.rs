//! Widget trait and the per-pass context structs.
//!
//! Every widget implements [`Widget`]. The tree owns widgets as
//! `Box<dyn Widget>`; the engine drives them through three passes per cycle:
//!
//! 1. [`process`](Widget::process) with an [`EventCtx`] (pointer claims),
//! 2. [`process_focus`](Widget::process_focus) with a [`FocusCtx`] (keys, wheel),
//! 3. [`measure`](Widget::measure) then [`draw`](Widget::draw) with a [`DrawCtx`].
//!
//! Widgets never see their parent or siblings; geometry comes in through the
//! context, already resolved.

use std::any::Any;

use crate::event::frame::{InputFrame, InputSettings};
use crate::geometry::{Offset, Region, Size};
use crate::render::canvas::{Canvas, TextShaper};
use crate::tree::WidgetId;

/// Size of a widget whose type declares nothing else.
pub const DEFAULT_WIDGET_SIZE: Size = Size::new(10, 10);

// ---------------------------------------------------------------------------
// Contexts
// ---------------------------------------------------------------------------

/// Context for the pointer pass.
pub struct EventCtx<'a> {
    /// The node being processed.
    pub id: WidgetId,
    /// Its resolved rectangle, in surface coordinates.
    pub region: Region,
    pub frame: &'a InputFrame,
    pub shaper: &'a dyn TextShaper,
    pub now: f64,
    /// Float above siblings on the next draw. Written back to the node.
    pub draw_to_front: bool,
}

impl EventCtx<'_> {
    /// Whether the pointer is strictly inside this widget.
    pub fn hovered(&self) -> bool {
        self.region.contains_strict(self.frame.pointer)
    }
}

/// Context for the keyboard and wheel pass.
pub struct FocusCtx<'a> {
    pub id: WidgetId,
    pub region: Region,
    pub frame: &'a InputFrame,
    pub shaper: &'a dyn TextShaper,
    pub now: f64,
    pub settings: &'a InputSettings,
    /// Height spanned by this node's children, measured from its unscrolled top.
    pub content_height: i32,
}

impl FocusCtx<'_> {
    pub fn hovered(&self) -> bool {
        self.region.contains_strict(self.frame.pointer)
    }
}

/// Context for the draw pass.
pub struct DrawCtx<'a> {
    pub id: WidgetId,
    pub region: Region,
    pub now: f64,
    pub canvas: &'a mut dyn Canvas,
    pub shaper: &'a dyn TextShaper,
}

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by everything that lives in the widget tree.
///
/// Object-safe; owned by the tree as `Box<dyn Widget>`.
pub trait Widget: Any {
    /// Type name used in logs and debug output.
    fn widget_type(&self) -> &str;

    /// Size given to a freshly inserted node.
    fn default_size(&self) -> Size {
        DEFAULT_WIDGET_SIZE
    }

    /// Whether other nodes may be attached under this one.
    fn accepts_children(&self) -> bool {
        false
    }

    /// Displacement applied to the origin of every child (scroll bias).
    fn content_offset(&self) -> Offset {
        Offset::default()
    }

    /// Intrinsic size for WRAP sizing, refreshed before every layout pass.
    ///
    /// `None` keeps whatever size the node already has.
    fn measure(&mut self, _shaper: &dyn TextShaper) -> Option<Size> {
        None
    }

    /// Paint the widget. Children are drawn by the engine afterwards.
    fn draw(&mut self, cx: &mut DrawCtx<'_>);

    /// Pointer pass. Receives the current claim and returns the new one.
    ///
    /// A widget that acts on the pointer returns `Some(cx.id)` (or the id it
    /// acts for); one that doesn't must return `consumed` unchanged.
    fn process(&mut self, _cx: &mut EventCtx<'_>, consumed: Option<WidgetId>) -> Option<WidgetId> {
        consumed
    }

    /// Keyboard and wheel pass. Runs for every visible node after the pointer pass.
    fn process_focus(&mut self, _cx: &mut FocusCtx<'_>) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ---------------------------------------------------------------------------
// Callbacks
// ---------------------------------------------------------------------------

/// A user action attached to a widget, invoked with the widget that fired it.
pub type Callback<W> = Box<dyn FnMut(&mut W)>;

/// Invoke the callback stored in `slot(widget)`, if any.
///
/// The callback is taken out for the duration of the call so it can borrow the
/// widget mutably; it is put back unless it installed a replacement.
pub(crate) fn fire<W>(widget: &mut W, slot: fn(&mut W) -> &mut Option<Callback<W>>) {
    if let Some(mut callback) = slot(widget).take() {
        callback(widget);
        let stored = slot(widget);
        if stored.is_none() {
            *stored = Some(callback);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
