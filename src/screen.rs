//! Screen: the outermost container and its per-cycle passes.
//!
//! [`Screen`] owns the widget tree, the root [`Container`] that stands for the
//! drawing surface, and the [`FloatingLayer`]. One cycle is
//! [`process_events`](Screen::process_events), then
//! [`process_focus`](Screen::process_focus), then [`draw`](Screen::draw);
//! [`cycle`](Screen::cycle) runs all three.
//!
//! Draw order is insertion order. A node flagged `draw_to_front` is skipped
//! where it stands and pushed onto the floating layer instead; the layer is
//! painted last, unclipped, and handed to the next pointer pass so floating
//! nodes get first refusal.

use tracing::trace;

use crate::event::dispatch::{dispatch_focus, Dispatch, FloatingLayer};
use crate::event::frame::{InputFrame, InputSettings};
use crate::geometry::{Region, Size};
use crate::layout::LayoutError;
use crate::render::canvas::{Canvas, TextShaper};
use crate::render::color::Color;
use crate::tree::{TreeError, WidgetId, WidgetTree};
use crate::widget::{DrawCtx, Widget};
use crate::widgets::Container;

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

pub struct Screen {
    pub tree: WidgetTree,
    root: WidgetId,
    layer: FloatingLayer,
    pub settings: InputSettings,
}

impl Screen {
    /// A screen covering `size`, with an empty root container.
    pub fn new(size: Size) -> Self {
        Self::with_root(size, Container::new())
    }

    /// A screen whose root container fills with `color`.
    pub fn with_background(size: Size, color: Color) -> Self {
        Self::with_root(size, Container::new().with_background(color))
    }

    fn with_root(size: Size, root: Container) -> Self {
        let mut tree = WidgetTree::new();
        let root = tree.insert(root);
        if let Some(node) = tree.get_mut(root) {
            node.geometry = size.to_region();
        }
        Self {
            tree,
            root,
            layer: FloatingLayer::new(),
            settings: InputSettings::default(),
        }
    }

    /// The root container's id.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn size(&self) -> Size {
        self.tree.geometry(self.root).map(Region::size).unwrap_or(Size::ZERO)
    }

    pub fn resize(&mut self, size: Size) {
        if let Some(node) = self.tree.get_mut(self.root) {
            node.geometry = size.to_region();
        }
    }

    /// Insert `widget` and make it relative to the root.
    pub fn add(&mut self, widget: impl Widget) -> Result<WidgetId, TreeError> {
        self.add_to(self.root, widget)
    }

    /// Insert `widget` and make it relative to `parent`.
    pub fn add_to(&mut self, parent: WidgetId, widget: impl Widget) -> Result<WidgetId, TreeError> {
        let id = self.tree.insert(widget);
        if let Err(err) = self.tree.set_relative(id, parent) {
            self.tree.remove(id);
            return Err(err);
        }
        Ok(id)
    }

    /// Nodes deferred by the last draw, in the order they were deferred.
    pub fn floating(&self) -> &FloatingLayer {
        &self.layer
    }

    // ── Passes ───────────────────────────────────────────────────────

    /// Pointer pass. Returns the node that claimed the cycle, if any.
    ///
    /// Consumes the floating layer left by the previous draw.
    pub fn process_events(&mut self, frame: &InputFrame, shaper: &dyn TextShaper, now: f64) -> Option<WidgetId> {
        let dispatch = Dispatch { frame, shaper, now };
        let claim = dispatch.run(&mut self.tree, self.root, &self.layer);
        self.layer.clear();
        claim
    }

    /// Keyboard and wheel pass.
    pub fn process_focus(&mut self, frame: &InputFrame, shaper: &dyn TextShaper, now: f64) {
        dispatch_focus(&mut self.tree, self.root, frame, &self.settings, shaper, now);
    }

    /// Measure, resolve layout, then paint everything onto `canvas`.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, shaper: &dyn TextShaper, now: f64) -> Result<(), LayoutError> {
        self.layer.clear();
        self.measure(shaper);
        self.tree.resolve_all(self.root)?;

        let mut painter = Painter { tree: &mut self.tree, layer: &mut self.layer, canvas, shaper, now };
        let bounds = painter.tree.geometry(self.root);
        painter.paint(self.root, bounds, false);

        // Floating nodes may defer their own children; those join the end of the layer.
        let mut index = 0;
        while let Some(id) = painter.layer.get(index) {
            painter.paint(id, None, true);
            index += 1;
        }
        painter.canvas.set_clip(None);
        trace!(floating = self.layer.len(), "screen drawn");
        Ok(())
    }

    /// One full cycle. Returns the pointer claim.
    pub fn cycle(
        &mut self,
        frame: &InputFrame,
        canvas: &mut dyn Canvas,
        shaper: &dyn TextShaper,
        now: f64,
    ) -> Result<Option<WidgetId>, LayoutError> {
        let claim = self.process_events(frame, shaper, now);
        self.process_focus(frame, shaper, now);
        self.draw(canvas, shaper, now)?;
        Ok(claim)
    }

    /// Give every node its intrinsic size ahead of layout.
    fn measure(&mut self, shaper: &dyn TextShaper) {
        for id in self.tree.walk_depth_first(self.root) {
            if let Some(node) = self.tree.get_mut(id) {
                if let Some(size) = node.widget.measure(shaper) {
                    node.geometry.width = size.width;
                    node.geometry.height = size.height;
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Painter
// ---------------------------------------------------------------------------

struct Painter<'a> {
    tree: &'a mut WidgetTree,
    layer: &'a mut FloatingLayer,
    canvas: &'a mut dyn Canvas,
    shaper: &'a dyn TextShaper,
    now: f64,
}

impl Painter<'_> {
    /// Paint `id` and its subtree inside `clip`.
    ///
    /// `floating` is set when `id` itself comes off the floating layer.
    fn paint(&mut self, id: WidgetId, clip: Option<Region>, floating: bool) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        if node.draw_to_front && !floating {
            self.layer.push(id);
            return;
        }
        let region = node.geometry;
        self.canvas.set_clip(clip);
        let mut cx = DrawCtx { id, region, now: self.now, canvas: &mut *self.canvas, shaper: self.shaper };
        node.widget.draw(&mut cx);

        let inner = match clip {
            Some(clip) => clip.intersection(region),
            None => region,
        };
        for child in self.tree.children(id).to_vec() {
            self.paint(child, Some(inner), false);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::render::cells::{CellCanvas, CellShaper};
    use crate::widgets::{Button, DropDownButton, Label};

    fn screen() -> Screen {
        Screen::new(Size::new(40, 20))
    }

    fn place(screen: &mut Screen, id: WidgetId, region: Region) {
        screen.tree.get_mut(id).unwrap().layout.mode = crate::layout::LayoutMode::Fixed;
        screen.tree.set_geometry(id, region).unwrap();
    }

    #[test]
    fn new_screen_has_root_at_size() {
        let screen = screen();
        assert_eq!(screen.size(), Size::new(40, 20));
        assert!(screen.tree.children(screen.root()).is_empty());
        assert!(screen.floating().is_empty());
    }

    #[test]
    fn add_makes_relative_to_root() {
        let mut screen = screen();
        let label = screen.add(Label::new("hi")).unwrap();
        assert_eq!(screen.tree.parent(label), Some(screen.root()));
        let err = screen.add_to(label, Label::new("x")).unwrap_err();
        assert_eq!(err, TreeError::NotAContainer(label));
        assert_eq!(screen.tree.len(), 2);
    }

    #[test]
    fn draw_measures_and_resolves() {
        let mut screen = screen();
        let label = screen.add(Label::new("hello")).unwrap();
        screen.tree.layout_mut(label).unwrap().set_gravity("right bottom").unwrap();
        let mut canvas = CellCanvas::new(40, 20);
        screen.draw(&mut canvas, &CellShaper, 0.0).unwrap();
        assert_eq!(screen.tree.geometry(label), Some(Region::new(35, 19, 5, 1)));
        assert_eq!(canvas.get(35, 19).unwrap().ch, 'h');
    }

    #[test]
    fn layout_errors_surface_from_draw() {
        let mut screen = screen();
        let label = screen.add(Label::new("x")).unwrap();
        screen.tree.layout_mut(label).unwrap().align_left = Some(4);
        let mut canvas = CellCanvas::new(40, 20);
        let err = screen.draw(&mut canvas, &CellShaper, 0.0).unwrap_err();
        assert!(matches!(err, LayoutError::MissingSibling { .. }));
    }

    #[test]
    fn children_are_clipped_to_their_container() {
        let mut screen = screen();
        let panel = screen.add(Container::new()).unwrap();
        place(&mut screen, panel, Region::new(0, 0, 4, 4));
        let label = screen.add_to(panel, Label::new("abcdef")).unwrap();
        let mut canvas = CellCanvas::new(40, 20);
        screen.draw(&mut canvas, &CellShaper, 0.0).unwrap();
        assert_eq!(screen.tree.geometry(label), Some(Region::new(0, 0, 6, 1)));
        assert_eq!(canvas.get(3, 0).unwrap().ch, 'd');
        assert_eq!(canvas.get(4, 0).unwrap().ch, ' ');
    }

    #[test]
    fn floating_nodes_draw_last_and_unclipped() {
        let mut screen = screen();
        let top = screen.add(Label::new("AAAA")).unwrap();
        screen.add(Label::new("BB")).unwrap();
        screen.tree.get_mut(top).unwrap().draw_to_front = true;
        let mut canvas = CellCanvas::new(40, 20);
        screen.draw(&mut canvas, &CellShaper, 0.0).unwrap();
        assert_eq!(screen.floating().ids(), &[top]);
        assert_eq!(canvas.get(0, 0).unwrap().ch, 'A');
        assert_eq!(canvas.get(1, 0).unwrap().ch, 'A');
    }

    #[test]
    fn layer_is_cleared_after_dispatch() {
        let mut screen = screen();
        let a = screen.add(Label::new("a")).unwrap();
        screen.tree.get_mut(a).unwrap().draw_to_front = true;
        let mut canvas = CellCanvas::new(40, 20);
        screen.draw(&mut canvas, &CellShaper, 0.0).unwrap();
        assert_eq!(screen.floating().len(), 1);
        screen.process_events(&InputFrame::default(), &CellShaper, 0.0);
        assert!(screen.floating().is_empty());
    }

    #[test]
    fn invisible_nodes_are_not_drawn() {
        let mut screen = screen();
        let label = screen.add(Label::new("zz")).unwrap();
        screen.tree.set_visible(label, false).unwrap();
        let mut canvas = CellCanvas::new(40, 20);
        screen.draw(&mut canvas, &CellShaper, 0.0).unwrap();
        assert_eq!(canvas.get(0, 0).unwrap().ch, ' ');
    }

    #[test]
    fn open_drop_down_wins_over_later_sibling() {
        let mut screen = screen();
        let menu = screen.add(DropDownButton::new("Menu", ["one", "two"])).unwrap();
        place(&mut screen, menu, Region::new(0, 0, 10, 3));
        let below = screen.add(Button::new("below")).unwrap();
        place(&mut screen, below, Region::new(0, 2, 10, 6));
        let mut canvas = CellCanvas::new(40, 20);

        screen.cycle(&InputFrame::click(5, 1), &mut canvas, &CellShaper, 0.0).unwrap();
        screen.cycle(&InputFrame::release(5, 1), &mut canvas, &CellShaper, 0.0).unwrap();
        assert!(screen.tree.widget::<DropDownButton>(menu).unwrap().is_open());
        assert_eq!(screen.floating().ids(), &[menu]);

        // Entry 0 sits at y 2..5, over the button below.
        let claim = screen.cycle(&InputFrame::click(5, 3), &mut canvas, &CellShaper, 0.0).unwrap();
        assert_eq!(claim, Some(menu));
        assert!(!screen.tree.widget::<Button>(below).unwrap().is_pressed());
    }
}
