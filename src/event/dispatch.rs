//! Per-cycle input dispatch.
//!
//! The pointer pass visits widgets topmost-first: the floating layer (in the
//! order the widgets were deferred), then the root's children in reverse
//! insertion order. Inside a
//! container the children are visited before the container itself, again in
//! reverse order. Floating nodes are skipped wherever they appear in the
//! regular walk, since they already had their turn.
//!
//! A single claim token (`Option<WidgetId>`) threads through the walk. The
//! first widget that acts on the pointer sets it; every later widget sees it
//! set and must leave the pointer alone. The returned token is the winner.

use tracing::{debug, trace};

use crate::render::canvas::TextShaper;
use crate::tree::{WidgetId, WidgetTree};
use crate::widget::{EventCtx, FocusCtx};

use super::frame::{InputFrame, InputSettings};

// ---------------------------------------------------------------------------
// FloatingLayer
// ---------------------------------------------------------------------------

/// Nodes deferred to the top of the z-order for the current cycle.
///
/// Filled by the draw pass, consumed by the next pointer pass, then cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloatingLayer {
    ids: Vec<WidgetId>,
}

impl FloatingLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defer `id`. A node is only ever deferred once per cycle.
    pub fn push(&mut self, id: WidgetId) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.ids.contains(&id)
    }

    pub fn get(&self, index: usize) -> Option<WidgetId> {
        self.ids.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Deferred nodes in draw order.
    pub fn ids(&self) -> &[WidgetId] {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

// ---------------------------------------------------------------------------
// Pointer pass
// ---------------------------------------------------------------------------

/// Shared inputs of one pointer pass.
pub struct Dispatch<'a> {
    pub frame: &'a InputFrame,
    pub shaper: &'a dyn TextShaper,
    pub now: f64,
}

impl Dispatch<'_> {
    /// Run the pointer pass under `root` and return the claim.
    ///
    /// `root` itself is not processed; it stands for the surface.
    pub fn run(
        &self,
        tree: &mut WidgetTree,
        root: WidgetId,
        layer: &FloatingLayer,
    ) -> Option<WidgetId> {
        let mut consumed = None;
        for &id in layer.ids() {
            consumed = self.visit(tree, id, layer, consumed);
        }
        for id in tree.children(root).to_vec().into_iter().rev() {
            if !layer.contains(id) {
                consumed = self.visit(tree, id, layer, consumed);
            }
        }
        if let Some(winner) = consumed {
            trace!(?winner, "pointer claimed");
        }
        consumed
    }

    fn visit(
        &self,
        tree: &mut WidgetTree,
        id: WidgetId,
        layer: &FloatingLayer,
        mut consumed: Option<WidgetId>,
    ) -> Option<WidgetId> {
        match tree.get(id) {
            Some(node) if node.visible => {}
            _ => return consumed,
        }
        for child in tree.children(id).to_vec().into_iter().rev() {
            if !layer.contains(child) {
                consumed = self.visit(tree, child, layer, consumed);
            }
        }

        let Some(node) = tree.get_mut(id) else {
            return consumed;
        };
        let mut cx = EventCtx {
            id,
            region: node.geometry,
            frame: self.frame,
            shaper: self.shaper,
            now: self.now,
            draw_to_front: node.draw_to_front,
        };
        let before = consumed;
        let after = node.widget.process(&mut cx, consumed);
        node.draw_to_front = cx.draw_to_front;
        if before.is_none() && after.is_some() {
            debug!(?id, widget = node.widget.widget_type(), "claimed pointer");
        }
        after
    }
}

// ---------------------------------------------------------------------------
// Focus pass
// ---------------------------------------------------------------------------

/// Run `process_focus` on every visible node under `root`, in pre-order.
pub fn dispatch_focus(
    tree: &mut WidgetTree,
    root: WidgetId,
    frame: &InputFrame,
    settings: &InputSettings,
    shaper: &dyn TextShaper,
    now: f64,
) {
    for id in tree.walk_visible(root) {
        let content_height = content_height(tree, id);
        let Some(node) = tree.get_mut(id) else {
            continue;
        };
        let mut cx = FocusCtx {
            id,
            region: node.geometry,
            frame,
            shaper,
            now,
            settings,
            content_height,
        };
        node.widget.process_focus(&mut cx);
    }
}

/// Extent of `id`'s visible children below its unscrolled top edge.
pub fn content_height(tree: &WidgetTree, id: WidgetId) -> i32 {
    let Some(node) = tree.get(id) else {
        return 0;
    };
    let bias = node.widget().content_offset().y;
    tree.children(id)
        .iter()
        .filter_map(|&c| tree.get(c))
        .filter(|c| c.visible)
        .map(|c| c.geometry.bottom() - bias - node.geometry.y)
        .max()
        .unwrap_or(0)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::geometry::{Offset, Region};
    use crate::render::cells::CellShaper;
    use crate::widget::{DrawCtx, Widget};

    type Log = Rc<RefCell<Vec<(&'static str, bool)>>>;

    /// Claims when hovered and unclaimed; logs (name, saw_claim) per visit.
    struct Grabber {
        name: &'static str,
        log: Log,
        children: bool,
        float_on_visit: bool,
    }

    impl Widget for Grabber {
        fn widget_type(&self) -> &str {
            "Grabber"
        }
        fn accepts_children(&self) -> bool {
            self.children
        }
        fn draw(&mut self, _cx: &mut DrawCtx<'_>) {}
        fn process(&mut self, cx: &mut EventCtx<'_>, consumed: Option<WidgetId>) -> Option<WidgetId> {
            self.log.borrow_mut().push((self.name, consumed.is_some()));
            if self.float_on_visit {
                cx.draw_to_front = true;
            }
            if consumed.is_none() && cx.hovered() && !self.children {
                Some(cx.id)
            } else {
                consumed
            }
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Fixture {
        tree: WidgetTree,
        root: WidgetId,
        log: Log,
    }

    impl Fixture {
        fn new() -> Self {
            let log: Log = Rc::default();
            let mut tree = WidgetTree::new();
            let root = tree.insert(Grabber { name: "root", log: log.clone(), children: true, float_on_visit: false });
            tree.set_geometry(root, Region::new(0, 0, 200, 200)).unwrap();
            Self { tree, root, log }
        }

        fn add(&mut self, parent: WidgetId, name: &'static str, region: Region, children: bool) -> WidgetId {
            let id = self.tree.insert(Grabber { name, log: self.log.clone(), children, float_on_visit: false });
            self.tree.attach(id, parent).unwrap();
            self.tree.set_geometry(id, region).unwrap();
            id
        }

        fn run(&mut self, frame: &InputFrame, layer: &FloatingLayer) -> Option<WidgetId> {
            let dispatch = Dispatch { frame, shaper: &CellShaper, now: 0.0 };
            dispatch.run(&mut self.tree, self.root, layer)
        }

        fn visits(&self) -> Vec<(&'static str, bool)> {
            self.log.borrow().clone()
        }
    }

    #[test]
    fn later_sibling_wins_overlap() {
        let mut fx = Fixture::new();
        let root = fx.root;
        fx.add(root, "a", Region::new(0, 0, 100, 50), false);
        let b = fx.add(root, "b", Region::new(0, 0, 100, 50), false);

        let claim = fx.run(&InputFrame::click(50, 25), &FloatingLayer::new());
        assert_eq!(claim, Some(b));
        assert_eq!(fx.visits(), vec![("b", false), ("a", true)]);
    }

    #[test]
    fn floating_nodes_go_first_and_once() {
        let mut fx = Fixture::new();
        let root = fx.root;
        let a = fx.add(root, "a", Region::new(0, 0, 100, 50), false);
        fx.add(root, "b", Region::new(0, 0, 100, 50), false);
        let mut layer = FloatingLayer::new();
        layer.push(a);
        layer.push(a);
        assert_eq!(layer.len(), 1);

        let claim = fx.run(&InputFrame::click(50, 25), &layer);
        assert_eq!(claim, Some(a));
        assert_eq!(fx.visits(), vec![("a", false), ("b", true)]);
    }

    #[test]
    fn first_deferred_floating_node_wins() {
        let mut fx = Fixture::new();
        let root = fx.root;
        let a = fx.add(root, "a", Region::new(0, 0, 10, 5), false);
        let b = fx.add(root, "b", Region::new(0, 0, 10, 5), false);
        let mut layer = FloatingLayer::new();
        layer.push(a);
        layer.push(b);

        let claim = fx.run(&InputFrame::click(5, 2), &layer);
        assert_eq!(claim, Some(a));
        assert_eq!(fx.visits(), vec![("a", false), ("b", true)]);
    }

    #[test]
    fn children_before_their_container() {
        let mut fx = Fixture::new();
        let root = fx.root;
        let panel = fx.add(root, "panel", Region::new(0, 0, 200, 200), true);
        fx.add(panel, "first", Region::new(0, 0, 10, 10), false);
        fx.add(panel, "second", Region::new(0, 0, 10, 10), false);
        fx.run(&InputFrame::at(Offset::new(150, 150)), &FloatingLayer::new());
        assert_eq!(
            fx.visits(),
            vec![("second", false), ("first", false), ("panel", false)]
        );
    }

    #[test]
    fn invisible_subtrees_are_skipped() {
        let mut fx = Fixture::new();
        let root = fx.root;
        let panel = fx.add(root, "panel", Region::new(0, 0, 200, 200), true);
        fx.add(panel, "inner", Region::new(0, 0, 100, 100), false);
        fx.tree.set_visible(panel, false).unwrap();
        let claim = fx.run(&InputFrame::click(50, 50), &FloatingLayer::new());
        assert_eq!(claim, None);
        assert!(fx.visits().is_empty());
    }

    #[test]
    fn draw_to_front_is_written_back() {
        let mut fx = Fixture::new();
        let root = fx.root;
        let a = fx.add(root, "a", Region::new(0, 0, 10, 10), false);
        fx.tree.widget_mut::<Grabber>(a).unwrap().float_on_visit = true;
        fx.run(&InputFrame::default(), &FloatingLayer::new());
        assert!(fx.tree.get(a).unwrap().draw_to_front);
    }

    #[test]
    fn content_height_ignores_bias_and_hidden_children() {
        let mut fx = Fixture::new();
        let root = fx.root;
        fx.tree.set_geometry(root, Region::new(0, 10, 200, 50)).unwrap();
        fx.add(root, "a", Region::new(0, 10, 10, 40), false);
        let hidden = fx.add(root, "b", Region::new(0, 10, 10, 400), false);
        fx.add(root, "c", Region::new(0, 60, 10, 30), false);
        fx.tree.set_visible(hidden, false).unwrap();
        assert_eq!(content_height(&fx.tree, root), 80);
    }
}
