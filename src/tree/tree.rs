//! Tree operations: insert, attach, remove, walk, typed access.

use slotmap::{SecondaryMap, SlotMap};

use crate::geometry::Region;
use crate::layout::{LayoutError, LayoutMode, LayoutPass, LayoutSpec};
use crate::widget::Widget;

use super::node::{Node, WidgetId};

const EMPTY_CHILDREN: &[WidgetId] = &[];

// ---------------------------------------------------------------------------
// TreeError
// ---------------------------------------------------------------------------

/// Structural misuse of the widget tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("widget {0:?} does not exist")]
    UnknownWidget(WidgetId),
    #[error("widget {0:?} cannot hold children")]
    NotAContainer(WidgetId),
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle { child: WidgetId, parent: WidgetId },
}

// ---------------------------------------------------------------------------
// WidgetTree
// ---------------------------------------------------------------------------

/// Arena owning every widget.
///
/// Nodes live in a `SlotMap`; relations live in secondary maps, so a child
/// only ever holds its parent's handle. Removing a node removes its subtree.
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, Node>,
    children: SecondaryMap<WidgetId, Vec<WidgetId>>,
    parent: SecondaryMap<WidgetId, WidgetId>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
        }
    }

    /// Insert a detached widget with fixed layout and its default size.
    pub fn insert(&mut self, widget: impl Widget) -> WidgetId {
        self.insert_boxed(Box::new(widget))
    }

    pub fn insert_boxed(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        let id = self.nodes.insert(Node::new(widget));
        self.children.insert(id, Vec::new());
        id
    }

    /// Append `child` to `parent`'s children without touching its layout.
    ///
    /// A child that already has a parent is moved.
    pub fn attach(&mut self, child: WidgetId, parent: WidgetId) -> Result<(), TreeError> {
        self.node(child)?;
        if !self.node(parent)?.widget.accepts_children() {
            return Err(TreeError::NotAContainer(parent));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(TreeError::WouldCycle { child, parent });
        }
        self.detach(child);
        self.parent.insert(child, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(child);
        }
        Ok(())
    }

    /// Attach `child` under `parent` and switch it to relative layout.
    ///
    /// The origin is reset to (0, 0); the next layout pass places it.
    pub fn set_relative(&mut self, child: WidgetId, parent: WidgetId) -> Result<(), TreeError> {
        self.attach(child, parent)?;
        let node = self.node_mut(child)?;
        node.layout.mode = LayoutMode::Relative;
        node.geometry.x = 0;
        node.geometry.y = 0;
        Ok(())
    }

    /// Remove `id` from its parent's child list. The subtree stays alive.
    pub fn detach(&mut self, id: WidgetId) {
        if let Some(old) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(old) {
                siblings.retain(|&c| c != id);
            }
        }
    }

    /// Remove a node and all of its descendants.
    pub fn remove(&mut self, id: WidgetId) -> Option<Node> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        self.detach(id);
        let mut removed = None;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(kids) = self.children.remove(current) {
                stack.extend(kids);
            }
            self.parent.remove(current);
            let node = self.nodes.remove(current);
            if current == id {
                removed = node;
            }
        }
        removed
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.parent.get(id).copied()
    }

    /// Children in insertion order. Empty for unknown ids.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(EMPTY_CHILDREN)
    }

    pub fn child_at(&self, parent: WidgetId, index: usize) -> Option<WidgetId> {
        self.children(parent).get(index).copied()
    }

    /// Position of `id` in its parent's child list.
    pub fn index_in_parent(&self, id: WidgetId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Whether `ancestor` lies on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = id;
        while let Some(p) = self.parent(current) {
            if p == ancestor {
                return true;
            }
            current = p;
        }
        false
    }

    pub fn get(&self, id: WidgetId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current rectangle of a node.
    pub fn geometry(&self, id: WidgetId) -> Option<Region> {
        self.nodes.get(id).map(|n| n.geometry)
    }

    /// Set the rectangle of a fixed-layout node (relative nodes are overwritten on resolve).
    pub fn set_geometry(&mut self, id: WidgetId, region: Region) -> Result<(), TreeError> {
        self.node_mut(id)?.geometry = region;
        Ok(())
    }

    pub fn layout_mut(&mut self, id: WidgetId) -> Option<&mut LayoutSpec> {
        self.nodes.get_mut(id).map(|n| &mut n.layout)
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<(), TreeError> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    /// Typed access to a widget.
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.nodes.get(id)?.widget.as_any().downcast_ref::<T>()
    }

    /// Typed mutable access to a widget.
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.nodes.get_mut(id)?.widget.as_any_mut().downcast_mut::<T>()
    }

    /// Pre-order depth-first traversal from `start`, children in insertion order.
    pub fn walk_depth_first(&self, start: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    /// Like [`walk_depth_first`](Self::walk_depth_first), but skips invisible
    /// nodes together with their subtrees.
    pub fn walk_visible(&self, start: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            match self.nodes.get(current) {
                Some(node) if node.visible => {}
                _ => continue,
            }
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    /// Resolve the geometry of one node (and whatever it depends on).
    pub fn resolve(&mut self, id: WidgetId) -> Result<Region, LayoutError> {
        LayoutPass::new().resolve(self, id)
    }

    /// Resolve every node under `root`, parents before children.
    pub fn resolve_all(&mut self, root: WidgetId) -> Result<(), LayoutError> {
        let mut pass = LayoutPass::new();
        for id in self.walk_depth_first(root) {
            pass.resolve(self, id)?;
        }
        Ok(())
    }

    fn node(&self, id: WidgetId) -> Result<&Node, TreeError> {
        self.nodes.get(id).ok_or(TreeError::UnknownWidget(id))
    }

    fn node_mut(&mut self, id: WidgetId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(id).ok_or(TreeError::UnknownWidget(id))
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::tree::dummy::Dummy;

    /// ```text
    ///       root
    ///      /    \
    ///     a      b
    ///    / \
    ///   c   d
    /// ```
    fn sample() -> (WidgetTree, [WidgetId; 5]) {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Dummy::container());
        let a = tree.insert(Dummy::container());
        let b = tree.insert(Dummy::leaf());
        let c = tree.insert(Dummy::leaf());
        let d = tree.insert(Dummy::leaf());
        tree.attach(a, root).unwrap();
        tree.attach(b, root).unwrap();
        tree.attach(c, a).unwrap();
        tree.attach(d, a).unwrap();
        (tree, [root, a, b, c, d])
    }

    #[test]
    fn insert_is_detached_fixed_with_default_size() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(Dummy::leaf());
        let node = tree.get(id).unwrap();
        assert_eq!(node.layout.mode, LayoutMode::Fixed);
        assert_eq!(node.geometry, Region::new(0, 0, 10, 10));
        assert!(node.visible);
        assert_eq!(tree.parent(id), None);

        let sized = tree.insert(Dummy::leaf().with_size(Size::new(100, 50)));
        assert_eq!(tree.geometry(sized), Some(Region::new(0, 0, 100, 50)));
    }

    #[test]
    fn set_relative_resets_origin_and_appends() {
        let mut tree = WidgetTree::new();
        let parent = tree.insert(Dummy::container());
        let child = tree.insert(Dummy::leaf());
        tree.set_geometry(child, Region::new(30, 40, 10, 10)).unwrap();
        tree.set_relative(child, parent).unwrap();

        let node = tree.get(child).unwrap();
        assert_eq!(node.layout.mode, LayoutMode::Relative);
        assert_eq!(node.geometry, Region::new(0, 0, 10, 10));
        assert_eq!(tree.children(parent), &[child]);
        assert_eq!(tree.parent(child), Some(parent));
    }

    #[test]
    fn attach_rejects_leaf_parent() {
        let mut tree = WidgetTree::new();
        let leaf = tree.insert(Dummy::leaf());
        let other = tree.insert(Dummy::leaf());
        assert_eq!(tree.attach(other, leaf), Err(TreeError::NotAContainer(leaf)));
    }

    #[test]
    fn attach_rejects_cycles() {
        let (mut tree, [root, a, _, _, _]) = sample();
        assert_eq!(tree.attach(root, a), Err(TreeError::WouldCycle { child: root, parent: a }));
        assert!(tree.attach(a, a).is_err());
    }

    #[test]
    fn attach_moves_between_parents() {
        let (mut tree, [root, a, b, c, d]) = sample();
        tree.attach(c, root).unwrap();
        assert_eq!(tree.children(a), &[d]);
        assert_eq!(tree.children(root), &[a, b, c]);
        assert_eq!(tree.index_in_parent(c), Some(2));
    }

    #[test]
    fn unknown_ids_are_errors() {
        let (mut tree, [root, _, b, _, _]) = sample();
        tree.remove(b);
        assert_eq!(tree.attach(b, root), Err(TreeError::UnknownWidget(b)));
        assert!(tree.set_visible(b, false).is_err());
        assert!(tree.children(b).is_empty());
    }

    #[test]
    fn remove_drops_subtree() {
        let (mut tree, [root, a, b, c, d]) = sample();
        assert!(tree.remove(a).is_some());
        assert_eq!(tree.len(), 2);
        assert!(!tree.contains(c));
        assert!(!tree.contains(d));
        assert_eq!(tree.children(root), &[b]);
        assert!(tree.remove(a).is_none());
    }

    #[test]
    fn walk_is_preorder_in_insertion_order() {
        let (tree, [root, a, b, c, d]) = sample();
        assert_eq!(tree.walk_depth_first(root), vec![root, a, c, d, b]);
        assert_eq!(tree.child_at(a, 1), Some(d));
        assert_eq!(tree.child_at(a, 2), None);
    }

    #[test]
    fn walk_visible_prunes_hidden_subtrees() {
        let (mut tree, [root, a, b, _, _]) = sample();
        tree.set_visible(a, false).unwrap();
        assert_eq!(tree.walk_visible(root), vec![root, b]);
        tree.set_visible(root, false).unwrap();
        assert!(tree.walk_visible(root).is_empty());
    }

    #[test]
    fn typed_access() {
        let (mut tree, [_, _, b, _, _]) = sample();
        assert!(tree.widget::<Dummy>(b).is_some());
        tree.widget_mut::<Dummy>(b).unwrap().size = Some(Size::new(1, 2));
        assert_eq!(tree.widget::<Dummy>(b).unwrap().size, Some(Size::new(1, 2)));
    }

    #[test]
    fn ancestry() {
        let (tree, [root, a, b, c, _]) = sample();
        assert!(tree.is_ancestor(root, c));
        assert!(tree.is_ancestor(a, c));
        assert!(!tree.is_ancestor(b, c));
    }
}
