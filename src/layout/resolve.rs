//! Relative layout resolution.
//!
//! A [`LayoutPass`] computes the rectangle of every RELATIVE node from its
//! parent's rectangle, its own [`LayoutSpec`] and, for anchored nodes, the
//! rectangle of the sibling it is anchored to. Dependencies are resolved on
//! demand and memoized for the duration of the pass, so siblings may appear
//! in any order. FIXED nodes are taken as they are.
//!
//! Each axis is solved independently, in this order of precedence:
//!
//! 1. sibling anchor (`align_left`/`align_right`, `align_top`/`align_bottom`),
//! 2. gravity (`left`/`right`/`centerx`, `top`/`bottom`/`centery`),
//! 3. flush with the parent's origin plus the leading margin.
//!
//! The parent's origin includes its [`content_offset`](crate::widget::Widget::content_offset),
//! which is how a scrolled container moves its children.

use slotmap::SecondaryMap;
use tracing::trace;

use crate::geometry::{Offset, Region};
use crate::tree::{WidgetId, WidgetTree};

use super::error::LayoutError;
use super::gravity::Gravity;
use super::spec::{LayoutMode, LayoutSpec, SizeMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

// ---------------------------------------------------------------------------
// Axis description
// ---------------------------------------------------------------------------

/// One axis of a layout problem, with leading = left/top and trailing = right/bottom.
#[derive(Debug, Clone, Copy)]
struct AxisRules {
    lead_anchor: Option<usize>,
    trail_anchor: Option<usize>,
    lead_gravity: bool,
    trail_gravity: bool,
    center_gravity: bool,
    margin_lead: i32,
    margin_trail: i32,
    mode: SizeMode,
    fraction: f32,
    /// Current extent along the axis (the WRAP size).
    extent: i32,
}

impl AxisRules {
    fn horizontal(spec: &LayoutSpec, current: Region) -> Self {
        Self {
            lead_anchor: spec.align_left,
            trail_anchor: spec.align_right,
            lead_gravity: spec.gravity.contains(Gravity::LEFT),
            trail_gravity: spec.gravity.contains(Gravity::RIGHT),
            center_gravity: spec.gravity.contains(Gravity::CENTER_X),
            margin_lead: spec.margin.left,
            margin_trail: spec.margin.right,
            mode: spec.width_mode,
            fraction: spec.width_fraction(),
            extent: current.width,
        }
    }

    fn vertical(spec: &LayoutSpec, current: Region) -> Self {
        Self {
            lead_anchor: spec.align_top,
            trail_anchor: spec.align_bottom,
            lead_gravity: spec.gravity.contains(Gravity::TOP),
            trail_gravity: spec.gravity.contains(Gravity::BOTTOM),
            center_gravity: spec.gravity.contains(Gravity::CENTER_Y),
            margin_lead: spec.margin.top,
            margin_trail: spec.margin.bottom,
            mode: spec.height_mode,
            fraction: spec.height_fraction(),
            extent: current.height,
        }
    }

    fn placement(&self) -> Placement {
        if let Some(index) = self.lead_anchor {
            Placement::AfterSibling(index)
        } else if let Some(index) = self.trail_anchor {
            Placement::BeforeSibling(index)
        } else if self.lead_gravity {
            Placement::Leading
        } else if self.trail_gravity {
            Placement::Trailing
        } else if self.center_gravity {
            Placement::Centered
        } else {
            Placement::Leading
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    AfterSibling(usize),
    BeforeSibling(usize),
    Leading,
    Trailing,
    Centered,
}

impl Placement {
    /// MATCH without a fraction grows toward the parent's trailing edge.
    fn is_leading(self) -> bool {
        matches!(self, Placement::AfterSibling(_) | Placement::Leading)
    }
}

/// A resolved sibling projected onto one axis.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: i32,
    extent: i32,
    margin_lead: i32,
    margin_trail: i32,
}

/// Horizontal or vertical. Marks are kept per axis, so a node anchored on x
/// may be the anchor of the same sibling on y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn rules(self, spec: &LayoutSpec, current: Region) -> AxisRules {
        match self {
            Axis::X => AxisRules::horizontal(spec, current),
            Axis::Y => AxisRules::vertical(spec, current),
        }
    }

    /// `(start, extent)` of `region` along this axis.
    fn range(self, region: Region) -> (i32, i32) {
        match self {
            Axis::X => (region.x, region.width),
            Axis::Y => (region.y, region.height),
        }
    }

    fn offset(self, offset: Offset) -> i32 {
        match self {
            Axis::X => offset.x,
            Axis::Y => offset.y,
        }
    }

    fn span(self, region: Region, spec: &LayoutSpec) -> Span {
        let (start, extent) = self.range(region);
        let (margin_lead, margin_trail) = match self {
            Axis::X => (spec.margin.left, spec.margin.right),
            Axis::Y => (spec.margin.top, spec.margin.bottom),
        };
        Span { start, extent, margin_lead, margin_trail }
    }

    fn write(self, region: &mut Region, start: i32, extent: i32) {
        match self {
            Axis::X => {
                region.x = start;
                region.width = extent;
            }
            Axis::Y => {
                region.y = start;
                region.height = extent;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// LayoutPass
// ---------------------------------------------------------------------------

/// Memo for one resolution pass. Create a fresh pass for every frame.
#[derive(Debug, Default)]
pub struct LayoutPass {
    marks: [SecondaryMap<WidgetId, Mark>; 2],
}

impl LayoutPass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `id`, resolving its parent and anchor siblings first if needed.
    pub fn resolve(&mut self, tree: &mut WidgetTree, id: WidgetId) -> Result<Region, LayoutError> {
        self.resolve_axis(tree, id, Axis::X)?;
        self.resolve_axis(tree, id, Axis::Y)?;
        tree.geometry(id).ok_or(LayoutError::UnknownWidget(id))
    }

    /// Resolve one axis of `id`; returns `(start, extent)`.
    fn resolve_axis(
        &mut self,
        tree: &mut WidgetTree,
        id: WidgetId,
        axis: Axis,
    ) -> Result<(i32, i32), LayoutError> {
        let node = tree.get(id).ok_or(LayoutError::UnknownWidget(id))?;
        let marks = &mut self.marks[axis as usize];
        match marks.get(id) {
            Some(Mark::Done) => return Ok(axis.range(node.geometry)),
            Some(Mark::InProgress) => return Err(LayoutError::AnchorCycle(id)),
            None => {}
        }
        if node.layout.mode == LayoutMode::Fixed {
            marks.insert(id, Mark::Done);
            return Ok(axis.range(node.geometry));
        }

        let rules = axis.rules(&node.layout, node.geometry);
        let parent = tree.parent(id).ok_or(LayoutError::Detached(id))?;

        marks.insert(id, Mark::InProgress);
        let (parent_start, parent_extent) = self.resolve_axis(tree, parent, axis)?;
        let bias = tree
            .get(parent)
            .map(|p| axis.offset(p.widget().content_offset()))
            .unwrap_or_default();

        let (start, extent) =
            self.solve_axis(tree, id, parent, axis, rules, parent_start + bias, parent_extent)?;

        if let Some(node) = tree.get_mut(id) {
            axis.write(&mut node.geometry, start, extent);
        }
        self.marks[axis as usize].insert(id, Mark::Done);
        trace!(?id, ?axis, start, extent, "resolved");
        Ok((start, extent))
    }

    /// Solve one axis; returns `(start, extent)`.
    #[allow(clippy::too_many_arguments)]
    fn solve_axis(
        &mut self,
        tree: &mut WidgetTree,
        id: WidgetId,
        parent: WidgetId,
        axis: Axis,
        rules: AxisRules,
        parent_start: i32,
        parent_extent: i32,
    ) -> Result<(i32, i32), LayoutError> {
        let placement = rules.placement();
        let available = parent_extent - rules.margin_lead - rules.margin_trail;
        let fill_from_start = rules.mode == SizeMode::Match
            && rules.fraction == 1.0
            && placement.is_leading();

        let mut extent = match rules.mode {
            SizeMode::Wrap => rules.extent,
            SizeMode::Match if rules.fraction != 1.0 => (available as f32 / rules.fraction) as i32,
            SizeMode::Match => available,
        };

        let start = match placement {
            Placement::AfterSibling(index) => {
                let sib = self.sibling(tree, id, parent, index, axis)?;
                sib.start + sib.extent + sib.margin_trail + rules.margin_lead
            }
            Placement::BeforeSibling(index) => {
                let sib = self.sibling(tree, id, parent, index, axis)?;
                sib.start - extent - rules.margin_trail - sib.margin_lead
            }
            Placement::Leading => parent_start + rules.margin_lead,
            Placement::Trailing => parent_start + parent_extent - rules.margin_trail - extent,
            Placement::Centered => parent_start + (parent_extent - extent) / 2,
        };

        if fill_from_start {
            extent = parent_start + parent_extent - rules.margin_trail - start;
        }
        Ok((start, extent))
    }

    fn sibling(
        &mut self,
        tree: &mut WidgetTree,
        id: WidgetId,
        parent: WidgetId,
        index: usize,
        axis: Axis,
    ) -> Result<Span, LayoutError> {
        let siblings = tree.children(parent);
        let sibling = *siblings.get(index).ok_or(LayoutError::MissingSibling {
            widget: id,
            index,
            len: siblings.len(),
        })?;
        if sibling == id {
            return Err(LayoutError::SelfAnchor(id));
        }
        self.resolve_axis(tree, sibling, axis)?;
        let node = tree.get(sibling).ok_or(LayoutError::UnknownWidget(sibling))?;
        Ok(axis.span(node.geometry, &node.layout))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
