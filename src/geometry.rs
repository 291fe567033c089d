//! Core geometry types: Offset, Size, Region, Spacing.
//!
//! All coordinates are integer pixels on the drawing surface. Nothing here
//! enforces non-negative sizes; a region with a negative width simply renders
//! as nothing.

use std::ops::{Add, Neg, Sub};

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A 2D position or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Offset {
    type Output = Offset;
    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Offset {
    type Output = Offset;
    #[inline]
    fn neg(self) -> Offset {
        Offset { x: -self.x, y: -self.y }
    }
}

impl From<(i32, i32)> for Offset {
    fn from((x, y): (i32, i32)) -> Self {
        Offset { x, y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0, height: 0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Convert to a [`Region`] positioned at the origin.
    #[inline]
    pub const fn to_region(self) -> Region {
        Region { x: 0, y: 0, width: self.width, height: self.height }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangle defined by its top-left corner and size.
///
/// This is the geometry every widget owns. Layout resolution writes it,
/// hit-testing and drawing read it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge: `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge: `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// The top-left corner as an [`Offset`].
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset { x: self.x, y: self.y }
    }

    /// The dimensions as a [`Size`].
    #[inline]
    pub const fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// The centre point, rounded towards the top-left.
    #[inline]
    pub const fn center(self) -> Offset {
        Offset { x: self.x + self.width / 2, y: self.y + self.height / 2 }
    }

    /// Whether the point lies inside the half-open rectangle
    /// `[x, right) x [y, bottom)`. Used for pixel addressing.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether the point lies strictly inside the rectangle.
    ///
    /// Points on any of the four edges are outside. This is the pointer
    /// hit-test used by every interactive widget.
    #[inline]
    pub const fn contains_strict(self, point: Offset) -> bool {
        self.x < point.x && point.x < self.right() && self.y < point.y && point.y < self.bottom()
    }

    /// Compute the intersection of two regions.
    ///
    /// Returns [`Region::EMPTY`] if the regions do not overlap.
    #[inline]
    pub const fn intersection(self, other: Region) -> Region {
        let x1 = if self.x > other.x { self.x } else { other.x };
        let y1 = if self.y > other.y { self.y } else { other.y };

        let sr = self.right();
        let or = other.right();
        let x2 = if sr < or { sr } else { or };

        let sb = self.bottom();
        let ob = other.bottom();
        let y2 = if sb < ob { sb } else { ob };

        let w = x2 - x1;
        let h = y2 - y1;

        if w <= 0 || h <= 0 {
            Region::EMPTY
        } else {
            Region { x: x1, y: y1, width: w, height: h }
        }
    }

    /// Translate the region by an [`Offset`].
    #[inline]
    pub const fn translate(self, offset: Offset) -> Region {
        Region { x: self.x + offset.x, y: self.y + offset.y, width: self.width, height: self.height }
    }

    /// Contract the region inward by the given [`Spacing`].
    ///
    /// Width and height are clamped to zero.
    #[inline]
    pub const fn shrink(self, margin: Spacing) -> Region {
        let w = self.width - margin.left - margin.right;
        let h = self.height - margin.top - margin.bottom;
        Region {
            x: self.x + margin.left,
            y: self.y + margin.top,
            width: if w > 0 { w } else { 0 },
            height: if h > 0 { h } else { 0 },
        }
    }
}

// ---------------------------------------------------------------------------
// Spacing
// ---------------------------------------------------------------------------

/// Spacing around the four sides of a rectangle. Used for layout margins.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Spacing {
    /// Zero spacing on all sides.
    pub const ZERO: Spacing = Spacing { top: 0, right: 0, bottom: 0, left: 0 };

    /// Create spacing with explicit values for each side.
    #[inline]
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// All four sides set to the same value.
    #[inline]
    pub const fn all(value: i32) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    /// Total horizontal extent: `left + right`.
    #[inline]
    pub const fn width(self) -> i32 {
        self.left + self.right
    }

    /// Total vertical extent: `top + bottom`.
    #[inline]
    pub const fn height(self) -> i32 {
        self.top + self.bottom
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── Offset ───────────────────────────────────────────────────────

    #[test]
    fn offset_add_sub_neg() {
        let a = Offset::new(3, 4);
        let b = Offset::new(1, -2);
        assert_eq!(a + b, Offset::new(4, 2));
        assert_eq!(a - b, Offset::new(2, 6));
        assert_eq!(-a, Offset::new(-3, -4));
    }

    #[test]
    fn offset_from_tuple() {
        assert_eq!(Offset::from((7, 9)), Offset::new(7, 9));
    }

    // ── Region ───────────────────────────────────────────────────────

    #[test]
    fn region_edges_and_center() {
        let r = Region::new(10, 20, 100, 50);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
        assert_eq!(r.center(), Offset::new(60, 45));
        assert_eq!(r.size(), Size::new(100, 50));
        assert_eq!(r.offset(), Offset::new(10, 20));
    }

    #[test]
    fn region_contains_is_half_open() {
        let r = Region::new(0, 0, 10, 10);
        assert!(r.contains(0, 0));
        assert!(r.contains(9, 9));
        assert!(!r.contains(10, 5));
        assert!(!r.contains(5, 10));
    }

    #[test]
    fn region_contains_strict_excludes_every_edge() {
        let r = Region::new(0, 0, 100, 50);
        assert!(r.contains_strict(Offset::new(50, 25)));
        assert!(!r.contains_strict(Offset::new(0, 25)));
        assert!(!r.contains_strict(Offset::new(100, 25)));
        assert!(!r.contains_strict(Offset::new(50, 0)));
        assert!(!r.contains_strict(Offset::new(50, 50)));
        assert!(r.contains_strict(Offset::new(1, 1)));
        assert!(r.contains_strict(Offset::new(99, 49)));
    }

    #[test]
    fn region_contains_strict_degenerate() {
        let r = Region::new(5, 5, -10, 3);
        assert!(!r.contains_strict(Offset::new(0, 6)));
        assert!(!Region::EMPTY.contains_strict(Offset::new(0, 0)));
    }

    #[test]
    fn region_intersection() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(5, 5, 10, 10);
        assert_eq!(a.intersection(b), Region::new(5, 5, 5, 5));
        assert_eq!(a.intersection(Region::new(10, 0, 5, 5)), Region::EMPTY);
    }

    #[test]
    fn region_translate_and_shrink() {
        let r = Region::new(10, 10, 20, 20);
        assert_eq!(r.translate(Offset::new(-5, 3)), Region::new(5, 13, 20, 20));
        assert_eq!(r.shrink(Spacing::all(2)), Region::new(12, 12, 16, 16));
        assert_eq!(r.shrink(Spacing::all(15)), Region::new(25, 25, 0, 0));
    }

    // ── Spacing ──────────────────────────────────────────────────────

    #[test]
    fn spacing_totals() {
        let s = Spacing::new(1, 2, 3, 4);
        assert_eq!(s.width(), 6);
        assert_eq!(s.height(), 4);
        assert_eq!(Spacing::default(), Spacing::ZERO);
    }

    #[test]
    fn size_to_region() {
        assert_eq!(Size::new(4, 5).to_region(), Region::new(0, 0, 4, 5));
    }
}
