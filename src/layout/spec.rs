//! Per-widget layout intent.

use crate::geometry::Spacing;

use super::error::LayoutError;
use super::gravity::Gravity;

/// Whether a widget's rectangle is set by its owner or computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Geometry is set directly and never recomputed.
    #[default]
    Fixed,
    /// Geometry is recomputed from the parent and siblings on every pass.
    Relative,
}

/// How a widget sizes itself along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    /// Keep the widget's intrinsic size.
    #[default]
    Wrap,
    /// Stretch to the parent's content box (optionally divided by a fraction).
    Match,
}

/// Declarative layout rules, owned one-to-one by a widget node.
///
/// Anchors (`align_*`) hold an index into the parent's child list. They win
/// over gravity on their axis. With neither, the widget sits at the parent's
/// origin plus its leading margin.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSpec {
    pub mode: LayoutMode,
    pub width_mode: SizeMode,
    pub height_mode: SizeMode,
    pub margin: Spacing,
    pub gravity: Gravity,
    /// Place right of this sibling.
    pub align_left: Option<usize>,
    /// Place left of this sibling.
    pub align_right: Option<usize>,
    /// Place below this sibling.
    pub align_top: Option<usize>,
    /// Place above this sibling.
    pub align_bottom: Option<usize>,
    width_fraction: f32,
    height_fraction: f32,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Fixed,
            width_mode: SizeMode::Wrap,
            height_mode: SizeMode::Wrap,
            margin: Spacing::ZERO,
            gravity: Gravity::NONE,
            align_left: None,
            align_right: None,
            align_top: None,
            align_bottom: None,
            width_fraction: 1.0,
            height_fraction: 1.0,
        }
    }
}

impl LayoutSpec {
    /// A fixed-mode spec with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the same margin on all four sides.
    pub fn set_margin(&mut self, value: i32) {
        self.margin = Spacing::all(value);
    }

    /// Parse and set gravity keywords, e.g. `"left centery"`.
    pub fn set_gravity(&mut self, keywords: &str) -> Result<(), LayoutError> {
        self.gravity = Gravity::parse(keywords)?;
        Ok(())
    }

    /// Divide the MATCH width by `fraction` (e.g. `2.0` for two side-by-side halves).
    pub fn set_width_fraction(&mut self, fraction: f32) -> Result<(), LayoutError> {
        self.width_fraction = validate_fraction(fraction)?;
        Ok(())
    }

    /// Divide the MATCH height by `fraction`.
    pub fn set_height_fraction(&mut self, fraction: f32) -> Result<(), LayoutError> {
        self.height_fraction = validate_fraction(fraction)?;
        Ok(())
    }

    pub fn width_fraction(&self) -> f32 {
        self.width_fraction
    }

    pub fn height_fraction(&self) -> f32 {
        self.height_fraction
    }

    /// MATCH on both axes.
    pub fn match_parent(&mut self) {
        self.width_mode = SizeMode::Match;
        self.height_mode = SizeMode::Match;
    }
}

fn validate_fraction(fraction: f32) -> Result<f32, LayoutError> {
    if fraction.is_finite() && fraction > 0.0 {
        Ok(fraction)
    } else {
        Err(LayoutError::InvalidFraction(fraction))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
