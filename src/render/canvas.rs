//! The drawing boundary: [`Canvas`] and [`TextShaper`].
//!
//! The engine never touches pixels or glyphs itself. Widgets describe what
//! they want through these two traits and the backend decides how it looks.
//! [`CellCanvas`](super::cells::CellCanvas) is the built-in backend.

use crate::geometry::{Offset, Region, Size};

use super::color::Color;

// ---------------------------------------------------------------------------
// RenderedText
// ---------------------------------------------------------------------------

/// Text that a [`TextShaper`] has measured and is ready to blit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedText {
    pub text: String,
    pub color: Color,
    pub font_size: u16,
    pub size: Size,
}

impl RenderedText {
    /// Rendered width in pixels.
    #[inline]
    pub fn width(&self) -> i32 {
        self.size.width
    }

    /// Rendered height in pixels.
    #[inline]
    pub fn height(&self) -> i32 {
        self.size.height
    }
}

// ---------------------------------------------------------------------------
// TextShaper
// ---------------------------------------------------------------------------

/// Measures text and produces blittable [`RenderedText`].
pub trait TextShaper {
    /// Shape `text` at the given font size and colour.
    fn shape(&self, text: &str, font_size: u16, color: Color) -> RenderedText;

    /// Width of `text` at `font_size`, without keeping the rendered result.
    fn text_width(&self, text: &str, font_size: u16) -> i32 {
        self.shape(text, font_size, Color::BLACK).width()
    }
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// A 2D drawing target.
///
/// Outline widths are in pixels and grow inward from the shape's edge.
pub trait Canvas {
    /// The drawable area.
    fn size(&self) -> Size;

    /// Fill a rectangle.
    fn fill_rect(&mut self, region: Region, color: Color);

    /// Outline a rectangle with a border of the given width.
    fn stroke_rect(&mut self, region: Region, color: Color, width: i32);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Offset, radius: i32, color: Color);

    /// Outline a circle with a ring of the given width.
    fn stroke_circle(&mut self, center: Offset, radius: i32, color: Color, width: i32);

    /// Draw a line segment.
    fn line(&mut self, from: Offset, to: Offset, color: Color, width: i32);

    /// Copy shaped text with its top-left corner at `at`.
    fn blit_text(&mut self, text: &RenderedText, at: Offset);

    /// Restrict subsequent drawing to `clip`, or lift the restriction with `None`.
    fn set_clip(&mut self, clip: Option<Region>);
}
