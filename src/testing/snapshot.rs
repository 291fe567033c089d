//! Snapshot rendering helpers.
//!
//! Functions for converting a drawn [`CellCanvas`] into plain-text strings
//! suitable for snapshot testing and assertions.

use crate::geometry::Region;
use crate::render::cells::{CellCanvas, CellShaper};
use crate::render::color::Color;
use crate::tree::WidgetId;
use crate::widget::{DrawCtx, Widget};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Draw a widget alone on a fresh `width` x `height` canvas and return its text.
///
/// The widget fills the whole canvas and is drawn at time zero.
///
/// # Examples
///
/// ```ignore
/// use planboard::testing::render_to_string;
/// use planboard::widgets::Label;
///
/// let output = render_to_string(&mut Label::new("Hello"), 20, 1);
/// assert_eq!(output, "Hello");
/// ```
pub fn render_to_string(widget: &mut dyn Widget, width: u16, height: u16) -> String {
    let mut canvas = CellCanvas::new(width, height);
    let shaper = CellShaper;
    let mut cx = DrawCtx {
        id: WidgetId::default(),
        region: Region::new(0, 0, i32::from(width), i32::from(height)),
        now: 0.0,
        canvas: &mut canvas,
        shaper: &shaper,
    };
    widget.draw(&mut cx);
    canvas_to_string(&canvas)
}

/// The characters of every row, right-trimmed of spaces, joined with `'\n'`.
///
/// The final line does not have a trailing newline.
pub fn canvas_to_string(canvas: &CellCanvas) -> String {
    canvas
        .rows()
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.ch).collect();
            line.trim_end().to_owned()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One character per cell for its background colour.
///
/// Colours found in `legend` map to their character, other colours to `'?'`,
/// and unpainted cells to `'.'`.
pub fn paint_map(canvas: &CellCanvas, legend: &[(Color, char)]) -> String {
    canvas
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell.bg {
                    None => '.',
                    Some(bg) => legend
                        .iter()
                        .find(|(color, _)| *color == bg)
                        .map_or('?', |&(_, ch)| ch),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================
