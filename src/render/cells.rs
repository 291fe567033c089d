//! Character-grid canvas: one cell per pixel unit.
//!
//! [`CellCanvas`] implements [`Canvas`] by rasterizing every primitive into a
//! 2D grid of [`Cell`]s. Frames are compared with [`CellCanvas::diff`] so the
//! [`Driver`](super::driver::Driver) only rewrites cells that changed.
//! [`CellShaper`] is the matching monospace [`TextShaper`].

use crate::geometry::{Offset, Region, Size};

use super::canvas::{Canvas, RenderedText, TextShaper};
use super::color::Color;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single grid cell: one character plus optional colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Cell {
    /// A blank (space) cell with no colours.
    pub const fn blank() -> Self {
        Self { ch: ' ', fg: None, bg: None }
    }

    /// A blank cell painted with `bg`.
    pub const fn painted(bg: Color) -> Self {
        Self { ch: ' ', fg: None, bg: Some(bg) }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

/// A single cell that changed between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

// ---------------------------------------------------------------------------
// CellCanvas
// ---------------------------------------------------------------------------

/// A [`Canvas`] backed by a grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellCanvas {
    /// `cells[y][x]` is the cell at column x, row y.
    cells: Vec<Vec<Cell>>,
    width: u16,
    height: u16,
    clip: Option<Region>,
}

impl CellCanvas {
    /// Create a blank canvas of the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: Self::blank_grid(width, height),
            width,
            height,
            clip: None,
        }
    }

    /// Resize the canvas. All cells are reset to blank.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = Self::blank_grid(width, height);
    }

    /// Reset every cell to blank and lift any clip.
    pub fn clear(&mut self) {
        self.cells = Self::blank_grid(self.width, self.height);
        self.clip = None;
    }

    /// Canvas width in cells.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Canvas height in cells.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Read a single cell. Returns `None` if out of bounds.
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.cells.get(y as usize).and_then(|row| row.get(x as usize))
    }

    /// Iterate over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Compute the cells that differ from `previous`.
    ///
    /// If the dimensions differ, every cell of `self` is reported.
    pub fn diff(&self, previous: &CellCanvas) -> Vec<CellUpdate> {
        let same_size = self.width == previous.width && self.height == previous.height;
        let mut updates = Vec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if same_size && previous.cells[y][x] == *cell {
                    continue;
                }
                updates.push(CellUpdate {
                    x: x as u16,
                    y: y as u16,
                    cell: *cell,
                });
            }
        }
        updates
    }

    fn blank_grid(width: u16, height: u16) -> Vec<Vec<Cell>> {
        vec![vec![Cell::blank(); width as usize]; height as usize]
    }

    /// The area drawing is currently allowed to touch.
    fn writable(&self) -> Region {
        let bounds = Region::new(0, 0, self.width as i32, self.height as i32);
        match self.clip {
            Some(clip) => bounds.intersection(clip),
            None => bounds,
        }
    }

    fn cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        if !self.writable().contains(x, y) {
            return None;
        }
        self.cells.get_mut(y as usize).and_then(|row| row.get_mut(x as usize))
    }

    fn paint(&mut self, x: i32, y: i32, color: Color) {
        if let Some(cell) = self.cell_mut(x, y) {
            *cell = Cell::painted(color);
        }
    }

    /// Paint every cell in `region` for which `inside(dx, dy)` holds, where
    /// `dx`/`dy` are relative to `center`.
    fn paint_where(
        &mut self,
        region: Region,
        center: Offset,
        color: Color,
        inside: impl Fn(i32, i32) -> bool,
    ) {
        let area = region.intersection(self.writable());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if inside(x - center.x, y - center.y) {
                    self.paint(x, y, color);
                }
            }
        }
    }
}

impl Canvas for CellCanvas {
    fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }

    fn fill_rect(&mut self, region: Region, color: Color) {
        let area = region.intersection(self.writable());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.paint(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, region: Region, color: Color, width: i32) {
        if width <= 0 {
            return;
        }
        let inner = Region::new(
            region.x + width,
            region.y + width,
            region.width - 2 * width,
            region.height - 2 * width,
        );
        let area = region.intersection(self.writable());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if !inner.contains(x, y) {
                    self.paint(x, y, color);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Offset, radius: i32, color: Color) {
        if radius <= 0 {
            return;
        }
        let bounds = Region::new(center.x - radius, center.y - radius, 2 * radius + 1, 2 * radius + 1);
        let r2 = radius * radius;
        self.paint_where(bounds, center, color, |dx, dy| dx * dx + dy * dy <= r2);
    }

    fn stroke_circle(&mut self, center: Offset, radius: i32, color: Color, width: i32) {
        if radius <= 0 || width <= 0 {
            return;
        }
        let bounds = Region::new(center.x - radius, center.y - radius, 2 * radius + 1, 2 * radius + 1);
        let outer = radius * radius;
        let inner_radius = (radius - width).max(0);
        let inner = inner_radius * inner_radius;
        self.paint_where(bounds, center, color, |dx, dy| {
            let d = dx * dx + dy * dy;
            d <= outer && (inner_radius == 0 || d > inner)
        });
    }

    fn line(&mut self, from: Offset, to: Offset, color: Color, _width: i32) {
        // Bresenham; the grid is too coarse for thick lines.
        let (mut x, mut y) = (from.x, from.y);
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.paint(x, y, color);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn blit_text(&mut self, text: &RenderedText, at: Offset) {
        for (i, ch) in text.text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(at.x + i as i32, at.y) {
                cell.ch = ch;
                cell.fg = Some(text.color);
            }
        }
    }

    fn set_clip(&mut self, clip: Option<Region>) {
        self.clip = clip;
    }
}

// ---------------------------------------------------------------------------
// CellShaper
// ---------------------------------------------------------------------------

/// Monospace shaper: every character is one cell wide and one cell tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellShaper;

impl TextShaper for CellShaper {
    fn shape(&self, text: &str, font_size: u16, color: Color) -> RenderedText {
        RenderedText {
            text: text.to_owned(),
            color,
            font_size,
            size: Size::new(text.chars().count() as i32, 1),
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

    fn painted(canvas: &CellCanvas) -> Vec<String> {
        canvas
            .rows()
            .map(|row| row.iter().map(|c| if c.bg.is_some() { '#' } else { '.' }).collect())
            .collect()
    }

    #[test]
    fn new_canvas_is_blank() {
        let canvas = CellCanvas::new(4, 2);
        assert_eq!(canvas.size(), Size::new(4, 2));
        assert!(canvas.rows().flatten().all(|c| *c == Cell::blank()));
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut canvas = CellCanvas::new(4, 3);
        canvas.fill_rect(Region::new(2, 1, 10, 10), Color::RED);
        assert_eq!(painted(&canvas), vec!["....", "..##", "..##"]);
    }

    #[test]
    fn stroke_rect_leaves_interior() {
        let mut canvas = CellCanvas::new(5, 4);
        canvas.stroke_rect(Region::new(0, 0, 5, 4), Color::BLACK, 1);
        assert_eq!(painted(&canvas), vec!["#####", "#...#", "#...#", "#####"]);
    }

    #[test]
    fn fill_circle_is_symmetric() {
        let mut canvas = CellCanvas::new(5, 5);
        canvas.fill_circle(Offset::new(2, 2), 1, Color::BLUE);
        assert_eq!(painted(&canvas), vec![".....", "..#..", ".###.", "..#..", "....."]);
    }

    #[test]
    fn line_diagonal() {
        let mut canvas = CellCanvas::new(3, 3);
        canvas.line(Offset::new(0, 0), Offset::new(2, 2), Color::BLACK, 1);
        assert_eq!(painted(&canvas), vec!["#..", ".#.", "..#"]);
    }

    #[test]
    fn clip_restricts_painting() {
        let mut canvas = CellCanvas::new(4, 1);
        canvas.set_clip(Some(Region::new(1, 0, 2, 1)));
        canvas.fill_rect(Region::new(0, 0, 4, 1), Color::RED);
        canvas.set_clip(None);
        assert_eq!(painted(&canvas), vec![".##."]);
    }

    #[test]
    fn blit_text_keeps_background() {
        let mut canvas = CellCanvas::new(6, 1);
        canvas.fill_rect(Region::new(0, 0, 6, 1), Color::WHITE);
        let text = CellShaper.shape("hi", 18, Color::BLACK);
        canvas.blit_text(&text, Offset::new(1, 0));
        let cell = canvas.get(1, 0).unwrap();
        assert_eq!(cell.ch, 'h');
        assert_eq!(cell.fg, Some(Color::BLACK));
        assert_eq!(cell.bg, Some(Color::WHITE));
        assert_eq!(canvas.get(2, 0).unwrap().ch, 'i');
    }

    #[test]
    fn diff_reports_only_changes() {
        let before = CellCanvas::new(3, 1);
        let mut after = before.clone();
        after.fill_rect(Region::new(1, 0, 1, 1), Color::RED);
        let updates = after.diff(&before);
        assert_eq!(updates.len(), 1);
        assert_eq!((updates[0].x, updates[0].y), (1, 0));
        assert_eq!(updates[0].cell, Cell::painted(Color::RED));
    }

    #[test]
    fn diff_after_resize_reports_everything() {
        let before = CellCanvas::new(2, 1);
        let after = CellCanvas::new(2, 2);
        assert_eq!(after.diff(&before).len(), 4);
    }

    #[test]
    fn shaper_measures_chars() {
        let text = CellShaper.shape("héllo", 12, Color::BLACK);
        assert_eq!(text.size, Size::new(5, 1));
        assert_eq!(CellShaper.text_width("abc", 40), 3);
    }
}
