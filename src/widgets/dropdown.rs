//! Drop-down menus and selectors.
//!
//! A [`DropDownButton`] is one tree node that owns a main [`Button`] and a
//! column of entry buttons. The entries are not tree nodes: their regions are
//! derived from the main button's region every cycle, so they follow the
//! drop-down wherever layout puts it.

use std::any::Any;

use tracing::debug;

use crate::geometry::{Region, Size};
use crate::tree::WidgetId;
use crate::widget::traits::{fire, Callback, DrawCtx, EventCtx, Widget};

use super::button::{Button, ButtonStyle, Phase, StyleError, BUTTON_SIZE};

/// Which edge of the main button the menu lines up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuSide {
    #[default]
    Left,
    Right,
}

/// Which way the entries stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuDirection {
    #[default]
    Down,
    Up,
}

/// Width of each entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuWidth {
    /// Same width as the main button.
    #[default]
    Match,
    Fixed(i32),
}

// ---------------------------------------------------------------------------
// DropDownButton
// ---------------------------------------------------------------------------

/// A button that opens a menu of entry buttons on release.
///
/// While open, a click that nothing claims and that misses the main button
/// closes the menu. With `float_when_open` set (the default), an open menu is
/// drawn and hit-tested above its siblings.
pub struct DropDownButton {
    main: Button,
    entries: Vec<Button>,
    pub side: MenuSide,
    pub direction: MenuDirection,
    pub width: MenuWidth,
    /// Extra gap between consecutive entries.
    pub spacing: i32,
    pub float_when_open: bool,
    /// Close the menu when an entry is released.
    pub close_on_select: bool,
    open: bool,
    selected: Option<usize>,
    selector: bool,
    on_select: Option<Callback<DropDownButton>>,
}

impl DropDownButton {
    pub fn new<S: Into<String>>(text: impl Into<String>, entries: impl IntoIterator<Item = S>) -> Self {
        let mut dropdown = Self {
            main: Button::new(text),
            entries: entries.into_iter().map(Button::new).collect(),
            side: MenuSide::Left,
            direction: MenuDirection::Down,
            width: MenuWidth::Match,
            spacing: 0,
            float_when_open: true,
            close_on_select: false,
            open: false,
            selected: None,
            selector: false,
            on_select: None,
        };
        dropdown.set_open(false);
        dropdown
    }

    /// A drop-down whose main button shows the last chosen entry.
    ///
    /// `default` preselects an entry; an out-of-range index is ignored.
    pub fn selector<S: Into<String>>(entries: impl IntoIterator<Item = S>, default: Option<usize>) -> Self {
        let mut dropdown = Self::new("", entries);
        dropdown.selector = true;
        if let Some(index) = default.filter(|&i| i < dropdown.entries.len()) {
            dropdown.selected = Some(index);
            let text = dropdown.entries[index].text().to_owned();
            dropdown.main.set_text(text);
        }
        dropdown
    }

    // ── Parts ────────────────────────────────────────────────────────

    pub fn main(&self) -> &Button {
        &self.main
    }

    pub fn main_mut(&mut self) -> &mut Button {
        &mut self.main
    }

    pub fn entries(&self) -> &[Button] {
        &self.entries
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut Button> {
        self.entries.get_mut(index)
    }

    // ── State ────────────────────────────────────────────────────────

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open or close the menu. Entries are only active while open.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
        for entry in &mut self.entries {
            entry.set_active(open);
        }
    }

    /// Index of the entry released most recently, or the selector default.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn on_select(&mut self, f: impl FnMut(&mut DropDownButton) + 'static) {
        self.on_select = Some(Box::new(f));
    }

    // ── Style ────────────────────────────────────────────────────────

    /// Apply `style` to the main button and every entry.
    pub fn set_style(&mut self, style: ButtonStyle) {
        self.main.set_style(style);
        for entry in &mut self.entries {
            entry.set_style(style);
        }
    }

    /// Round the main button and every entry alike.
    pub fn set_round_edges(&mut self, value: f32) -> Result<(), StyleError> {
        self.main.set_round_edges(value)?;
        for entry in &mut self.entries {
            entry.set_round_edges(value)?;
        }
        Ok(())
    }

    // ── Geometry ─────────────────────────────────────────────────────

    /// Entry regions for a main button at `region`, in entry order.
    ///
    /// Consecutive entries share a one-unit border row.
    pub fn menu_regions(&self, region: Region) -> Vec<Region> {
        let width = match self.width {
            MenuWidth::Match => region.width,
            MenuWidth::Fixed(w) => w,
        };
        let x = match self.side {
            MenuSide::Left => region.x,
            MenuSide::Right => region.right() - width,
        };
        let step = region.height - 1 + self.spacing;
        (1..=self.entries.len() as i32)
            .map(|i| {
                let y = match self.direction {
                    MenuDirection::Down => region.y + step * i,
                    MenuDirection::Up => region.y - step * i,
                };
                Region::new(x, y, width, region.height)
            })
            .collect()
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index);
        if self.selector {
            let text = self.entries[index].text().to_owned();
            self.main.set_text(text);
        }
        debug!(index, "drop-down entry selected");
        fire(self, |d| &mut d.on_select);
        if self.close_on_select {
            self.set_open(false);
        }
    }
}

impl Widget for DropDownButton {
    fn widget_type(&self) -> &str {
        "DropDownButton"
    }

    fn default_size(&self) -> Size {
        BUTTON_SIZE
    }

    fn process(&mut self, cx: &mut EventCtx<'_>, consumed: Option<WidgetId>) -> Option<WidgetId> {
        let region = cx.region;
        let (mut consumed, phase) = self.main.handle(region, cx.frame, consumed, cx.id);
        if phase == Some(Phase::Release) {
            self.set_open(!self.open);
            debug!(id = ?cx.id, open = self.open, "drop-down toggled");
        }

        if self.open {
            let regions = self.menu_regions(region);
            for (index, entry_region) in regions.into_iter().enumerate() {
                let (next, phase) = self.entries[index].handle(entry_region, cx.frame, consumed, cx.id);
                consumed = next;
                if phase == Some(Phase::Release) {
                    self.select(index);
                }
            }
        }

        if self.open && cx.frame.click_edge && consumed.is_none() && !cx.hovered() {
            self.set_open(false);
            self.main.notify_release();
            debug!(id = ?cx.id, "drop-down closed by outside click");
        }

        if self.float_when_open {
            cx.draw_to_front = self.open;
        }
        consumed
    }

    fn draw(&mut self, cx: &mut DrawCtx<'_>) {
        self.main.paint(cx.canvas, cx.shaper, cx.region);
        if self.open {
            for (entry, region) in self.entries.iter().zip(self.menu_regions(cx.region)) {
                entry.paint(cx.canvas, cx.shaper, region);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
