//! Button widget: press/hover/hold colours, optional toggle state, callbacks.
//!
//! The pointer logic lives in [`Button::handle`], which takes the region to
//! hit-test against instead of reading it from the tree. That lets composite
//! widgets such as [`DropDownButton`](super::DropDownButton) drive buttons
//! that are not nodes of their own.

use std::any::Any;

use crate::event::frame::InputFrame;
use crate::geometry::{Offset, Region, Size};
use crate::render::canvas::{Canvas, TextShaper};
use crate::render::color::Color;
use crate::tree::WidgetId;
use crate::widget::traits::{fire, Callback, DrawCtx, EventCtx, Widget};

/// Size given to a freshly inserted button.
pub const BUTTON_SIZE: Size = Size::new(100, 50);

// ---------------------------------------------------------------------------
// StyleError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleError {
    #[error("edge rounding must be within [0, 1], got {0}")]
    RoundingOutOfRange(f32),
}

// ---------------------------------------------------------------------------
// Style types
// ---------------------------------------------------------------------------

/// How the button body is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStyle {
    Rect,
    /// Corners rounded with the given radius.
    RoundedRect { strength: i32 },
}

/// Placement of the label along one axis of the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Start,
    #[default]
    Center,
    End,
}

impl TextAlign {
    fn place(self, start: i32, outer: i32, inner: i32) -> i32 {
        match self {
            TextAlign::Start => start,
            TextAlign::Center => start + (outer - inner) / 2,
            TextAlign::End => start + outer - inner,
        }
    }
}

/// Colours and stroke of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyle {
    pub fill: Color,
    pub hover: Color,
    pub hold: Color,
    pub border_color: Color,
    pub text_color: Color,
    pub border: i32,
    pub text_size: u16,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            fill: Color::WHITE,
            hover: Color::LIGHT_GREY,
            hold: Color::GREY,
            border_color: Color::BLACK,
            text_color: Color::BLACK,
            border: 2,
            text_size: 18,
        }
    }
}

/// Colours used while a toggle button is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleStyle {
    pub fill: Color,
    pub hover: Color,
    pub hold: Color,
}

impl Default for ToggleStyle {
    fn default() -> Self {
        Self {
            fill: Color::LIGHT_BLUE,
            hover: Color::BLUE,
            hold: Color::DARK_BLUE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ToggleState {
    on: bool,
    style: ToggleStyle,
}

/// What a button did with the pointer this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Press,
    Release,
    Hover,
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A clickable button.
///
/// While active and unclaimed, a button claims the cycle whenever the pointer
/// is strictly inside it or it is being held. A press arms it; the matching
/// release fires even when the pointer has left. Otherwise it just shows its
/// hover colour.
///
/// ```ignore
/// let mut ok = Button::new("OK");
/// ok.on_release(|b| println!("released {}", b.text()));
/// let id = tree.insert(ok);
/// ```
pub struct Button {
    text: String,
    pub style: ButtonStyle,
    pub align_x: TextAlign,
    pub align_y: TextAlign,
    round_edges: f32,
    active: bool,
    pressed: bool,
    current_fill: Color,
    toggle: Option<ToggleState>,
    on_press: Option<Callback<Button>>,
    on_release: Option<Callback<Button>>,
    on_hover: Option<Callback<Button>>,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        let style = ButtonStyle::default();
        Self {
            text: text.into(),
            current_fill: style.fill,
            style,
            align_x: TextAlign::Center,
            align_y: TextAlign::Center,
            round_edges: 0.0,
            active: true,
            pressed: false,
            toggle: None,
            on_press: None,
            on_release: None,
            on_hover: None,
        }
    }

    /// A button that flips between on and off on every release.
    pub fn toggle(text: impl Into<String>) -> Self {
        let mut button = Self::new(text);
        button.toggle = Some(ToggleState { on: false, style: ToggleStyle::default() });
        button
    }

    // ── Configuration ────────────────────────────────────────────────

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.set_style(style);
        self
    }

    /// Replace the colour set and repaint with the new resting colour.
    pub fn set_style(&mut self, style: ButtonStyle) {
        self.style = style;
        self.reset_color();
    }

    pub fn set_toggle_style(&mut self, style: ToggleStyle) {
        if let Some(toggle) = &mut self.toggle {
            toggle.style = style;
            self.reset_color();
        }
    }

    /// Inactive buttons never claim the pointer.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.pressed = false;
            self.reset_color();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Round the corners by `value` of half the shorter side (`0` = square).
    pub fn set_round_edges(&mut self, value: f32) -> Result<(), StyleError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(StyleError::RoundingOutOfRange(value));
        }
        self.round_edges = value;
        Ok(())
    }

    pub fn round_edges(&self) -> f32 {
        self.round_edges
    }

    /// The draw style for a button occupying `region`.
    ///
    /// Rounding that would not clear the border falls back to a plain rectangle.
    pub fn draw_style(&self, region: Region) -> DrawStyle {
        let strength = (region.width.min(region.height) as f32 * self.round_edges / 2.0) as i32;
        if self.round_edges == 0.0 || strength < self.style.border {
            DrawStyle::Rect
        } else {
            DrawStyle::RoundedRect { strength }
        }
    }

    pub fn on_press(&mut self, f: impl FnMut(&mut Button) + 'static) {
        self.on_press = Some(Box::new(f));
    }

    pub fn on_release(&mut self, f: impl FnMut(&mut Button) + 'static) {
        self.on_release = Some(Box::new(f));
    }

    pub fn on_hover(&mut self, f: impl FnMut(&mut Button) + 'static) {
        self.on_hover = Some(Box::new(f));
    }

    // ── State ────────────────────────────────────────────────────────

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// `Some(on)` for toggle buttons, `None` otherwise.
    pub fn toggled(&self) -> Option<bool> {
        self.toggle.map(|t| t.on)
    }

    pub fn set_toggled(&mut self, on: bool) {
        if let Some(toggle) = &mut self.toggle {
            toggle.on = on;
            self.reset_color();
        }
    }

    /// Colour the body is currently painted with.
    pub fn current_fill(&self) -> Color {
        self.current_fill
    }

    // ── Pointer ──────────────────────────────────────────────────────

    /// Run the button's pointer logic against `region`, claiming for `claimant`.
    ///
    /// Returns the new claim token and what happened, if the button acted.
    pub fn handle(
        &mut self,
        region: Region,
        frame: &InputFrame,
        consumed: Option<WidgetId>,
        claimant: WidgetId,
    ) -> (Option<WidgetId>, Option<Phase>) {
        let engaged = region.contains_strict(frame.pointer) || self.pressed;
        if !(engaged && self.active && consumed.is_none()) {
            self.reset_color();
            return (consumed, None);
        }
        let phase = if frame.click_edge {
            self.press();
            Phase::Press
        } else if frame.release_edge && self.pressed {
            self.release();
            Phase::Release
        } else {
            self.hover();
            Phase::Hover
        };
        (Some(claimant), Some(phase))
    }

    fn press(&mut self) {
        self.pressed = true;
        self.current_fill = match self.toggle {
            Some(t) if t.on => t.style.hold,
            _ => self.style.hold,
        };
        fire(self, |b| &mut b.on_press);
    }

    fn release(&mut self) {
        self.pressed = false;
        if let Some(toggle) = &mut self.toggle {
            toggle.on = !toggle.on;
        }
        self.reset_color();
        fire(self, |b| &mut b.on_release);
    }

    /// Run the release callback without a pointer release.
    pub(crate) fn notify_release(&mut self) {
        fire(self, |b| &mut b.on_release);
    }

    fn hover(&mut self) {
        if !self.pressed {
            self.current_fill = match self.toggle {
                Some(t) if t.on => t.style.hover,
                _ => self.style.hover,
            };
        }
        fire(self, |b| &mut b.on_hover);
    }

    fn reset_color(&mut self) {
        self.current_fill = match self.toggle {
            Some(t) if t.on => t.style.fill,
            _ => self.style.fill,
        };
    }

    // ── Drawing ──────────────────────────────────────────────────────

    /// Paint the button into `region`.
    pub fn paint(&self, canvas: &mut dyn Canvas, shaper: &dyn TextShaper, region: Region) {
        let fill = self.current_fill;
        let border = self.style.border;
        let stroke = self.style.border_color;
        match self.draw_style(region) {
            DrawStyle::Rect => {
                canvas.fill_rect(region, fill);
                if border > 0 {
                    canvas.stroke_rect(region, stroke, border);
                }
            }
            DrawStyle::RoundedRect { strength: s } => {
                let Region { x, y, width: w, height: h } = region;
                let corners = [
                    Offset::new(x + s, y + s),
                    Offset::new(x + w - s - 1, y + s),
                    Offset::new(x + w - s - 1, y + h - s - 1),
                    Offset::new(x + s, y + h - s - 1),
                ];
                for corner in corners {
                    if border > 0 {
                        canvas.stroke_circle(corner, s, stroke, border);
                    }
                    canvas.fill_circle(corner, s - border, fill);
                }
                canvas.fill_rect(Region::new(x + s, y, w - 2 * s, h), fill);
                canvas.fill_rect(Region::new(x, y + s, w, h - 2 * s), fill);
                if border > 0 {
                    canvas.fill_rect(Region::new(x + s, y, w - 2 * s, border), stroke);
                    canvas.fill_rect(Region::new(x + s, y + h - border, w - 2 * s, border), stroke);
                    canvas.fill_rect(Region::new(x, y + s, border, h - 2 * s), stroke);
                    canvas.fill_rect(Region::new(x + w - border, y + s, border, h - 2 * s), stroke);
                }
            }
        }

        if !self.text.is_empty() {
            let label = shaper.shape(&self.text, self.style.text_size, self.style.text_color);
            let at = Offset::new(
                self.align_x.place(region.x, region.width, label.width()),
                self.align_y.place(region.y, region.height, label.height()),
            );
            canvas.blit_text(&label, at);
        }
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn default_size(&self) -> Size {
        BUTTON_SIZE
    }

    fn process(&mut self, cx: &mut EventCtx<'_>, consumed: Option<WidgetId>) -> Option<WidgetId> {
        self.handle(cx.region, cx.frame, consumed, cx.id).0
    }

    fn draw(&mut self, cx: &mut DrawCtx<'_>) {
        self.paint(cx.canvas, cx.shaper, cx.region);
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
