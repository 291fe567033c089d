//! TextField widget: a focusable single-line editor.
//!
//! Supports a caret, a pointer-dragged selection, horizontal scrolling that
//! keeps the caret in view, held-key repeat and a blinking caret.
//!
//! Positions are caret positions in `[0, len]`: position `i` sits before
//! character `i`. Per-character widths come from the [`TextShaper`] as prefix
//! width deltas and are cached; a mutation invalidates the cache from the
//! first changed index onward.

use std::any::Any;
use std::ops::Range;

use tracing::debug;

use crate::event::input::{Key, KeyKind, Modifiers};
use crate::event::repeat::{Blink, KeyRepeat};
use crate::event::frame::DEFAULT_CARET_BLINK;
use crate::geometry::{Offset, Region, Size};
use crate::render::canvas::TextShaper;
use crate::render::color::Color;
use crate::tree::WidgetId;
use crate::widget::traits::{fire, Callback, DrawCtx, EventCtx, FocusCtx, Widget};

/// Size given to a freshly inserted text field.
pub const TEXT_FIELD_SIZE: Size = Size::new(200, 70);

// ---------------------------------------------------------------------------
// CharSet
// ---------------------------------------------------------------------------

/// Characters a field accepts. Anything else is dropped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    /// ASCII letters, digits, punctuation and space.
    #[default]
    General,
    /// ASCII digits only.
    Numeric,
}

impl CharSet {
    pub fn allows(self, ch: char) -> bool {
        match self {
            CharSet::General => ch.is_ascii_alphanumeric() || ch.is_ascii_punctuation() || ch == ' ',
            CharSet::Numeric => ch.is_ascii_digit(),
        }
    }
}

// ---------------------------------------------------------------------------
// TextFieldStyle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFieldStyle {
    pub fill: Color,
    pub border_color: Color,
    pub text_color: Color,
    pub placeholder_color: Color,
    pub highlight: Color,
    pub border: i32,
    pub text_size: u16,
    /// Distance the caret keeps from either side while scrolling.
    pub margin: i32,
}

impl Default for TextFieldStyle {
    fn default() -> Self {
        Self {
            fill: Color::WHITE,
            border_color: Color::BLACK,
            text_color: Color::BLACK,
            placeholder_color: Color::GREY,
            highlight: Color::SKY_BLUE,
            border: 2,
            text_size: 18,
            margin: 20,
        }
    }
}

// ---------------------------------------------------------------------------
// TextField
// ---------------------------------------------------------------------------

/// A single-line text input.
///
/// Focus is gained by releasing the pointer over the field when nothing else
/// claimed the cycle, and lost on any click outside it. The field claims the
/// cycle whenever the pointer hovers it unclaimed, even without a click, so
/// widgets beneath it never see that pointer.
///
/// # Examples
///
/// ```ignore
/// let mut minutes = TextField::new().with_placeholder("Minutes");
/// minutes.set_charset(CharSet::Numeric);
/// let id = tree.insert(minutes);
/// ```
pub struct TextField {
    chars: Vec<char>,
    widths: Vec<i32>,
    widths_valid: usize,
    caret: usize,
    /// `(anchor, end)`; the range is empty when they are equal.
    selection: Option<(usize, usize)>,
    dragging: bool,
    scroll_x: i32,
    focused: bool,
    charset: CharSet,
    placeholder: String,
    pub style: TextFieldStyle,
    repeat: KeyRepeat,
    blink: Blink,
    blink_period: f64,
    on_change: Option<Callback<TextField>>,
}

impl TextField {
    pub fn new() -> Self {
        Self {
            chars: Vec::new(),
            widths: Vec::new(),
            widths_valid: 0,
            caret: 0,
            selection: None,
            dragging: false,
            scroll_x: 0,
            focused: false,
            charset: CharSet::General,
            placeholder: String::new(),
            style: TextFieldStyle::default(),
            repeat: KeyRepeat::new(),
            blink: Blink::default(),
            blink_period: DEFAULT_CARET_BLINK,
            on_change: None,
        }
    }

    /// Text shown in the placeholder colour while the field is empty.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn set_charset(&mut self, charset: CharSet) {
        self.charset = charset;
    }

    pub fn charset(&self) -> CharSet {
        self.charset
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Called after every edit that changes the text.
    pub fn on_change(&mut self, f: impl FnMut(&mut TextField) + 'static) {
        self.on_change = Some(Box::new(f));
    }

    // ── Content ──────────────────────────────────────────────────────

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Replace the text, put the caret at the end and drop the selection.
    pub fn set_text(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.caret = self.chars.len();
        self.selection = None;
        self.invalidate(0);
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// The selected range, if it is non-empty.
    pub fn selection(&self) -> Option<Range<usize>> {
        let (a, b) = self.selection?;
        (a != b).then(|| a.min(b)..a.max(b))
    }

    /// Select `range` (clamped to the text) and move the caret to its end.
    pub fn select(&mut self, range: Range<usize>) {
        let start = range.start.min(self.len());
        let end = range.end.min(self.len());
        self.selection = Some((start, end));
        self.caret = end;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.dragging = false;
            self.repeat.clear();
        }
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Insert `ch` at the caret, replacing the selection.
    ///
    /// Characters outside the charset are ignored.
    pub fn insert_char(&mut self, ch: char) {
        if !self.charset.allows(ch) {
            return;
        }
        self.delete_selection();
        self.chars.insert(self.caret, ch);
        self.invalidate(self.caret);
        self.caret += 1;
        self.changed();
    }

    /// Delete the selection, or the character before the caret.
    pub fn delete_backward(&mut self) {
        if self.delete_selection() {
            self.changed();
        } else if self.caret > 0 {
            self.caret -= 1;
            self.chars.remove(self.caret);
            self.invalidate(self.caret);
            self.changed();
        }
    }

    /// Delete the selection, or the character after the caret.
    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            self.changed();
        } else if self.caret < self.chars.len() {
            self.chars.remove(self.caret);
            self.invalidate(self.caret);
            self.changed();
        }
    }

    pub fn move_caret_left(&mut self) {
        self.move_caret(self.caret.saturating_sub(1));
    }

    pub fn move_caret_right(&mut self) {
        self.move_caret((self.caret + 1).min(self.chars.len()));
    }

    pub fn move_caret_home(&mut self) {
        self.move_caret(0);
    }

    pub fn move_caret_end(&mut self) {
        self.move_caret(self.chars.len());
    }

    fn move_caret(&mut self, to: usize) {
        self.caret = to;
        self.selection = None;
    }

    fn delete_selection(&mut self) -> bool {
        let Some(range) = self.selection() else {
            self.selection = None;
            return false;
        };
        self.chars.drain(range.clone());
        self.invalidate(range.start);
        self.caret = range.start;
        self.selection = None;
        true
    }

    fn changed(&mut self) {
        fire(self, |f| &mut f.on_change);
    }

    fn apply(&mut self, key: Key) {
        match key {
            Key::Char(ch) => self.insert_char(ch),
            Key::Backspace => self.delete_backward(),
            Key::Delete => self.delete_forward(),
            Key::Left => self.move_caret_left(),
            Key::Right => self.move_caret_right(),
            Key::Home => self.move_caret_home(),
            Key::End => self.move_caret_end(),
            _ => {}
        }
    }

    // ── Measurement ──────────────────────────────────────────────────

    fn invalidate(&mut self, from: usize) {
        self.widths_valid = self.widths_valid.min(from);
    }

    /// Bring the width cache up to date with the text.
    fn refresh_widths(&mut self, shaper: &dyn TextShaper) {
        if self.widths_valid == self.chars.len() && self.widths.len() == self.chars.len() {
            return;
        }
        self.widths.truncate(self.widths_valid);
        let mut prefix: String = self.chars[..self.widths_valid].iter().collect();
        let mut before = shaper.text_width(&prefix, self.style.text_size);
        for &ch in &self.chars[self.widths_valid..] {
            prefix.push(ch);
            let after = shaper.text_width(&prefix, self.style.text_size);
            self.widths.push(after - before);
            before = after;
        }
        self.widths_valid = self.chars.len();
    }

    /// Horizontal distance from the text start to caret position `pos`.
    fn offset_of(&self, pos: usize) -> i32 {
        self.widths[..pos.min(self.widths.len())].iter().sum()
    }

    /// Caret position nearest to surface column `x`.
    ///
    /// Position `i` wins while `x` is left of the middle of character `i`.
    fn position_at(&self, region: Region, x: i32) -> usize {
        let relative = x - region.x - self.scroll_x;
        let mut edge = 0;
        for (i, &w) in self.widths.iter().enumerate() {
            edge += w;
            if relative < edge - w / 2 {
                return i;
            }
        }
        self.widths.len()
    }

    /// Keep the caret between the margins, pulling short text back to the left margin.
    fn scroll_to_caret(&mut self, width: i32) {
        let margin = self.style.margin;
        let pos = self.offset_of(self.caret) + self.scroll_x;
        if pos > width - margin {
            self.scroll_x -= pos - (width - margin);
        } else if margin > 0 && pos < 2 * margin {
            // Step back in whole margins until the caret clears twice the margin.
            let steps = (2 * margin - pos + margin - 1) / margin;
            self.scroll_x += steps * margin;
        } else if pos < margin {
            self.scroll_x += margin - pos;
        }
        self.scroll_x = self.scroll_x.min(margin);
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextField {
    fn widget_type(&self) -> &str {
        "TextField"
    }

    fn default_size(&self) -> Size {
        TEXT_FIELD_SIZE
    }

    fn process(&mut self, cx: &mut EventCtx<'_>, consumed: Option<WidgetId>) -> Option<WidgetId> {
        let frame = cx.frame;
        let hovered = cx.hovered();
        if frame.click_edge && !hovered && self.focused {
            self.set_focused(false);
            debug!(id = ?cx.id, "text field lost focus");
        }

        if self.focused {
            self.refresh_widths(cx.shaper);
            if frame.click_edge && hovered && consumed.is_none() {
                let pos = self.position_at(cx.region, frame.pointer.x);
                self.selection = Some((pos, pos));
                self.caret = pos;
                self.dragging = true;
                self.blink.reset(cx.now);
            }
            if self.dragging {
                let pos = self.position_at(cx.region, frame.pointer.x);
                if let Some((_, end)) = &mut self.selection {
                    *end = pos;
                }
                self.caret = pos;
            }
            if frame.release_edge {
                self.dragging = false;
            }
        } else if frame.release_edge && hovered && consumed.is_none() {
            self.refresh_widths(cx.shaper);
            self.focused = true;
            self.caret = self.position_at(cx.region, frame.pointer.x);
            self.selection = None;
            self.blink.reset(cx.now);
            debug!(id = ?cx.id, caret = self.caret, "text field focused");
        }

        if hovered && consumed.is_none() {
            Some(cx.id)
        } else {
            consumed
        }
    }

    fn process_focus(&mut self, cx: &mut FocusCtx<'_>) {
        self.blink_period = cx.settings.caret_blink;
        if !self.focused {
            self.repeat.clear();
            return;
        }
        let (delay, interval) = (cx.settings.repeat_delay, cx.settings.repeat_interval);
        for event in &cx.frame.keys {
            match event.kind {
                KeyKind::Press => {
                    if event.modifiers.contains(Modifiers::CTRL) || event.modifiers.contains(Modifiers::ALT) {
                        continue;
                    }
                    self.repeat.press(event.code, cx.now);
                    if let Some(key) = self.repeat.poll(cx.now, delay, interval) {
                        self.apply(key);
                        self.blink.reset(cx.now);
                    }
                }
                KeyKind::Release => self.repeat.release(event.code),
            }
        }
        if let Some(key) = self.repeat.poll(cx.now, delay, interval) {
            self.apply(key);
            self.blink.reset(cx.now);
        }
    }

    fn draw(&mut self, cx: &mut DrawCtx<'_>) {
        self.refresh_widths(cx.shaper);
        let region = cx.region;
        let style = self.style;
        self.scroll_to_caret(region.width);

        cx.canvas.fill_rect(region, style.fill);

        let shown = if self.chars.is_empty() {
            cx.shaper.shape(&self.placeholder, style.text_size, style.placeholder_color)
        } else {
            cx.shaper.shape(&self.text(), style.text_size, style.text_color)
        };
        let text_x = region.x + self.scroll_x;
        let text_y = region.y + (region.height - shown.height()) / 2;

        if let Some(range) = self.selection() {
            let start = text_x + self.offset_of(range.start);
            let end = text_x + self.offset_of(range.end);
            cx.canvas.fill_rect(Region::new(start, text_y, end - start, shown.height()), style.highlight);
        }
        if self.focused && self.blink.update(cx.now, self.blink_period) {
            let x = text_x + self.offset_of(self.caret);
            let bottom = text_y + shown.height() - 1;
            cx.canvas.line(Offset::new(x, text_y), Offset::new(x, bottom), style.text_color, 1);
        }
        cx.canvas.blit_text(&shown, Offset::new(text_x, text_y));

        cx.canvas.fill_rect(Region::new(region.x, region.y, style.margin, region.height), style.fill);
        cx.canvas.fill_rect(
            Region::new(region.right() - style.margin, region.y, style.margin, region.height),
            style.fill,
        );
        if style.border > 0 {
            cx.canvas.stroke_rect(region, style.border_color, style.border);
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
