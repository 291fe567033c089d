//! Text labels, static or refreshed from a closure.

use std::any::Any;
use std::fmt;

use crate::geometry::Size;
use crate::render::canvas::TextShaper;
use crate::render::color::Color;
use crate::widget::traits::{DrawCtx, Widget};

/// Font size labels use unless told otherwise.
pub const LABEL_TEXT_SIZE: u16 = 18;

/// A single line of text whose WRAP size is the shaped text size.
pub struct Label {
    text: String,
    pub color: Color,
    pub size: u16,
    source: Option<Box<dyn FnMut() -> String>>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color::BLACK,
            size: LABEL_TEXT_SIZE,
            source: None,
        }
    }

    /// A label that pulls its text from `source` before every layout pass.
    ///
    /// ```ignore
    /// let count = tasks.clone();
    /// tree.insert(Label::dynamic(move || format!("{} tasks", count.borrow().len())));
    /// ```
    pub fn dynamic(source: impl FnMut() -> String + 'static) -> Self {
        Self { source: Some(Box::new(source)), ..Self::new("") }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: u16) -> Self {
        self.size = size;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. A dynamic label overwrites it on the next measure.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_dynamic(&self) -> bool {
        self.source.is_some()
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("text", &self.text)
            .field("color", &self.color)
            .field("size", &self.size)
            .field("dynamic", &self.is_dynamic())
            .finish()
    }
}

impl Widget for Label {
    fn widget_type(&self) -> &str {
        "Label"
    }

    fn measure(&mut self, shaper: &dyn TextShaper) -> Option<Size> {
        if let Some(source) = &mut self.source {
            self.text = source();
        }
        Some(shaper.shape(&self.text, self.size, self.color).size)
    }

    fn draw(&mut self, cx: &mut DrawCtx<'_>) {
        let rendered = cx.shaper.shape(&self.text, self.size, self.color);
        cx.canvas.blit_text(&rendered, cx.region.offset());
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::render::cells::CellShaper;

    #[test]
    fn measure_uses_shaped_size() {
        let mut label = Label::new("hello").with_size(24);
        assert_eq!(label.measure(&CellShaper), Some(Size::new(5, 1)));
        assert_eq!(label.size, 24);
        assert!(!label.is_dynamic());
    }

    #[test]
    fn dynamic_label_refreshes_on_measure() {
        let ticks = Rc::new(Cell::new(0));
        let source = ticks.clone();
        let mut label = Label::dynamic(move || {
            source.set(source.get() + 1);
            format!("tick {}", source.get())
        });
        assert_eq!(label.text(), "");
        label.measure(&CellShaper);
        assert_eq!(label.text(), "tick 1");
        label.set_text("manual");
        assert_eq!(label.measure(&CellShaper), Some(Size::new(6, 1)));
        assert_eq!(label.text(), "tick 2");
        assert_eq!(ticks.get(), 2);
    }
}
