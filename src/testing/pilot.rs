//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` wraps an [`App`](crate::app::App) in headless mode, owns the
//! app's [`ManualClock`], and provides methods to simulate user input (keys,
//! pointer, wheel, resize), run cycles at chosen instants, and read back the
//! drawn surface as text.

use crate::app::{App, AppConfig, AppError};
use crate::clock::Clock;
use crate::event::input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
use crate::tree::{TreeError, WidgetId};
use crate::widget::Widget;

use super::clock::ManualClock;
use super::snapshot::canvas_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for testing.
///
/// Input is queued until the next [`tick`](Self::tick); time only moves through
/// [`advance`](Self::advance).
///
/// # Examples
///
/// ```ignore
/// use planboard::testing::Pilot;
/// use planboard::widgets::Button;
///
/// let mut pilot = Pilot::new(80, 24);
/// let ok = pilot.add(Button::new("OK"))?;
/// pilot.tick()?;
/// pilot.click(10, 10)?;
/// assert!(pilot.is_running());
/// ```
pub struct Pilot {
    app: App,
    clock: ManualClock,
}

impl Pilot {
    /// Create a headless app with the given surface size.
    pub fn new(width: u16, height: u16) -> Self {
        Self::build(App::new_headless(width, height))
    }

    /// Create an 80x24 Pilot from an [`AppConfig`], forcing headless mode.
    pub fn with_config(config: AppConfig) -> Self {
        Self::build(App::new_headless(80, 24).with_config(config))
    }

    fn build(app: App) -> Self {
        let clock = ManualClock::new();
        Self { app: app.with_clock(clock.clone()), clock }
    }

    /// Insert `widget` under the root container.
    pub fn add(&mut self, widget: impl Widget) -> Result<WidgetId, TreeError> {
        self.app.screen.add(widget)
    }

    /// Borrow a widget by concrete type.
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        self.app.screen.tree.widget::<T>(id)
    }

    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.app.screen.tree.widget_mut::<T>(id)
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Queue a key press with no modifiers.
    pub fn press_key(&mut self, key: Key) {
        self.press_key_with(key, Modifiers::NONE);
    }

    /// Queue a key press with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) {
        self.app.handle_input(InputEvent::Key(KeyEvent::new(key, modifiers)));
    }

    pub fn release_key(&mut self, key: Key) {
        self.app.handle_input(InputEvent::Key(KeyEvent::release(key)));
    }

    /// Queue each character of `text` as a `Key::Char` press.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press_key(Key::Char(ch));
        }
    }

    /// Queue a primary-button press at (x, y).
    pub fn press(&mut self, x: u16, y: u16) {
        self.mouse(MouseAction::Down(MouseBtn::Left), x, y);
    }

    /// Queue a primary-button release at (x, y).
    pub fn release(&mut self, x: u16, y: u16) {
        self.mouse(MouseAction::Up(MouseBtn::Left), x, y);
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.mouse(MouseAction::Moved, x, y);
    }

    /// Queue wheel notches at (x, y); positive scrolls the content down.
    pub fn scroll(&mut self, x: u16, y: u16, notches: i32) {
        let action = if notches < 0 { MouseAction::ScrollUp } else { MouseAction::ScrollDown };
        for _ in 0..notches.unsigned_abs() {
            self.mouse(action, x, y);
        }
    }

    /// Press at (x, y), run a cycle, release there, run another cycle.
    pub fn click(&mut self, x: u16, y: u16) -> Result<(), AppError> {
        self.press(x, y);
        self.tick()?;
        self.release(x, y);
        self.tick()?;
        Ok(())
    }

    /// Apply a surface resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.app.handle_input(InputEvent::Resize { width, height });
    }

    fn mouse(&mut self, kind: MouseAction, x: u16, y: u16) {
        self.app.handle_input(InputEvent::Mouse(MouseEvent { kind, x, y, modifiers: Modifiers::NONE }));
    }

    // ── Time and cycles ──────────────────────────────────────────────

    /// Run one cycle at the current manual time. Returns the pointer claim.
    pub fn tick(&mut self) -> Result<Option<WidgetId>, AppError> {
        self.app.cycle()
    }

    /// Move the clock forward by `seconds` without running a cycle.
    pub fn advance(&mut self, seconds: f64) {
        self.clock.advance(seconds);
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Borrow the underlying app immutably.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Borrow the underlying app mutably.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Whether the app is still running (has not quit).
    pub fn is_running(&self) -> bool {
        !self.app.should_quit()
    }

    /// The characters drawn by the last cycle.
    pub fn render(&self) -> String {
        canvas_to_string(&self.app.canvas)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::geometry::Size;
    use crate::layout::LayoutMode;
    use crate::widgets::{Button, Container, Label, TextField};

    fn placed(pilot: &mut Pilot, id: WidgetId, region: crate::geometry::Region) {
        let tree = &mut pilot.app_mut().screen.tree;
        tree.get_mut(id).unwrap().layout.mode = LayoutMode::Fixed;
        tree.set_geometry(id, region).unwrap();
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn new_creates_headless_app() {
        let pilot = Pilot::new(80, 24);
        assert!(!pilot.app().has_driver());
        assert!(pilot.is_running());
        assert_eq!(pilot.now(), 0.0);
    }

    #[test]
    fn new_sets_screen_dimensions() {
        let pilot = Pilot::new(120, 40);
        assert_eq!(pilot.app().screen.size(), Size::new(120, 40));
    }

    #[test]
    fn with_config_preserves_settings() {
        let config = AppConfig::new().with_title("Test App").with_fps(30).with_scroll_step(2);
        let pilot = Pilot::with_config(config);
        assert_eq!(pilot.app().config.title, Some("Test App".to_owned()));
        assert_eq!(pilot.app().config.fps, 30);
        assert_eq!(pilot.app().screen.settings.scroll_step, 2);
        assert!(!pilot.app().has_driver());
    }

    // ── Key input ────────────────────────────────────────────────────

    #[test]
    fn press_key_with_ctrl_c_quits() {
        let mut pilot = Pilot::new(80, 24);
        pilot.press_key_with(Key::Char('c'), Modifiers::CTRL);
        assert!(!pilot.is_running());
    }

    #[test]
    fn typed_text_lands_in_a_focused_field() {
        let mut pilot = Pilot::new(80, 24);
        let field = pilot.add(TextField::new()).unwrap();
        pilot.tick().unwrap();
        pilot.click(4, 4).unwrap();
        pilot.type_text("hi");
        pilot.tick().unwrap();
        assert_eq!(pilot.widget::<TextField>(field).unwrap().text(), "hi");
    }

    #[test]
    fn type_text_empty_string() {
        let mut pilot = Pilot::new(80, 24);
        pilot.type_text("");
        assert_eq!(pilot.tick().unwrap(), None);
        assert!(pilot.is_running());
    }

    // ── Pointer ──────────────────────────────────────────────────────

    #[test]
    fn click_presses_and_releases() {
        let mut pilot = Pilot::new(80, 24);
        let button = pilot.add(Button::new("go")).unwrap();
        placed(&mut pilot, button, crate::geometry::Region::new(0, 0, 10, 4));
        pilot.tick().unwrap();

        pilot.press(5, 2);
        assert_eq!(pilot.tick().unwrap(), Some(button));
        assert!(pilot.widget::<Button>(button).unwrap().is_pressed());
        pilot.release(5, 2);
        pilot.tick().unwrap();
        assert!(!pilot.widget::<Button>(button).unwrap().is_pressed());
    }

    #[test]
    fn scroll_moves_a_hovered_container() {
        let mut pilot = Pilot::with_config(AppConfig::new().with_scroll_step(1));
        let list = pilot.add(Container::new().scrollable()).unwrap();
        placed(&mut pilot, list, crate::geometry::Region::new(0, 0, 10, 4));
        for (i, word) in ["a", "b", "c", "d", "e", "f"].into_iter().enumerate() {
            let label = pilot.app_mut().screen.add_to(list, Label::new(word)).unwrap();
            pilot.app_mut().screen.tree.layout_mut(label).unwrap().align_top = i.checked_sub(1);
        }
        pilot.tick().unwrap();

        pilot.scroll(3, 1, 5);
        pilot.tick().unwrap();
        assert_eq!(pilot.widget::<Container>(list).unwrap().scroll_offset(), 2);
    }

    #[test]
    fn resize_updates_screen() {
        let mut pilot = Pilot::new(80, 24);
        pilot.resize(100, 50);
        pilot.tick().unwrap();
        assert!(pilot.is_running());
        assert_eq!(pilot.app().screen.size(), Size::new(100, 50));
    }

    // ── Time ─────────────────────────────────────────────────────────

    #[test]
    fn advance_moves_the_app_clock() {
        let mut pilot = Pilot::new(80, 24);
        pilot.advance(1.5);
        pilot.advance(0.5);
        assert_eq!(pilot.now(), 2.0);
    }

    // ── Render ───────────────────────────────────────────────────────

    #[test]
    fn render_reads_back_the_last_cycle() {
        let mut pilot = Pilot::new(12, 2);
        let label = pilot.add(Label::new("planner")).unwrap();
        pilot.app_mut().screen.tree.layout_mut(label).unwrap().set_gravity("bottom").unwrap();
        pilot.tick().unwrap();
        assert_eq!(pilot.render(), "\nplanner");
    }

    // ── App access ───────────────────────────────────────────────────

    #[test]
    fn app_mut_allows_mutation() {
        let mut pilot = Pilot::new(80, 24);
        pilot.app_mut().request_quit();
        assert!(!pilot.is_running());
    }
}
