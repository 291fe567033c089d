//! App struct: configuration, input collection and the fixed-rate loop.
//!
//! [`App`] ties together the screen, a cell canvas, the clock and the
//! optional terminal driver. Raw [`InputEvent`]s are folded into a pending
//! [`InputFrame`] as they arrive; each cycle hands that frame to the screen,
//! draws, and presents the result. The `new_headless` constructor allows
//! testing without a real terminal.

use std::io;
use std::time::Duration;

use crossterm::event;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, trace};

use crate::clock::{Clock, MonotonicClock};
use crate::event::frame::{
    InputFrame, InputSettings, DEFAULT_CARET_BLINK, DEFAULT_REPEAT_DELAY, DEFAULT_REPEAT_INTERVAL,
    DEFAULT_SCROLL_STEP,
};
use crate::event::input::{InputEvent, Key, KeyEvent, Modifiers};
use crate::geometry::Size;
use crate::layout::LayoutError;
use crate::render::cells::{CellCanvas, CellShaper};
use crate::render::color::Color;
use crate::render::driver::Driver;
use crate::screen::Screen;
use crate::tree::WidgetId;
use crate::widgets::Container;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Optional terminal title.
    pub title: Option<String>,
    /// Target cycles per second for the run loop.
    pub fps: u32,
    /// Wheel step in surface units.
    pub scroll_step: i32,
    /// Seconds a key is held before it repeats.
    pub repeat_delay: f64,
    /// Seconds between repeats once repeating.
    pub repeat_interval: f64,
    /// Caret blink half-period in seconds.
    pub caret_blink: f64,
    /// Root container fill. `None` leaves the surface untouched.
    pub background: Option<Color>,
    /// Feed a key-up for every key-down one cycle later.
    ///
    /// Most terminals never report key releases; without this a held key
    /// would repeat forever.
    pub synthesize_key_release: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: None,
            fps: 60,
            scroll_step: DEFAULT_SCROLL_STEP,
            repeat_delay: DEFAULT_REPEAT_DELAY,
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
            caret_blink: DEFAULT_CARET_BLINK,
            background: None,
            synthesize_key_release: true,
        }
    }
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the target FPS (builder).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_scroll_step(mut self, step: i32) -> Self {
        self.scroll_step = step;
        self
    }

    /// Set the key repeat delay and interval, in seconds (builder).
    pub fn with_key_repeat(mut self, delay: f64, interval: f64) -> Self {
        self.repeat_delay = delay;
        self.repeat_interval = interval;
        self
    }

    pub fn with_caret_blink(mut self, period: f64) -> Self {
        self.caret_blink = period;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_synthesized_release(mut self, enabled: bool) -> Self {
        self.synthesize_key_release = enabled;
        self
    }

    /// The tunables the focus pass hands to widgets.
    pub fn settings(&self) -> InputSettings {
        InputSettings {
            scroll_step: self.scroll_step,
            repeat_delay: self.repeat_delay,
            repeat_interval: self.repeat_interval,
            caret_blink: self.caret_blink,
        }
    }

    fn period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }
}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// Combine the loop's outcome with restoring the terminal. A loop error wins
/// over a restore error, which is only logged in that case.
fn settle(result: Result<(), AppError>, restored: io::Result<()>) -> Result<(), AppError> {
    if let Err(err) = restored {
        error!(error = %err, "failed to restore the terminal");
        result?;
        return Err(err.into());
    }
    result
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The main application struct.
///
/// The driver is optional to support headless testing.
pub struct App {
    /// The screen (tree, root container, floating layer).
    pub screen: Screen,
    /// The surface every cycle draws onto.
    pub canvas: CellCanvas,
    /// Terminal output driver. `None` in headless mode.
    pub driver: Option<Driver>,
    /// Application configuration.
    pub config: AppConfig,
    clock: Box<dyn Clock>,
    pending: InputFrame,
    synthetic: Vec<KeyEvent>,
    running: bool,
}

impl App {
    /// Create a new app with a real terminal driver.
    ///
    /// Queries the terminal size to set the initial screen dimensions.
    pub fn new(config: AppConfig) -> io::Result<Self> {
        let (width, height) = Driver::terminal_size()?;
        let mut app = Self::new_headless(width, height).with_config(config);
        app.driver = Some(Driver::new()?);
        Ok(app)
    }

    /// Create a headless app for testing (no terminal driver).
    pub fn new_headless(width: u16, height: u16) -> Self {
        let size = Size::new(i32::from(width), i32::from(height));
        Self {
            screen: Screen::new(size),
            canvas: CellCanvas::new(width, height),
            driver: None,
            config: AppConfig::default(),
            clock: Box::new(MonotonicClock::new()),
            pending: InputFrame::default(),
            synthetic: Vec::new(),
            running: true,
        }
    }

    /// Replace the configuration (builder).
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.screen.settings = config.settings();
        let root = self.screen.root();
        if let Some(container) = self.screen.tree.widget_mut::<Container>(root) {
            container.background = config.background;
        }
        self.config = config;
        self
    }

    /// Replace the time source (builder).
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Fold a raw event into the next cycle's frame.
    ///
    /// Ctrl+C quits and a resize takes effect immediately. Everything else
    /// waits for [`cycle`](Self::cycle).
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(ke)
                if ke.is_press() && ke.code == Key::Char('c') && ke.modifiers.contains(Modifiers::CTRL) =>
            {
                debug!("quit requested from keyboard");
                self.request_quit();
            }
            InputEvent::Resize { width, height } => {
                self.screen.resize(Size::new(i32::from(width), i32::from(height)));
                self.canvas.resize(width, height);
                if let Some(driver) = self.driver.as_mut() {
                    driver.invalidate();
                }
                debug!(width, height, "surface resized");
            }
            other => self.pending.push(&other),
        }
    }

    /// Run one cycle at the clock's current time.
    pub fn cycle(&mut self) -> Result<Option<WidgetId>, AppError> {
        let now = self.clock.now();
        self.cycle_at(now)
    }

    /// Run one cycle at `now`: dispatch the pending frame, draw, present.
    ///
    /// Returns the widget that claimed the pointer, if any.
    pub fn cycle_at(&mut self, now: f64) -> Result<Option<WidgetId>, AppError> {
        let mut frame = self.pending.take();
        if !self.synthetic.is_empty() {
            let mut keys = std::mem::take(&mut self.synthetic);
            keys.append(&mut frame.keys);
            frame.keys = keys;
        }
        if self.config.synthesize_key_release {
            self.synthetic = frame
                .keys
                .iter()
                .filter(|key| key.is_press())
                .map(|key| KeyEvent::release(key.code))
                .collect();
        }

        self.canvas.clear();
        let claim = self.screen.cycle(&frame, &mut self.canvas, &CellShaper, now)?;
        if let Some(driver) = self.driver.as_mut() {
            driver.present(&self.canvas)?;
        }
        trace!(now, claim = ?claim, "cycle complete");
        Ok(claim)
    }

    /// Run the fixed-rate loop until quit.
    ///
    /// Enters the terminal first and always tries to leave it again. A layout
    /// error is logged and ends the loop.
    pub async fn run(&mut self) -> Result<(), AppError> {
        if let Some(driver) = self.driver.as_mut() {
            driver.enter()?;
            if let Some(title) = &self.config.title {
                driver.set_title(title)?;
            }
        }
        let result = self.run_loop().await;
        match self.driver.as_mut() {
            Some(driver) => settle(result, driver.leave()),
            None => result,
        }
    }

    async fn run_loop(&mut self) -> Result<(), AppError> {
        let mut ticker = tokio::time::interval(self.config.period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        while self.running {
            ticker.tick().await;
            if self.driver.is_some() {
                self.poll_terminal()?;
            }
            if let Err(err) = self.cycle() {
                error!(error = %err, "stopping after a failed cycle");
                self.running = false;
                return Err(err);
            }
        }
        Ok(())
    }

    /// Drain every terminal event that is already waiting.
    fn poll_terminal(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let raw = event::read()?;
            self.handle_input(InputEvent::from(raw));
        }
        Ok(())
    }

    /// Whether the app should quit.
    pub fn should_quit(&self) -> bool {
        !self.running
    }

    /// Request the app to quit.
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// Whether the app has a terminal driver (not headless).
    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::event::input::{MouseAction, MouseBtn, MouseEvent};
    use crate::widgets::{Button, TextField};

    fn headless_app() -> App {
        App::new_headless(80, 24)
    }

    fn mouse(kind: MouseAction, x: u16, y: u16) -> InputEvent {
        InputEvent::Mouse(MouseEvent { kind, x, y, modifiers: Modifiers::NONE })
    }

    fn key(c: char) -> InputEvent {
        InputEvent::Key(KeyEvent::new(Key::Char(c), Modifiers::NONE))
    }

    /// A focused text field filling the top-left of an 80x24 app.
    fn app_with_field(config: AppConfig) -> (App, WidgetId) {
        let mut app = headless_app().with_config(config);
        let field = app.screen.add(TextField::new()).unwrap();
        app.cycle_at(0.0).unwrap();
        app.handle_input(mouse(MouseAction::Down(MouseBtn::Left), 5, 5));
        app.cycle_at(0.0).unwrap();
        app.handle_input(mouse(MouseAction::Up(MouseBtn::Left), 5, 5));
        app.cycle_at(0.0).unwrap();
        assert!(app.screen.tree.widget::<TextField>(field).unwrap().is_focused());
        (app, field)
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn headless_app_no_driver() {
        let app = headless_app();
        assert!(!app.has_driver());
        assert!(!app.should_quit());
    }

    #[test]
    fn headless_app_sizes() {
        let app = App::new_headless(120, 40);
        assert_eq!(app.screen.size(), Size::new(120, 40));
        assert_eq!((app.canvas.width(), app.canvas.height()), (120, 40));
    }

    #[test]
    fn with_config_pushes_settings_and_background() {
        let config = AppConfig::new().with_scroll_step(3).with_background(Color::GREEN);
        let mut app = headless_app().with_config(config);
        assert_eq!(app.screen.settings.scroll_step, 3);
        app.cycle_at(0.0).unwrap();
        assert_eq!(app.canvas.get(79, 23).unwrap().bg, Some(Color::GREEN));
    }

    // ── request_quit / should_quit ───────────────────────────────────

    #[test]
    fn request_quit() {
        let mut app = headless_app();
        assert!(!app.should_quit());
        app.request_quit();
        assert!(app.should_quit());
    }

    // ── handle_input ─────────────────────────────────────────────────

    #[test]
    fn handle_input_ctrl_c_quits() {
        let mut app = headless_app();
        app.handle_input(InputEvent::Key(KeyEvent::new(Key::Char('c'), Modifiers::CTRL)));
        assert!(app.should_quit());
    }

    #[test]
    fn handle_input_plain_c_does_not_quit() {
        let mut app = headless_app();
        app.handle_input(key('c'));
        assert!(!app.should_quit());
    }

    #[test]
    fn handle_input_resize_updates_screen_and_canvas() {
        let mut app = headless_app();
        app.handle_input(InputEvent::Resize { width: 100, height: 30 });
        assert_eq!(app.screen.size(), Size::new(100, 30));
        assert_eq!((app.canvas.width(), app.canvas.height()), (100, 30));
    }

    #[test]
    fn pointer_events_wait_for_the_next_cycle() {
        let mut app = headless_app();
        let button = app.screen.add(Button::new("ok")).unwrap();
        app.cycle_at(0.0).unwrap();

        app.handle_input(mouse(MouseAction::Down(MouseBtn::Left), 10, 10));
        assert!(!app.screen.tree.widget::<Button>(button).unwrap().is_pressed());

        let claim = app.cycle_at(0.1).unwrap();
        assert_eq!(claim, Some(button));
        assert!(app.screen.tree.widget::<Button>(button).unwrap().is_pressed());

        // The frame was consumed; an idle cycle keeps the pointer but no edge.
        app.handle_input(mouse(MouseAction::Up(MouseBtn::Left), 10, 10));
        app.cycle_at(0.2).unwrap();
        assert!(!app.screen.tree.widget::<Button>(button).unwrap().is_pressed());
    }

    // ── Key release synthesis ────────────────────────────────────────

    #[test]
    fn synthesized_release_stops_repeat() {
        let (mut app, field) = app_with_field(AppConfig::new());
        app.handle_input(key('a'));
        app.cycle_at(0.0).unwrap();
        app.cycle_at(1.0).unwrap();
        app.cycle_at(2.0).unwrap();
        assert_eq!(app.screen.tree.widget::<TextField>(field).unwrap().text(), "a");
    }

    #[test]
    fn without_synthesis_a_held_key_repeats() {
        let (mut app, field) = app_with_field(AppConfig::new().with_synthesized_release(false));
        app.handle_input(key('a'));
        app.cycle_at(0.0).unwrap();
        app.cycle_at(0.3).unwrap();
        assert_eq!(app.screen.tree.widget::<TextField>(field).unwrap().text(), "a");
        app.cycle_at(0.6).unwrap();
        assert_eq!(app.screen.tree.widget::<TextField>(field).unwrap().text(), "aa");
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn layout_errors_surface_from_cycle() {
        let mut app = headless_app();
        let button = app.screen.add(Button::new("x")).unwrap();
        app.screen.tree.layout_mut(button).unwrap().align_left = Some(7);
        let err = app.cycle_at(0.0).unwrap_err();
        assert!(matches!(err, AppError::Layout(LayoutError::MissingSibling { .. })));
    }

    // ── Run loop ─────────────────────────────────────────────────────

    #[test]
    fn run_returns_at_once_when_quit_was_requested() {
        let mut app = headless_app();
        app.request_quit();
        tokio_test::block_on(app.run()).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn run_stops_on_layout_error() {
        let mut app = headless_app().with_config(AppConfig::new().with_fps(1000));
        let button = app.screen.add(Button::new("x")).unwrap();
        app.screen.tree.layout_mut(button).unwrap().align_left = Some(7);
        let result = tokio_test::block_on(app.run());
        assert!(matches!(result, Err(AppError::Layout(_))));
        assert!(app.should_quit());
    }

    #[test]
    fn loop_error_survives_a_failed_restore() {
        let restore = || Err(io::Error::other("terminal gone"));
        let layout = AppError::Layout(LayoutError::Detached(WidgetId::default()));

        assert!(matches!(settle(Err(layout), restore()), Err(AppError::Layout(_))));
        assert!(matches!(settle(Ok(()), restore()), Err(AppError::Io(_))));
        assert!(settle(Ok(()), Ok(())).is_ok());
    }

    // ── AppConfig builder ────────────────────────────────────────────

    #[test]
    fn app_config_defaults() {
        let config = AppConfig::new();
        assert!(config.title.is_none());
        assert_eq!(config.fps, 60);
        assert_eq!(config.settings(), InputSettings::default());
        assert!(config.synthesize_key_release);
    }

    #[test]
    fn app_config_builder() {
        let config = AppConfig::new()
            .with_title("Planner")
            .with_fps(30)
            .with_key_repeat(0.25, 0.1)
            .with_caret_blink(0.4);
        assert_eq!(config.title, Some("Planner".into()));
        assert_eq!(config.fps, 30);
        assert_eq!(config.settings().repeat_delay, 0.25);
        assert_eq!(config.settings().repeat_interval, 0.1);
        assert_eq!(config.settings().caret_blink, 0.4);
        assert_eq!(config.period(), Duration::from_secs_f64(1.0 / 30.0));
    }
}
