//! Raw input events, decoupled from crossterm.
//!
//! [`InputEvent`] is what the app loop receives. Crossterm events convert via
//! `From`, so nothing past [`App`](crate::app::App) depends on crossterm. The
//! per-cycle summary widgets actually see is [`InputFrame`](super::frame::InputFrame).

use std::ops::BitOr;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    /// Anything the engine has no use for.
    Other,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Whether all bits of `other` are set.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// Key-down or key-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyKind {
    #[default]
    Press,
    Release,
}

/// A keyboard transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
    pub kind: KeyKind,
}

impl KeyEvent {
    /// A key-down event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers, kind: KeyKind::Press }
    }

    /// A key-up event.
    pub fn release(code: Key) -> Self {
        Self { code, modifiers: Modifiers::NONE, kind: KeyKind::Release }
    }

    pub fn is_press(&self) -> bool {
        self.kind == KeyKind::Press
    }
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

/// Mouse action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    Drag(MouseBtn),
    Moved,
    ScrollUp,
    ScrollDown,
}

/// A mouse event at a surface position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Top-level input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    FocusGained,
    FocusLost,
    Paste(String),
}

// ---------------------------------------------------------------------------
// From<crossterm> conversions
// ---------------------------------------------------------------------------

fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    use crossterm::event::KeyModifiers as Ct;
    let mut out = Modifiers::NONE;
    if m.contains(Ct::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(Ct::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(Ct::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(ct: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::{KeyCode, KeyEventKind};
        let code = match ct.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => Key::Other,
        };
        // Terminal auto-repeat arrives as `Repeat`; the engine runs its own.
        let kind = match ct.kind {
            KeyEventKind::Release => KeyKind::Release,
            KeyEventKind::Press | KeyEventKind::Repeat => KeyKind::Press,
        };
        KeyEvent { code, modifiers: convert_modifiers(ct.modifiers), kind }
    }
}

fn convert_mouse_button(b: crossterm::event::MouseButton) -> MouseBtn {
    match b {
        crossterm::event::MouseButton::Left => MouseBtn::Left,
        crossterm::event::MouseButton::Right => MouseBtn::Right,
        crossterm::event::MouseButton::Middle => MouseBtn::Middle,
    }
}

impl From<crossterm::event::Event> for InputEvent {
    fn from(ct: crossterm::event::Event) -> Self {
        use crossterm::event::{Event, MouseEventKind};
        match ct {
            Event::Key(ke) => InputEvent::Key(KeyEvent::from(ke)),
            Event::Mouse(me) => {
                let kind = match me.kind {
                    MouseEventKind::Down(b) => MouseAction::Down(convert_mouse_button(b)),
                    MouseEventKind::Up(b) => MouseAction::Up(convert_mouse_button(b)),
                    MouseEventKind::Drag(b) => MouseAction::Drag(convert_mouse_button(b)),
                    MouseEventKind::ScrollUp => MouseAction::ScrollUp,
                    MouseEventKind::ScrollDown => MouseAction::ScrollDown,
                    // Horizontal wheels only move the pointer.
                    MouseEventKind::Moved
                    | MouseEventKind::ScrollLeft
                    | MouseEventKind::ScrollRight => MouseAction::Moved,
                };
                InputEvent::Mouse(MouseEvent {
                    kind,
                    x: me.column,
                    y: me.row,
                    modifiers: convert_modifiers(me.modifiers),
                })
            }
            Event::Resize(width, height) => InputEvent::Resize { width, height },
            Event::FocusGained => InputEvent::FocusGained,
            Event::FocusLost => InputEvent::FocusLost,
            Event::Paste(s) => InputEvent::Paste(s),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
