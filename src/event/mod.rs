//! Event system: raw input, per-cycle frames, dispatch, key repeat.

pub mod dispatch;
pub mod frame;
pub mod input;
pub mod repeat;

pub use dispatch::{dispatch_focus, Dispatch, FloatingLayer};
pub use frame::{InputFrame, InputSettings};
pub use input::{InputEvent, Key, KeyEvent, KeyKind, Modifiers, MouseAction, MouseBtn, MouseEvent};
pub use repeat::{Blink, KeyRepeat};
