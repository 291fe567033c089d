//! Widget system: trait, pass contexts, callbacks, scrolling.

pub mod scroll;
pub mod traits;

pub use scroll::ScrollState;
pub use traits::{Callback, DrawCtx, EventCtx, FocusCtx, Widget, DEFAULT_WIDGET_SIZE};
