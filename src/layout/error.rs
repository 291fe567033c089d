//! Layout configuration errors.
//!
//! Every variant describes a mistake in how widgets were wired together.
//! They are reported where the mistake is detected and never papered over
//! with a default position.

use crate::tree::WidgetId;

/// A misconfigured layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("size fraction must be a positive finite number, got {0}")]
    InvalidFraction(f32),
    #[error("unknown gravity keyword `{word}`")]
    UnknownGravity { word: String },
    #[error("widget {widget:?} anchors to sibling index {index}, but its parent has {len} children")]
    MissingSibling {
        widget: WidgetId,
        index: usize,
        len: usize,
    },
    #[error("widget {0:?} anchors to itself")]
    SelfAnchor(WidgetId),
    #[error("anchor cycle through widget {0:?}")]
    AnchorCycle(WidgetId),
    #[error("widget {0:?} uses relative layout but has no parent")]
    Detached(WidgetId),
    #[error("widget {0:?} does not exist")]
    UnknownWidget(WidgetId),
}
