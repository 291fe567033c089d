//! Widget arena: slotmap-backed nodes with parent/child relations by handle.

pub mod node;
#[allow(clippy::module_inception)]
pub mod tree;

pub use node::{Node, WidgetId};
pub use tree::{TreeError, WidgetTree};
