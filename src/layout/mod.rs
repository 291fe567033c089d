//! Relative layout: per-widget rules, gravity keywords, and the resolver.

pub mod error;
pub mod gravity;
pub mod resolve;
pub mod spec;

pub use error::LayoutError;
pub use gravity::Gravity;
pub use resolve::LayoutPass;
pub use spec::{LayoutMode, LayoutSpec, SizeMode};
