//! Rendering: the drawing surface abstraction, a cell grid, terminal output.

pub mod canvas;
pub mod cells;
pub mod color;
pub mod driver;

pub use canvas::{Canvas, RenderedText, TextShaper};
pub use cells::{Cell, CellCanvas, CellShaper, CellUpdate};
pub use color::Color;
pub use driver::Driver;
