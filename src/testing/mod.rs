//! Headless testing framework: Pilot, a hand-driven clock, grid snapshots.
//!
//! Use the [`Pilot`] to drive an [`App`](crate::app::App) without a real
//! terminal, with time advanced only when the test says so. Use
//! [`canvas_to_string`] and [`paint_map`] to turn a drawn [`CellCanvas`]
//! into plain text for snapshot-style assertions.
//!
//! [`CellCanvas`]: crate::render::cells::CellCanvas

pub mod clock;
pub mod pilot;
pub mod snapshot;

pub use clock::ManualClock;
pub use pilot::Pilot;
pub use snapshot::{canvas_to_string, paint_map, render_to_string};
