//! # planboard
//!
//! A retained-mode widget engine for a task and calendar planner.
//!
//! Widgets live in a slotmap-backed tree and are placed by relative layout
//! rules (gravity, sibling anchors, match-parent with fractions). Every cycle
//! the screen hands one [`InputFrame`](event::InputFrame) to the widgets
//! topmost-first, and the first widget to act on the pointer claims it for the
//! rest of the cycle. Drop-down menus and other floating widgets are drawn
//! last and offered input first.
//!
//! ## Core Systems
//!
//! - **[`geometry`]**: Offset, Size, Region, Spacing primitives
//! - **[`layout`]**: layout rules, gravity keywords (logos), the resolver
//! - **[`tree`]**: widget arena with parent/child relations
//! - **[`widget`]**: Widget trait, pass contexts, callbacks, scroll state
//! - **[`widgets`]**: Container, Button, DropDownButton, Label, TextField, Timer
//! - **[`event`]**: raw input, per-cycle frames, dispatch, key repeat and blink
//! - **[`render`]**: Canvas and TextShaper seams, cell grid, crossterm driver
//! - **[`screen`]**: the root container and the three passes of a cycle
//! - **[`app`]**: configuration and the fixed-rate loop
//! - **[`clock`]**: the time source read once per cycle
//! - **[`testing`]**: headless Pilot, manual clock, grid snapshots

// Foundation
pub mod clock;
pub mod geometry;

// Core systems
pub mod layout;
pub mod tree;

// Widget system
pub mod widget;
pub mod widgets;

// Events
pub mod event;

// Rendering
pub mod render;

// Application
pub mod app;
pub mod screen;

// Headless harness
pub mod testing;
