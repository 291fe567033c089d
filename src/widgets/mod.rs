//! Built-in widgets: Container, Button, DropDownButton, Label, TextField, Timer.

pub mod button;
pub mod container;
pub mod dropdown;
pub mod label;
pub mod text_field;
pub mod timer;

pub use button::{Button, ButtonStyle, DrawStyle, Phase, StyleError, TextAlign, ToggleStyle};
pub use container::Container;
pub use dropdown::{DropDownButton, MenuDirection, MenuSide, MenuWidth};
pub use label::Label;
pub use text_field::{CharSet, TextField, TextFieldStyle};
pub use timer::{format_remaining, Timer, TimerError};
