//! Core interfaces and types.

pub mod clock;
pub mod component;
pub mod input_event;
pub mod keybindings;
pub mod text;
