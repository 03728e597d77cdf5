//! Built-in widgets.

pub mod tutorial_modal;

pub use tutorial_modal::{DismissHandler, TutorialModal};
