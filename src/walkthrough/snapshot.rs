//! Presentation snapshot: everything the renderer needs to draw one frame.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Input,
    Loading,
    Result,
    Finished,
}

impl View {
    /// The only view allowed to follow `self`.
    pub fn next(self) -> View {
        match self {
            View::Input => View::Loading,
            View::Loading => View::Result,
            View::Result => View::Finished,
            View::Finished => View::Input,
        }
    }

    /// Whether the pointer overlay is drawn for this view.
    pub fn shows_pointer(self) -> bool {
        matches!(self, View::Input | View::Result)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputTab {
    Describe,
    VideoLink,
}

impl InputTab {
    pub fn placeholder(self) -> &'static str {
        match self {
            InputTab::Describe => "What are you craving?",
            InputTab::VideoLink => "Paste video link...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultTab {
    Overview,
    Ingredients,
    Directions,
}

impl ResultTab {
    pub const ALL: [ResultTab; 3] = [
        ResultTab::Overview,
        ResultTab::Ingredients,
        ResultTab::Directions,
    ];

    pub fn short_label(self) -> &'static str {
        match self {
            ResultTab::Overview => "Info",
            ResultTab::Ingredients => "Ingr",
            ResultTab::Directions => "Prep",
        }
    }
}

/// Largest legal cursor coordinate.
pub const CURSOR_MAX: u8 = 100;

/// Simulated pointer location as percentages of the mock surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CursorPosition {
    pub x: u8,
    pub y: u8,
}

impl CursorPosition {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        self.x <= CURSOR_MAX && self.y <= CURSOR_MAX
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}%, {}%)", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationSnapshot {
    pub view: View,
    pub input_tab: InputTab,
    pub typed_text: String,
    pub result_tab: ResultTab,
    pub cursor: CursorPosition,
    pub is_clicking: bool,
    pub step_label: String,
}

impl PresentationSnapshot {
    pub fn initial() -> Self {
        Self {
            view: View::Input,
            input_tab: InputTab::Describe,
            typed_text: String::new(),
            result_tab: ResultTab::Overview,
            cursor: CursorPosition::default(),
            is_clicking: false,
            step_label: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), CursorPosition> {
        if self.cursor.in_bounds() {
            Ok(())
        } else {
            Err(self.cursor)
        }
    }
}

impl Default for PresentationSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}
