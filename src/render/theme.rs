//! Tone styling for the walkthrough surface and modal chrome.

use crate::render::canvas::Tone;

pub type ToneFn = Box<dyn Fn(&str) -> String>;

pub struct WalkthroughTheme {
    pub muted: ToneFn,
    pub strong: ToneFn,
    pub accent: ToneFn,
    pub pressed: ToneFn,
    pub border: ToneFn,
}

impl WalkthroughTheme {
    /// Theme that emits no escape codes.
    pub fn plain() -> Self {
        Self {
            muted: Box::new(|text| text.to_string()),
            strong: Box::new(|text| text.to_string()),
            accent: Box::new(|text| text.to_string()),
            pressed: Box::new(|text| text.to_string()),
            border: Box::new(|text| text.to_string()),
        }
    }

    pub fn ansi() -> Self {
        Self {
            muted: Box::new(|text| format!("\x1b[2m{text}\x1b[0m")),
            strong: Box::new(|text| format!("\x1b[1m{text}\x1b[0m")),
            accent: Box::new(|text| format!("\x1b[1;33m{text}\x1b[0m")),
            pressed: Box::new(|text| format!("\x1b[7m{text}\x1b[0m")),
            border: Box::new(|text| format!("\x1b[90m{text}\x1b[0m")),
        }
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        match tone {
            Tone::Plain => text.to_string(),
            Tone::Muted => (self.muted)(text),
            Tone::Strong => (self.strong)(text),
            Tone::Accent => (self.accent)(text),
            Tone::Pressed => (self.pressed)(text),
            Tone::Border => (self.border)(text),
        }
    }
}

impl Default for WalkthroughTheme {
    fn default() -> Self {
        Self::ansi()
    }
}
