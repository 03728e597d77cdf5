//! Static walkthrough script: ordered, timed mutation-and-hold entries.
//!
//! A [`Script`] is validated once when it is built, so the sequencer can apply entries
//! without re-checking presentation values at every mutation.

use std::time::Duration;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::walkthrough::snapshot::{
    CursorPosition, InputTab, PresentationSnapshot, ResultTab, View,
};

/// A single field assignment applied to the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Input view, Describe tab, empty text, Overview result tab.
    Reset,
    Label(&'static str),
    MoveCursor(CursorPosition),
    Press,
    Release,
    /// Switches the input tab and clears the typed text.
    SwitchInputTab(InputTab),
    ShowView(View),
    SelectResultTab(ResultTab),
}

impl Mutation {
    pub fn apply(self, snapshot: &mut PresentationSnapshot) {
        match self {
            Mutation::Reset => {
                snapshot.view = View::Input;
                snapshot.input_tab = InputTab::Describe;
                snapshot.typed_text.clear();
                snapshot.result_tab = ResultTab::Overview;
            }
            Mutation::Label(label) => {
                snapshot.step_label.clear();
                snapshot.step_label.push_str(label);
            }
            Mutation::MoveCursor(position) => snapshot.cursor = position,
            Mutation::Press => snapshot.is_clicking = true,
            Mutation::Release => snapshot.is_clicking = false,
            Mutation::SwitchInputTab(tab) => {
                snapshot.input_tab = tab;
                snapshot.typed_text.clear();
            }
            Mutation::ShowView(view) => snapshot.view = view,
            Mutation::SelectResultTab(tab) => snapshot.result_tab = tab,
        }
    }
}

/// Progressive character reveal into `typed_text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub text: &'static str,
    pub per_char: Duration,
}

impl Reveal {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// The first `chars` characters of the source text.
    pub fn prefix(&self, chars: usize) -> &'static str {
        let end = self
            .text
            .char_indices()
            .nth(chars)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }

    /// Empty prefix, one write per character, then one trailing delay.
    pub fn duration(&self) -> Duration {
        self.per_char * (self.char_count() as u32 + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkthroughStep {
    pub mutations: Vec<Mutation>,
    pub reveal: Option<Reveal>,
    pub hold: Duration,
}

impl WalkthroughStep {
    pub fn hold_ms(ms: u64) -> Self {
        Self {
            mutations: Vec::new(),
            reveal: None,
            hold: Duration::from_millis(ms),
        }
    }

    pub fn reveal(text: &'static str, per_char_ms: u64, hold_ms: u64) -> Self {
        Self {
            mutations: Vec::new(),
            reveal: Some(Reveal {
                text,
                per_char: Duration::from_millis(per_char_ms),
            }),
            hold: Duration::from_millis(hold_ms),
        }
    }

    pub fn with(mut self, mutation: Mutation) -> Self {
        self.mutations.push(mutation);
        self
    }

    pub fn duration(&self) -> Duration {
        self.hold + self.reveal.map(|reveal| reveal.duration()).unwrap_or_default()
    }

    pub fn label(&self) -> Option<&'static str> {
        self.mutations.iter().find_map(|mutation| match mutation {
            Mutation::Label(label) => Some(*label),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("walkthrough script has no steps")]
    Empty,
    #[error("step {index}: the first step must reset the snapshot")]
    MissingReset { index: usize },
    #[error("step {index}: cursor {position} is outside 0..=100")]
    CursorOutOfRange {
        index: usize,
        position: CursorPosition,
    },
    #[error("step {index}: hold must be longer than zero")]
    ZeroHold { index: usize },
    #[error("step {index}: reveal text is empty")]
    EmptyReveal { index: usize },
    #[error("step {index}: reveal delay must be longer than zero")]
    ZeroRevealDelay { index: usize },
    #[error("step {index}: click pressed here is not released by the next step")]
    ClickNotReleased { index: usize },
    #[error("step {index}: view {to:?} cannot follow {from:?}")]
    ViewOutOfOrder { index: usize, from: View, to: View },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    steps: Vec<WalkthroughStep>,
}

impl Script {
    pub fn new(steps: Vec<WalkthroughStep>) -> Result<Self, ScriptError> {
        validate(&steps)?;
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[WalkthroughStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total time of one loop iteration.
    pub fn loop_duration(&self) -> Duration {
        self.steps.iter().map(WalkthroughStep::duration).sum()
    }

    /// Copy of the script played `speed` times faster. Durations never drop below 1 ms, so
    /// the result stays valid.
    pub fn scaled(&self, speed: f64) -> Script {
        let scale = |duration: Duration| {
            if speed.is_finite() && speed > 0.0 {
                let nanos = (duration.as_nanos() as f64 / speed).round() as u64;
                Duration::from_nanos(nanos).max(Duration::from_millis(1))
            } else {
                duration
            }
        };
        let steps = self
            .steps
            .iter()
            .map(|step| WalkthroughStep {
                mutations: step.mutations.clone(),
                reveal: step.reveal.map(|reveal| Reveal {
                    per_char: scale(reveal.per_char),
                    ..reveal
                }),
                hold: scale(step.hold),
            })
            .collect();
        Script { steps }
    }
}

fn validate(steps: &[WalkthroughStep]) -> Result<(), ScriptError> {
    let Some(first) = steps.first() else {
        return Err(ScriptError::Empty);
    };
    if !first.mutations.contains(&Mutation::Reset) {
        return Err(ScriptError::MissingReset { index: 0 });
    }

    let mut view = View::Input;
    let mut pressed_at: Option<usize> = None;

    for (index, step) in steps.iter().enumerate() {
        if step.hold.is_zero() {
            return Err(ScriptError::ZeroHold { index });
        }
        if let Some(reveal) = step.reveal {
            if reveal.text.is_empty() {
                return Err(ScriptError::EmptyReveal { index });
            }
            if reveal.per_char.is_zero() {
                return Err(ScriptError::ZeroRevealDelay { index });
            }
        }

        let mut releases = false;
        let mut presses = false;
        for mutation in &step.mutations {
            match *mutation {
                Mutation::MoveCursor(position) if !position.in_bounds() => {
                    return Err(ScriptError::CursorOutOfRange { index, position });
                }
                Mutation::Reset => {
                    if !matches!(view, View::Input | View::Finished) {
                        return Err(ScriptError::ViewOutOfOrder {
                            index,
                            from: view,
                            to: View::Input,
                        });
                    }
                    view = View::Input;
                }
                Mutation::ShowView(to) => {
                    if to != view.next() {
                        return Err(ScriptError::ViewOutOfOrder {
                            index,
                            from: view,
                            to,
                        });
                    }
                    view = to;
                }
                Mutation::Press => presses = true,
                Mutation::Release => releases = true,
                _ => {}
            }
        }

        if let Some(pressed) = pressed_at {
            if !releases {
                return Err(ScriptError::ClickNotReleased { index: pressed });
            }
            pressed_at = None;
        }
        if presses && !releases {
            pressed_at = Some(index);
        }
    }

    if let Some(pressed) = pressed_at {
        return Err(ScriptError::ClickNotReleased { index: pressed });
    }
    if !matches!(view, View::Input | View::Finished) {
        return Err(ScriptError::ViewOutOfOrder {
            index: steps.len() - 1,
            from: view,
            to: View::Input,
        });
    }
    Ok(())
}

pub const DESCRIBE_TEXT: &str = "Chicken, Rice, Peppers";
pub const VIDEO_LINK_TEXT: &str = "youtube.com/watch?v=...";

const DESCRIBE_TAB: CursorPosition = CursorPosition::new(20, 15);
const VIDEO_LINK_TAB: CursorPosition = CursorPosition::new(75, 15);
const TEXT_ENTRY: CursorPosition = CursorPosition::new(50, 40);
const GENERATE_BUTTON: CursorPosition = CursorPosition::new(50, 85);
const CENTER: CursorPosition = CursorPosition::new(50, 50);
const INGREDIENTS_TAB: CursorPosition = CursorPosition::new(50, 15);
const DIRECTIONS_TAB: CursorPosition = CursorPosition::new(80, 15);
const READING_AREA: CursorPosition = CursorPosition::new(80, 80);

fn cooking_steps() -> Vec<WalkthroughStep> {
    use Mutation::*;

    vec![
        // Describe
        WalkthroughStep::hold_ms(1000)
            .with(Reset)
            .with(Label("1. Describe what you want"))
            .with(MoveCursor(DESCRIBE_TAB)),
        WalkthroughStep::hold_ms(800).with(MoveCursor(TEXT_ENTRY)),
        WalkthroughStep::reveal(DESCRIBE_TEXT, 50, 800),
        // Video link
        WalkthroughStep::hold_ms(800)
            .with(Label("2. Or use a YouTube link"))
            .with(MoveCursor(VIDEO_LINK_TAB)),
        WalkthroughStep::hold_ms(200)
            .with(Press)
            .with(SwitchInputTab(InputTab::VideoLink)),
        WalkthroughStep::hold_ms(500).with(Release),
        WalkthroughStep::hold_ms(800).with(MoveCursor(TEXT_ENTRY)),
        WalkthroughStep::reveal(VIDEO_LINK_TEXT, 30, 500),
        // Generate
        WalkthroughStep::hold_ms(800)
            .with(Label("3. Generate Recipe"))
            .with(MoveCursor(GENERATE_BUTTON)),
        WalkthroughStep::hold_ms(200).with(Press),
        WalkthroughStep::hold_ms(2000)
            .with(Release)
            .with(ShowView(View::Loading))
            .with(Label("Creating your recipe...")),
        // Overview
        WalkthroughStep::hold_ms(1500)
            .with(ShowView(View::Result))
            .with(SelectResultTab(ResultTab::Overview))
            .with(Label("4. View Recipe Card"))
            .with(MoveCursor(CENTER)),
        // Ingredients
        WalkthroughStep::hold_ms(1000)
            .with(Label("5. Check Ingredients"))
            .with(MoveCursor(INGREDIENTS_TAB)),
        WalkthroughStep::hold_ms(200)
            .with(Press)
            .with(SelectResultTab(ResultTab::Ingredients)),
        WalkthroughStep::hold_ms(1500).with(Release),
        // Directions
        WalkthroughStep::hold_ms(1000)
            .with(Label("6. Follow Directions"))
            .with(MoveCursor(DIRECTIONS_TAB)),
        WalkthroughStep::hold_ms(200)
            .with(Press)
            .with(SelectResultTab(ResultTab::Directions)),
        WalkthroughStep::hold_ms(1000).with(Release),
        WalkthroughStep::hold_ms(1000).with(MoveCursor(READING_AREA)),
        // Finished
        WalkthroughStep::hold_ms(2500)
            .with(ShowView(View::Finished))
            .with(Label("7. You are ready!")),
        WalkthroughStep::hold_ms(500),
    ]
}

static COOKING_WALKTHROUGH: Lazy<Script> = Lazy::new(|| {
    Script::new(cooking_steps()).unwrap_or_else(|err| panic!("built-in walkthrough is invalid: {err}"))
});

/// The built-in describe → generate → review walkthrough.
pub fn cooking_walkthrough() -> &'static Script {
    &COOKING_WALKTHROUGH
}
