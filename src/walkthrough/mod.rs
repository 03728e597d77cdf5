//! The scripted walkthrough: snapshot model, script table, sequencer, and real-time driver.

pub mod driver;
pub mod script;
pub mod sequencer;
pub mod snapshot;

pub use driver::{RenderRequester, WalkthroughDriver};
pub use script::{
    cooking_walkthrough, Mutation, Reveal, Script, ScriptError, WalkthroughStep, DESCRIBE_TEXT,
    VIDEO_LINK_TEXT,
};
pub use sequencer::{PollOutcome, Sequencer, SequencerHandle};
pub use snapshot::{CursorPosition, InputTab, PresentationSnapshot, ResultTab, View, CURSOR_MAX};
