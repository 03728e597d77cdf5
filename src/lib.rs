//! Deterministic scripted walkthrough for a cooking assistant's tutorial modal.
//!
//! Invariant: only the [`Sequencer`] writes the [`PresentationSnapshot`]; rendering reads it.
//!
//! # Public API Overview
//! - Drive the script with a [`Sequencer`] on any [`Clock`]; share it through a
//!   [`SequencerHandle`] and advance it in real time with a [`WalkthroughDriver`].
//! - Render a snapshot with [`render_surface`], or host the whole thing as the
//!   [`TutorialModal`] component.
//! - Use text and width helpers for ANSI-safe formatting.

pub mod config;
pub mod logging;

pub mod core;
pub mod render;
pub mod walkthrough;
pub mod widgets;

/// Environment configuration and file logging.
pub use crate::config::EnvConfig;
pub use crate::logging::{init_file_logging, LoggingError};

/// Time sources.
pub use crate::core::clock::{Clock, ManualClock, SystemClock};

/// Component contract and input handling.
pub use crate::core::component::Component;
pub use crate::core::input_event::{parse_input_events, InputEvent};
pub use crate::core::keybindings::{
    DismissAction, DismissKeybindings, DismissKeybindingsConfig, KeyBinding, KeyId,
    DEFAULT_DISMISS_KEYBINDINGS,
};

/// Walkthrough model, script, and sequencing.
pub use crate::walkthrough::{
    cooking_walkthrough, CursorPosition, InputTab, Mutation, PollOutcome, PresentationSnapshot,
    RenderRequester, ResultTab, Reveal, Script, ScriptError, Sequencer, SequencerHandle, View,
    WalkthroughDriver, WalkthroughStep, CURSOR_MAX,
};

/// Render-layer types.
pub use crate::render::{
    render_surface, Canvas, Frame, Line, PointerEasing, PointerFrame, Span, SurfaceSize, Tone,
    WalkthroughTheme,
};

/// Built-in widgets.
pub use crate::widgets::{DismissHandler, TutorialModal};

/// ANSI-aware truncation helper.
pub use crate::core::text::utils::truncate_to_width;
/// Visible width helper that ignores ANSI control sequences.
pub use crate::core::text::width::visible_width;
