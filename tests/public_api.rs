#![allow(unused_imports)]

use mise_walkthrough::{
    cooking_walkthrough, init_file_logging, parse_input_events, render_surface,
    truncate_to_width, visible_width, Canvas, Clock, Component, CursorPosition, DismissAction,
    DismissHandler, DismissKeybindings, DismissKeybindingsConfig, EnvConfig, Frame, InputEvent,
    InputTab, KeyBinding, KeyId, Line, LoggingError, ManualClock, Mutation, PointerEasing,
    PointerFrame, PollOutcome, PresentationSnapshot, RenderRequester, ResultTab, Reveal, Script,
    ScriptError, Sequencer, SequencerHandle, Span, SurfaceSize, SystemClock, Tone, TutorialModal,
    View, WalkthroughDriver, WalkthroughStep, WalkthroughTheme, CURSOR_MAX,
    DEFAULT_DISMISS_KEYBINDINGS,
};

#[test]
fn public_api_exports_compile() {}

#[test]
fn sequencer_handle_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SequencerHandle>();
    assert_send_sync::<ManualClock>();
}
