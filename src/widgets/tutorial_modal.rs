//! Tutorial modal widget.
//!
//! Hosts the walkthrough surface inside modal chrome. The host drives it with
//! [`TutorialModal::set_active`] and hears back through the dismiss callback; nothing else
//! crosses the boundary.

use tracing::{debug, warn};

use crate::core::component::Component;
use crate::core::input_event::InputEvent;
use crate::core::keybindings::{DismissAction, DismissKeybindings};
use crate::core::text::utils::{center_in_width, pad_to_width, truncate_to_width};
use crate::core::text::width::visible_width;
use crate::render::canvas::Tone;
use crate::render::pointer::PointerEasing;
use crate::render::theme::WalkthroughTheme;
use crate::render::walkthrough::{render_surface, SurfaceSize};
use crate::walkthrough::driver::{RenderRequester, WalkthroughDriver};
use crate::walkthrough::sequencer::SequencerHandle;

pub const TITLE: &str = "Quick Tutorial";
pub const CONFIRM_LABEL: &str = "[ Got it, let's cook! ]";
pub const KEY_HINT: &str = "esc close · q dismiss · enter confirm";

/// Border plus one cell of padding on each side.
const CHROME_WIDTH: usize = 4;

pub type DismissHandler = Box<dyn FnMut(DismissAction)>;

pub struct TutorialModal {
    sequencer: SequencerHandle,
    driver: Option<WalkthroughDriver>,
    theme: WalkthroughTheme,
    keybindings: DismissKeybindings,
    easing: PointerEasing,
    hide_pointer: bool,
    active: bool,
    tick: usize,
    on_dismiss: Option<DismissHandler>,
}

impl TutorialModal {
    /// A modal the host advances by polling the sequencer itself.
    pub fn new(sequencer: SequencerHandle, theme: WalkthroughTheme) -> Self {
        Self {
            sequencer,
            driver: None,
            theme,
            keybindings: DismissKeybindings::default(),
            easing: PointerEasing::new(),
            hide_pointer: false,
            active: false,
            tick: 0,
            on_dismiss: None,
        }
    }

    /// Adds a background driver that advances the walkthrough in real time while active.
    pub fn with_driver(mut self, render_requester: Option<RenderRequester>) -> Self {
        self.driver = Some(WalkthroughDriver::new(
            self.sequencer.clone(),
            render_requester,
        ));
        self
    }

    pub fn with_keybindings(mut self, keybindings: DismissKeybindings) -> Self {
        self.keybindings = keybindings;
        self
    }

    pub fn set_on_dismiss(&mut self, handler: Option<DismissHandler>) {
        self.on_dismiss = handler;
    }

    pub fn set_hide_pointer(&mut self, hide: bool) {
        self.hide_pointer = hide;
    }

    pub fn sequencer(&self) -> &SequencerHandle {
        &self.sequencer
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Host visibility signal. Only edges act: false→true restarts the walkthrough from
    /// its first step, true→false cancels it.
    pub fn set_active(&mut self, active: bool) {
        if active == self.active {
            return;
        }
        self.active = active;
        if active {
            self.easing.reset();
            self.tick = 0;
            self.sequencer.activate();
            if let Some(driver) = self.driver.as_mut() {
                if let Err(err) = driver.start() {
                    warn!(error = %err, "walkthrough driver could not spawn; the walkthrough only advances when polled");
                }
            }
            debug!("tutorial modal opened");
        } else {
            self.sequencer.deactivate();
            if let Some(driver) = self.driver.as_mut() {
                driver.stop();
            }
            debug!("tutorial modal closed");
        }
    }

    /// Reports a dismiss request to the host. Returns `false` when the modal is inactive.
    pub fn dismiss(&mut self, action: DismissAction) -> bool {
        if !self.active {
            return false;
        }
        debug!(?action, "tutorial modal dismiss requested");
        if let Some(handler) = self.on_dismiss.as_mut() {
            handler(action);
        }
        true
    }

    fn framed(&self, content: &str, width: usize) -> String {
        let inner = width.saturating_sub(CHROME_WIDTH);
        let content = pad_to_width(&truncate_to_width(content, inner, ""), inner);
        let side = self.theme.paint(Tone::Border, "│");
        format!("{side} {content} {side}")
    }

    fn top_border(&self, width: usize) -> String {
        let title = format!(" {TITLE} ");
        let title_width = visible_width(&title);
        if width < title_width + CHROME_WIDTH {
            let rule = "─".repeat(width.saturating_sub(2));
            return self.theme.paint(Tone::Border, &format!("╭{rule}╮"));
        }
        let rule = "─".repeat(width - title_width - 3);
        format!(
            "{}{}{}",
            self.theme.paint(Tone::Border, "╭─"),
            self.theme.paint(Tone::Strong, &title),
            self.theme.paint(Tone::Border, &format!("{rule}╮")),
        )
    }

    fn bottom_border(&self, width: usize) -> String {
        let rule = "─".repeat(width.saturating_sub(2));
        self.theme.paint(Tone::Border, &format!("╰{rule}╯"))
    }
}

impl Component for TutorialModal {
    fn render(&mut self, width: usize) -> Vec<String> {
        if !self.active || width < CHROME_WIDTH {
            return Vec::new();
        }

        let snapshot = self.sequencer.snapshot();
        let pointer = if self.hide_pointer {
            None
        } else {
            Some(self.easing.step(snapshot.cursor, snapshot.is_clicking))
        };
        let inner = width - CHROME_WIDTH;
        let surface = render_surface(
            &snapshot,
            pointer,
            SurfaceSize::for_width(inner),
            self.tick,
            &self.theme,
        );
        self.tick = self.tick.wrapping_add(1);

        let mut lines = vec![self.top_border(width)];
        let label = self.theme.paint(Tone::Accent, &snapshot.step_label);
        lines.push(self.framed(&label, width));
        lines.push(self.framed("", width));
        for line in surface.into_strings() {
            lines.push(self.framed(&line, width));
        }
        lines.push(self.framed("", width));
        let confirm = center_in_width(&self.theme.paint(Tone::Accent, CONFIRM_LABEL), inner);
        lines.push(self.framed(&confirm, width));
        lines.push(self.bottom_border(width));

        let hint = truncate_to_width(KEY_HINT, width, "");
        lines.push(pad_to_width(
            &center_in_width(&self.theme.paint(Tone::Muted, &hint), width),
            width,
        ));
        lines
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if !self.active {
            return;
        }
        let action = match event {
            InputEvent::Key { key_id, .. } => self.keybindings.action_for(key_id),
            // Grouped text is matched key by key; the first bound key wins.
            InputEvent::Text { text, .. } => {
                let mut buf = [0; 4];
                text.chars()
                    .find_map(|ch| self.keybindings.action_for(ch.encode_utf8(&mut buf)))
            }
            _ => None,
        };
        if let Some(action) = action {
            self.dismiss(action);
        }
    }

    fn invalidate(&mut self) {
        self.easing.reset();
    }
}

impl Drop for TutorialModal {
    fn drop(&mut self) {
        self.set_active(false);
    }
}
