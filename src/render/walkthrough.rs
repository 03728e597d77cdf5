//! Pure surface renderer for the walkthrough.
//!
//! [`render_surface`] maps a snapshot to a [`Frame`]; it keeps no state and never talks to
//! the sequencer. Layout is expressed in the same percentages the script uses for cursor
//! targets, so the pointer lands on the element it is "clicking" at any surface size.

use crate::core::text::utils::tail_to_width;
use crate::render::canvas::{Canvas, Tone};
use crate::render::frame::Frame;
use crate::render::pointer::PointerFrame;
use crate::render::theme::WalkthroughTheme;
use crate::walkthrough::snapshot::{InputTab, PresentationSnapshot, ResultTab, View};

pub const MIN_SURFACE_WIDTH: usize = 24;
pub const MIN_SURFACE_HEIGHT: usize = 10;

pub const POINTER_GLYPH: char = '◤';
pub const PRESSED_POINTER_GLYPH: char = '◉';
pub const CARET: &str = "|";

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The Generate button reacts to clicks only while the pointer is this low.
const BUTTON_ZONE_MIN_Y: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: usize,
    pub height: usize,
}

impl SurfaceSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(MIN_SURFACE_WIDTH),
            height: height.max(MIN_SURFACE_HEIGHT),
        }
    }

    /// A 4:3 surface, assuming cells twice as tall as they are wide.
    pub fn for_width(width: usize) -> Self {
        Self::new(width, width * 3 / 8)
    }

    pub fn col(&self, pct: f32) -> usize {
        scale(self.width, pct)
    }

    pub fn row(&self, pct: f32) -> usize {
        scale(self.height, pct)
    }
}

fn scale(extent: usize, pct: f32) -> usize {
    let last = extent.saturating_sub(1) as f32;
    (last * pct.clamp(0.0, 100.0) / 100.0).round() as usize
}

/// Renders one frame of the mock surface.
///
/// `tick` only animates the loading spinner.
pub fn render_surface(
    snapshot: &PresentationSnapshot,
    pointer: Option<PointerFrame>,
    size: SurfaceSize,
    tick: usize,
    theme: &WalkthroughTheme,
) -> Frame {
    let mut canvas = Canvas::new(size.width, size.height);

    match snapshot.view {
        View::Input => draw_input(&mut canvas, size, snapshot),
        View::Loading => draw_loading(&mut canvas, size, tick),
        View::Result => draw_result(&mut canvas, size, snapshot.result_tab),
        View::Finished => draw_finished(&mut canvas, size),
    }

    if snapshot.view.shows_pointer() {
        if let Some(pointer) = pointer {
            draw_pointer(&mut canvas, size, pointer);
        }
    }

    canvas.into_frame(theme)
}

fn draw_input(canvas: &mut Canvas, size: SurfaceSize, snapshot: &PresentationSnapshot) {
    let tab_row = size.row(15.0);
    for (tab, label, pct) in [
        (InputTab::Describe, "Describe", 20.0),
        (InputTab::VideoLink, "YouTube", 75.0),
    ] {
        let center = size.col(pct);
        if tab == snapshot.input_tab {
            canvas.put_centered_at(center, tab_row, label, Tone::Strong);
            let len = label.chars().count();
            let start = center.saturating_sub(len / 2).min(size.width.saturating_sub(len));
            canvas.hline(start, tab_row + 1, len, '─', Tone::Strong);
        } else {
            canvas.put_centered_at(center, tab_row, label, Tone::Muted);
        }
    }

    let top = tab_row + 2;
    let bottom = size.height - 1;
    canvas.draw_box(0, top, size.width, bottom + 1 - top, Tone::Border);

    let text_row = top + 1;
    let room = size.width.saturating_sub(5);
    let used = canvas.put_str(2, text_row, tail_to_width(&snapshot.typed_text, room), Tone::Plain);
    canvas.put_str(2 + used, text_row, CARET, Tone::Accent);

    if snapshot.typed_text.is_empty() {
        let placeholder = snapshot.input_tab.placeholder();
        canvas.put_centered(0, size.width, (top + bottom) / 2, placeholder, Tone::Muted);
    }

    let button_row = size.row(85.0).clamp(text_row + 1, bottom.saturating_sub(1));
    let pressed = snapshot.is_clicking && snapshot.cursor.y > BUTTON_ZONE_MIN_Y;
    let (inset, tone) = if pressed { (4, Tone::Pressed) } else { (2, Tone::Accent) };
    let left = inset;
    let right = size.width.saturating_sub(inset + 1);
    canvas.hline(left, button_row, right + 1 - left, ' ', tone);
    canvas.set(left, button_row, '[', tone);
    canvas.set(right, button_row, ']', tone);
    canvas.put_centered(left, right + 1 - left, button_row, "Generate", tone);
}

fn draw_loading(canvas: &mut Canvas, size: SurfaceSize, tick: usize) {
    let center_row = size.height / 2;
    let center_col = size.width / 2;
    let spinner = SPINNER_FRAMES[tick % SPINNER_FRAMES.len()];
    canvas.put_centered_at(center_col, center_row.saturating_sub(1), spinner, Tone::Accent);

    let long = size.width / 2;
    let short = size.width / 3;
    canvas.hline(center_col - long / 2, center_row + 1, long, '━', Tone::Muted);
    canvas.hline(center_col - short / 2, center_row + 2, short, '━', Tone::Muted);
}

fn draw_result(canvas: &mut Canvas, size: SurfaceSize, active: ResultTab) {
    let tab_row = size.row(15.0);
    let inner = size.width.saturating_sub(4);

    if tab_row >= 2 {
        canvas.put_str(1, 0, "●", Tone::Muted);
        canvas.hline(3, 0, inner * 3 / 4, '━', Tone::Strong);
        canvas.hline(3, 1, inner / 4, '─', Tone::Muted);
    }

    let strip = size.width - 2;
    let segment = strip / ResultTab::ALL.len();
    for (index, tab) in ResultTab::ALL.into_iter().enumerate() {
        let left = 1 + index * segment;
        if tab == active {
            let label = format!("[{}]", tab.short_label());
            canvas.put_centered(left, segment, tab_row, &label, Tone::Strong);
        } else {
            canvas.put_centered(left, segment, tab_row, tab.short_label(), Tone::Muted);
        }
    }

    let top = tab_row + 2;
    let bottom = size.height - 1;
    canvas.draw_box(0, top, size.width, bottom + 1 - top, Tone::Border);
    let area = Area {
        x: 2,
        y: top + 1,
        width: inner,
        height: bottom.saturating_sub(top + 1),
    };

    match active {
        ResultTab::Overview => draw_stat_grid(canvas, area),
        ResultTab::Ingredients => draw_checklist(canvas, area),
        ResultTab::Directions => draw_step_cards(canvas, area),
    }
}

#[derive(Debug, Clone, Copy)]
struct Area {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

fn draw_stat_grid(canvas: &mut Canvas, area: Area) {
    let card_width = area.width.saturating_sub(1) / 2;
    let card_height = area.height.saturating_sub(1) / 2;
    for row in 0..2 {
        for col in 0..2 {
            let x = area.x + col * (card_width + 1);
            let y = area.y + row * (card_height + 1);
            if card_height >= 3 {
                canvas.draw_box(x, y, card_width, card_height, Tone::Muted);
                let fill = card_width.saturating_sub(4);
                if card_height >= 4 {
                    canvas.hline(x + 2, y + 1, fill.min(4), '─', Tone::Muted);
                }
                canvas.hline(x + 2, y + card_height - 2, fill.min(8), '▆', Tone::Strong);
            } else {
                canvas.hline(x, y, card_width.min(8), '▆', Tone::Strong);
            }
        }
    }
}

fn draw_checklist(canvas: &mut Canvas, area: Area) {
    for item in 0..4.min(area.height) {
        let y = area.y + item;
        canvas.put_str(area.x, y, "○", Tone::Muted);
        canvas.hline(area.x + 2, y, area.width.saturating_sub(2), '━', Tone::Muted);
    }
}

fn draw_step_cards(canvas: &mut Canvas, area: Area) {
    let card_height = (area.height.saturating_sub(1) / 2).min(5);
    for card in 0..2 {
        let y = area.y + card * (card_height + 1);
        if card_height >= 3 {
            canvas.draw_box(area.x, y, area.width, card_height, Tone::Muted);
            let body = area.width.saturating_sub(4);
            canvas.hline(area.x + 2, y + 1, 3.min(body), '━', Tone::Strong);
            if card_height >= 4 {
                canvas.hline(area.x + 2, y + 2, body, '─', Tone::Muted);
            }
            if card_height >= 5 {
                canvas.hline(area.x + 2, y + 3, body * 4 / 5, '─', Tone::Muted);
            }
        } else {
            canvas.hline(area.x, y, 3, '━', Tone::Strong);
        }
    }
}

fn draw_finished(canvas: &mut Canvas, size: SurfaceSize) {
    let center = size.width / 2;
    let mid = size.height / 2;
    let badge_top = mid.saturating_sub(3);
    canvas.put_centered_at(center, badge_top, "╭───╮", Tone::Strong);
    canvas.put_centered_at(center, badge_top + 1, "│ ✓ │", Tone::Strong);
    canvas.put_centered_at(center, badge_top + 2, "╰───╯", Tone::Strong);
    canvas.put_centered_at(center, mid + 1, "That's all!", Tone::Strong);
    canvas.put_centered_at(center, mid + 2, "Let's get started", Tone::Muted);
}

fn draw_pointer(canvas: &mut Canvas, size: SurfaceSize, pointer: PointerFrame) {
    let (glyph, tone) = if pointer.pressed {
        (PRESSED_POINTER_GLYPH, Tone::Pressed)
    } else {
        (POINTER_GLYPH, Tone::Accent)
    };
    canvas.set(size.col(pointer.x), size.row(pointer.y), glyph, tone);
}
