//! Fixed-size cell grid the surface renderer draws into.
//!
//! Drawing is clipped to the grid. Each cell carries a [`Tone`]; serialising a row groups
//! equal tones into one span so a theme wraps each run exactly once.

use unicode_segmentation::UnicodeSegmentation;

use crate::core::text::width::{grapheme_width, visible_width};
use crate::render::frame::{Frame, Line, Span};
use crate::render::theme::WalkthroughTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Muted,
    Strong,
    Accent,
    Pressed,
    Border,
}

/// What a cell shows: one grapheme, or the trailing half of a wide one.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Glyph {
    Char(char),
    Cluster(Box<str>),
    Continuation,
}

impl Glyph {
    fn from_grapheme(grapheme: &str) -> Self {
        let mut chars = grapheme.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Glyph::Char(ch),
            _ => Glyph::Cluster(grapheme.into()),
        }
    }

    /// Attaches a zero-width mark to this cell's grapheme.
    fn attach(&mut self, mark: &str) {
        let mut cluster = String::new();
        self.push_to(&mut cluster);
        cluster.push_str(mark);
        *self = Glyph::Cluster(cluster.into_boxed_str());
    }

    fn push_to(&self, out: &mut String) {
        match self {
            Glyph::Char(ch) => out.push(*ch),
            Glyph::Cluster(cluster) => out.push_str(cluster),
            Glyph::Continuation => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    glyph: Glyph,
    tone: Tone,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Char(' '),
    tone: Tone::Plain,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char, tone: Tone) {
        if x < self.width && y < self.height {
            self.clear_glyph_at(x, y);
            self.cells[y * self.width + x] = Cell {
                glyph: Glyph::Char(ch),
                tone,
            };
        }
    }

    /// Blanks every cell of the glyph covering `(x, y)` so a partial overwrite
    /// never leaves half of a wide glyph behind.
    fn clear_glyph_at(&mut self, x: usize, y: usize) {
        let row = y * self.width;
        let mut start = x;
        while start > 0 && self.cells[row + start].glyph == Glyph::Continuation {
            start -= 1;
        }
        let mut end = x + 1;
        while end < self.width && self.cells[row + end].glyph == Glyph::Continuation {
            end += 1;
        }
        for cell in &mut self.cells[row + start..row + end] {
            cell.glyph = Glyph::Char(' ');
        }
    }

    /// Writes `text` grapheme by grapheme starting at `(x, y)`; returns the number of
    /// cells used. Zero-width marks stay with the cell before them.
    pub fn put_str(&mut self, x: usize, y: usize, text: &str, tone: Tone) -> usize {
        if y >= self.height {
            return 0;
        }
        let mut col = x;
        let mut last: Option<usize> = None;
        for grapheme in text.graphemes(true) {
            let width = grapheme_width(grapheme);
            if width == 0 {
                if let Some(index) = last {
                    self.cells[index].glyph.attach(grapheme);
                }
                continue;
            }
            if col + width > self.width {
                break;
            }
            for covered in col..col + width {
                self.clear_glyph_at(covered, y);
            }
            let index = y * self.width + col;
            self.cells[index] = Cell {
                glyph: Glyph::from_grapheme(grapheme),
                tone,
            };
            for cell in &mut self.cells[index + 1..index + width] {
                *cell = Cell {
                    glyph: Glyph::Continuation,
                    tone,
                };
            }
            last = Some(index);
            col += width;
        }
        col - x
    }

    /// Writes `text` centered on column `center`, clamped inside the grid.
    pub fn put_centered_at(&mut self, center: usize, y: usize, text: &str, tone: Tone) {
        let len = visible_width(text);
        let start = center.saturating_sub(len / 2);
        let start = start.min(self.width.saturating_sub(len));
        self.put_str(start, y, text, tone);
    }

    /// Writes `text` centered within `[left, left + span)`.
    pub fn put_centered(&mut self, left: usize, span: usize, y: usize, text: &str, tone: Tone) {
        self.put_centered_at(left + span / 2, y, text, tone);
    }

    pub fn hline(&mut self, x: usize, y: usize, len: usize, ch: char, tone: Tone) {
        for col in x..x.saturating_add(len) {
            self.set(col, y, ch, tone);
        }
    }

    /// Rounded box outline covering `width` × `height` cells.
    pub fn draw_box(&mut self, x: usize, y: usize, width: usize, height: usize, tone: Tone) {
        if width < 2 || height < 2 {
            return;
        }
        let right = x + width - 1;
        let bottom = y + height - 1;
        self.hline(x + 1, y, width - 2, '─', tone);
        self.hline(x + 1, bottom, width - 2, '─', tone);
        for row in y + 1..bottom {
            self.set(x, row, '│', tone);
            self.set(right, row, '│', tone);
        }
        self.set(x, y, '╭', tone);
        self.set(right, y, '╮', tone);
        self.set(x, bottom, '╰', tone);
        self.set(right, bottom, '╯', tone);
    }

    /// Unstyled text of one row, for assertions.
    pub fn row_text(&self, y: usize) -> String {
        if y >= self.height {
            return String::new();
        }
        self.cells[y * self.width..(y + 1) * self.width]
            .iter()
            .fold(String::new(), |mut text, cell| {
                cell.glyph.push_to(&mut text);
                text
            })
    }

    pub fn into_frame(self, theme: &WalkthroughTheme) -> Frame {
        let mut lines = Vec::with_capacity(self.height);
        for row in self.cells.chunks(self.width.max(1)).take(self.height) {
            let mut line = Line::default();
            let mut run = String::new();
            let mut run_tone = Tone::Plain;
            for cell in row {
                if cell.glyph == Glyph::Continuation {
                    continue;
                }
                if cell.tone != run_tone && !run.is_empty() {
                    line.push(Span::new(theme.paint(run_tone, &run)));
                    run.clear();
                }
                run_tone = cell.tone;
                cell.glyph.push_to(&mut run);
            }
            if !run.is_empty() {
                line.push(Span::new(theme.paint(run_tone, &run)));
            }
            lines.push(line);
        }
        Frame::new(lines)
    }
}
