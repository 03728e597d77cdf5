//! Typed render model.
//!
//! Renderers build `Span`/`Line`/`Frame` values; components flatten them to `Vec<String>`
//! at the [`Component`](crate::core::component::Component) boundary.

use crate::core::text::width::visible_width;

/// A contiguous run of rendered text, already styled by the theme.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Span {
    text: String,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<String> for Span {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// A single rendered line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(|span| visible_width(span.as_str())).sum()
    }

    pub fn into_string(self) -> String {
        let mut out = String::new();
        for span in self.spans {
            out.push_str(span.as_str());
        }
        out
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Self::new(vec![Span::new(text)])
    }
}

/// A rendered frame (collection of lines).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Frame {
    lines: Vec<Line>,
}

impl Frame {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    pub fn into_strings(self) -> Vec<String> {
        self.lines
            .into_iter()
            .map(|line| line.into_string())
            .collect()
    }
}

impl From<Vec<String>> for Frame {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines.into_iter().map(Line::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, Line, Span};

    #[test]
    fn vec_strings_round_trip_preserves_bytes_exactly() {
        let input: Vec<String> = vec![
            String::new(),
            "╭── Quick Tutorial ──╮".to_string(),
            "\u{1b}[1mbold\u{1b}[0m".to_string(),
        ];

        let frame: Frame = input.clone().into();
        assert_eq!(frame.into_strings(), input);
    }

    #[test]
    fn line_width_ignores_span_styling() {
        let line = Line::new(vec![
            Span::new("\x1b[2m○ \x1b[0m"),
            Span::new("rice"),
        ]);
        assert_eq!(line.width(), 6);
        assert_eq!(line.into_string(), "\x1b[2m○ \x1b[0mrice");
    }
}
