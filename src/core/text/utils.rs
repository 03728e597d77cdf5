//! Truncation and padding helpers.

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::ansi_sequence_len;
use super::width::{grapheme_width, visible_width};

const ANSI_RESET: &str = "\x1b[0m";

/// Cuts `text` to at most `max_width` visible cells, ending with `ellipsis` when cut.
///
/// Escape sequences are kept in place; a reset is emitted before the ellipsis whenever any
/// sequence was copied so a truncated style cannot bleed into the ellipsis.
pub fn truncate_to_width(text: &str, max_width: usize, ellipsis: &str) -> String {
    if visible_width(text) <= max_width {
        return text.to_string();
    }

    let ellipsis_width = visible_width(ellipsis);
    if ellipsis_width >= max_width {
        return ellipsis.chars().take(max_width).collect();
    }
    let budget = max_width - ellipsis_width;

    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    let mut saw_ansi = false;
    let mut idx = 0;
    'outer: while idx < text.len() {
        if let Some(len) = ansi_sequence_len(text, idx) {
            out.push_str(&text[idx..idx + len]);
            saw_ansi = true;
            idx += len;
            continue;
        }

        let run_end = next_ansi_or_end(text, idx);
        for grapheme in text[idx..run_end].graphemes(true) {
            let width = grapheme_width(grapheme);
            if used + width > budget {
                break 'outer;
            }
            out.push_str(grapheme);
            used += width;
        }
        idx = run_end;
    }

    if saw_ansi {
        out.push_str(ANSI_RESET);
    }
    out.push_str(ellipsis);
    out
}

/// Right-pads `text` with spaces to exactly `width` cells (truncating first if needed).
pub fn pad_to_width(text: &str, width: usize) -> String {
    let fitted = truncate_to_width(text, width, "");
    let missing = width.saturating_sub(visible_width(&fitted));
    format!("{fitted}{}", " ".repeat(missing))
}

/// Centers `text` within `width` cells; odd leftovers go to the right.
pub fn center_in_width(text: &str, width: usize) -> String {
    let fitted = truncate_to_width(text, width, "");
    let free = width.saturating_sub(visible_width(&fitted));
    let left = free / 2;
    format!("{}{fitted}{}", " ".repeat(left), " ".repeat(free - left))
}

/// Keeps the right-most graphemes of plain `text` that fit in `max_width` cells.
pub fn tail_to_width(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (offset, grapheme) in text.grapheme_indices(true).rev() {
        let width = grapheme_width(grapheme);
        if used + width > max_width {
            break;
        }
        used += width;
        start = offset;
    }
    &text[start..]
}

fn next_ansi_or_end(input: &str, mut idx: usize) -> usize {
    while idx < input.len() {
        if ansi_sequence_len(input, idx).is_some() {
            break;
        }
        match input[idx..].chars().next() {
            Some(ch) => idx += ch.len_utf8(),
            None => break,
        }
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::{center_in_width, pad_to_width, tail_to_width, truncate_to_width};
    use crate::core::text::width::visible_width;

    #[test]
    fn truncate_returns_original_when_it_fits() {
        assert_eq!(truncate_to_width("Generate", 8, "…"), "Generate");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        let truncated = truncate_to_width("Chicken, Rice", 8, "…");
        assert_eq!(truncated, "Chicken…");
        assert_eq!(visible_width(&truncated), 8);
    }

    #[test]
    fn truncate_resets_styles_before_ellipsis() {
        let truncated = truncate_to_width("\x1b[1mQuick Tutorial", 6, "…");
        assert_eq!(truncated, "\x1b[1mQuick\x1b[0m…");
        assert_eq!(visible_width(&truncated), 6);
    }

    #[test]
    fn pad_and_center_fill_exact_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(center_in_width("ab", 5), " ab  ");
        assert_eq!(visible_width(&pad_to_width("\x1b[2mdim\x1b[0m", 6)), 6);
        assert_eq!(pad_to_width("too long", 3), "too");
    }

    #[test]
    fn tail_keeps_most_recent_characters() {
        assert_eq!(tail_to_width("youtube.com/watch", 5), "watch");
        assert_eq!(tail_to_width("rice", 10), "rice");
        assert_eq!(tail_to_width("rice", 0), "");
    }
}
