//! Text Measurement
//!
//! Utilities for measuring text dimensions in terminal cells.
//!
//! Terminal text width depends on Unicode character widths:
//! - ASCII characters: 1 cell
//! - CJK characters: 2 cells (fullwidth)
//! - Emoji: 2 cells (most)
//! - Zero-width and control characters: 0 cells

use unicode_width::UnicodeWidthChar;

/// Display width of a single character in terminal cells.
#[inline]
pub fn char_width(c: char) -> usize {
    if c.is_control() {
        return 0;
    }
    c.width().unwrap_or(0)
}

/// Measure the display width of a string in terminal cells.
pub fn string_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Wrap text to a given width, breaking between characters.
///
/// Explicit newlines always break. A width of zero is treated as one
/// cell, so every visible character lands on its own line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0usize;

    for c in text.chars() {
        if c == '\n' {
            lines.push(std::mem::take(&mut current_line));
            current_width = 0;
            continue;
        }

        let w = char_width(c);
        if current_width + w > width && !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
            current_width = 0;
        }

        current_line.push(c);
        current_width += w;
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Width of the widest line and number of lines after wrapping at `width`.
pub fn text_extent(text: &str, width: usize) -> (usize, usize) {
    let lines = wrap_text(text, width);
    let widest = lines.iter().map(|l| string_width(l)).max().unwrap_or(0);
    (widest, lines.len())
}
