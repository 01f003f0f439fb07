//! FrameBuffer - the cell grid the reference renderer draws into.
//!
//! # Design Decisions
//!
//! - **Flat storage**: Uses `Vec<Cell>` with row-major indexing for cache efficiency.
//! - **Signed coordinates**: Drawing calls take `i64` so views translated
//!   off-canvas clip instead of wrapping.
//! - **Alpha blending**: Non-opaque backgrounds blend with existing cells.
//! - **Wide characters**: Emoji and CJK characters use continuation markers (char = 0).

use crate::layout::char_width;
use crate::types::{Attr, Cell, Rgba};

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_background(width, height, Rgba::TERMINAL_DEFAULT)
    }

    /// Create a new buffer with a specific background color.
    pub fn with_background(width: u16, height: u16, bg: Rgba) -> Self {
        let size = width as usize * height as usize;
        let cell = Cell {
            bg,
            ..Cell::default()
        };
        Self {
            width,
            height,
            cells: vec![cell; size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert signed coordinates to in-bounds cell coordinates.
    #[inline]
    fn clip(&self, x: i64, y: i64) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            None
        } else {
            Some((x as u16, y as u16))
        }
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get a mutable cell reference (returns None if out of bounds).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Raw cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks(0) panics; an empty buffer has no rows anyway.
        self.cells.chunks(self.width.max(1) as usize)
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Paint the background of one cell, blending if `bg` is not opaque.
    ///
    /// Returns true if the cell was inside the buffer.
    pub fn fill_cell(&mut self, x: i64, y: i64, bg: Rgba) -> bool {
        let Some((x, y)) = self.clip(x, y) else {
            return false;
        };
        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];
        cell.bg = if bg.is_opaque() || bg.is_terminal_default() || bg.is_ansi() {
            bg
        } else {
            Rgba::blend(bg, cell.bg)
        };
        true
    }

    /// Draw text starting at a position, keeping existing backgrounds.
    ///
    /// Returns the number of columns advanced (handles wide characters).
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, fg: Rgba, attrs: Attr) -> usize {
        let mut col = x;

        for ch in text.chars() {
            let w = char_width(ch);
            if w == 0 {
                continue;
            }

            if let Some((cx, cy)) = self.clip(col, y) {
                let idx = self.index(cx, cy);
                let cell = &mut self.cells[idx];
                cell.char = ch as u32;
                cell.fg = fg;
                cell.attrs = attrs;

                if w == 2 {
                    if let Some((nx, ny)) = self.clip(col + 1, y) {
                        let idx = self.index(nx, ny);
                        let next = &mut self.cells[idx];
                        next.char = 0;
                        next.fg = fg;
                        next.attrs = attrs;
                    }
                }
            }

            col += w as i64;
        }

        (col - x) as usize
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_background() {
        let buffer = FrameBuffer::with_background(4, 2, Rgba::BLUE);
        assert_eq!(buffer.cells().len(), 8);
        assert!(buffer.cells().iter().all(|c| c.bg == Rgba::BLUE));
        assert_eq!(buffer.rows().count(), 2);
    }

    #[test]
    fn test_fill_cell_clips() {
        let mut buffer = FrameBuffer::new(2, 2);
        assert!(buffer.fill_cell(1, 1, Rgba::RED));
        assert!(!buffer.fill_cell(-1, 0, Rgba::RED));
        assert!(!buffer.fill_cell(2, 0, Rgba::RED));
        assert_eq!(buffer.get(1, 1).unwrap().bg, Rgba::RED);
    }

    #[test]
    fn test_fill_cell_blends() {
        let mut buffer = FrameBuffer::with_background(1, 1, Rgba::BLUE);
        buffer.fill_cell(0, 0, Rgba::new(255, 0, 0, 128));
        let bg = buffer.get(0, 0).unwrap().bg;
        assert!(bg.r > 0 && bg.b > 0);
    }

    #[test]
    fn test_draw_text_keeps_background() {
        let mut buffer = FrameBuffer::with_background(5, 1, Rgba::GREEN);
        let advanced = buffer.draw_text(1, 0, "hi", Rgba::WHITE, Attr::BOLD);
        assert_eq!(advanced, 2);
        let cell = buffer.get(1, 0).unwrap();
        assert_eq!(cell.char, 'h' as u32);
        assert_eq!(cell.bg, Rgba::GREEN);
        assert_eq!(cell.attrs, Attr::BOLD);
    }

    #[test]
    fn test_draw_text_wide_char_continuation() {
        let mut buffer = FrameBuffer::new(4, 1);
        buffer.draw_text(0, 0, "日", Rgba::WHITE, Attr::NONE);
        assert_eq!(buffer.get(0, 0).unwrap().char, '日' as u32);
        assert_eq!(buffer.get(1, 0).unwrap().char, 0);
    }

    #[test]
    fn test_draw_text_partially_offscreen() {
        let mut buffer = FrameBuffer::new(3, 1);
        buffer.draw_text(-1, 0, "abcd", Rgba::WHITE, Attr::NONE);
        assert_eq!(buffer.get(0, 0).unwrap().char, 'b' as u32);
        assert_eq!(buffer.get(2, 0).unwrap().char, 'd' as u32);
    }
}
