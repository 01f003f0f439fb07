//! Document encoding - turns a finished `FrameBuffer` into bytes.
//!
//! The ANSI encoding tracks the pen (colors and attributes) so escape
//! codes are only emitted when a cell differs from the one before it.
//! Each row ends with a full reset, so every line stands on its own and
//! the document leaves the terminal in its default state.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use crate::config::Encoding;
use crate::types::{Attr, Cell, Rgba};

use super::buffer::FrameBuffer;

/// Encode a frame as a self-contained document.
pub fn encode(buffer: &FrameBuffer, encoding: Encoding) -> io::Result<Vec<u8>> {
    // Rough guess: a few bytes per cell plus escape codes at color changes.
    let mut out = Vec::with_capacity(buffer.cells().len() * 4);
    match encoding {
        Encoding::Ansi => write_ansi(&mut out, buffer)?,
        Encoding::Plain => write_plain(&mut out, buffer)?,
    }
    Ok(out)
}

// =============================================================================
// Plain
// =============================================================================

fn write_plain(out: &mut impl Write, buffer: &FrameBuffer) -> io::Result<()> {
    for row in buffer.rows() {
        for cell in row {
            if let Some(c) = visible_char(cell) {
                write!(out, "{c}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

// =============================================================================
// ANSI
// =============================================================================

/// Last colors/attributes emitted. `None` means unknown (after a reset).
#[derive(Debug, Default)]
struct Pen {
    fg: Option<Rgba>,
    bg: Option<Rgba>,
    attrs: Attr,
}

fn write_ansi(out: &mut impl Write, buffer: &FrameBuffer) -> io::Result<()> {
    for row in buffer.rows() {
        let mut pen = Pen::default();

        for cell in row {
            let Some(c) = visible_char(cell) else {
                continue;
            };

            if cell.attrs != pen.attrs {
                queue!(out, SetAttribute(Attribute::Reset))?;
                for attribute in attributes(cell.attrs) {
                    queue!(out, SetAttribute(attribute))?;
                }
                pen = Pen {
                    attrs: cell.attrs,
                    ..Pen::default()
                };
            }
            if pen.fg != Some(cell.fg) {
                queue!(out, SetForegroundColor(to_color(cell.fg)))?;
                pen.fg = Some(cell.fg);
            }
            if pen.bg != Some(cell.bg) {
                queue!(out, SetBackgroundColor(to_color(cell.bg)))?;
                pen.bg = Some(cell.bg);
            }

            queue!(out, Print(c))?;
        }

        queue!(out, SetAttribute(Attribute::Reset), ResetColor, Print('\n'))?;
    }
    Ok(())
}

/// The character to print for a cell; `None` for wide-char continuations.
fn visible_char(cell: &Cell) -> Option<char> {
    if cell.char == 0 {
        return None;
    }
    Some(char::from_u32(cell.char).unwrap_or('\u{FFFD}'))
}

fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else if color.is_ansi() {
        Color::AnsiValue(color.ansi_index())
    } else {
        Color::Rgb {
            r: color.r.clamp(0, 255) as u8,
            g: color.g.clamp(0, 255) as u8,
            b: color.b.clamp(0, 255) as u8,
        }
    }
}

fn attributes(attrs: Attr) -> Vec<Attribute> {
    let table = [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::INVERSE, Attribute::Reverse),
        (Attr::STRIKETHROUGH, Attribute::CrossedOut),
    ];
    table
        .into_iter()
        .filter(|(flag, _)| attrs.contains(*flag))
        .map(|(_, attribute)| attribute)
        .collect()
}
