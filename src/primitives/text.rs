//! Text primitive - wrapped text measured and drawn by a [`TextSystem`].
//!
//! Font metrics are not this crate's business. A `Text` view asks its text
//! system how big a string is under a proposal and how to draw it. The
//! default [`CellText`] system works in terminal cells: one unit per cell
//! of display width, one unit of height per wrapped line.
//!
//! ```
//! use spark_views::layout::{ProposedSize, Size};
//! use spark_views::primitives::{Element, text};
//!
//! let view = text("hello world");
//! let narrow = view.measure(ProposedSize::new(Some(5.0), None)).unwrap();
//! assert_eq!(narrow, Size::new(5.0, 3.0));
//! ```

use std::fmt;
use std::rc::Rc;

use crate::layout::{Point, ProposedSize, Rect, Size, text_extent, wrap_text};
use crate::renderer::{DrawingContext, scoped};
use crate::types::{Attr, Rgba};

use super::types::{Element, LayoutResult};

// =============================================================================
// Text System
// =============================================================================

/// Host-supplied text measurement and drawing. `attrs` stands in for the
/// font.
pub trait TextSystem {
    fn measure_text(&self, text: &str, attrs: Attr, proposed: ProposedSize) -> Size;

    /// Draw `text` inside `rect` (local coordinates) with the context's
    /// current fill color.
    fn draw_text(&self, text: &str, attrs: Attr, cx: &mut dyn DrawingContext, rect: Rect);
}

/// Terminal-cell text: character wrapping by display width.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellText;

/// Wrap width for an extent; unconstrained means never wrap.
fn wrap_width(extent: Option<f64>) -> usize {
    extent.map_or(usize::MAX, |w| w.max(0.0).floor() as usize)
}

impl TextSystem for CellText {
    fn measure_text(&self, text: &str, _attrs: Attr, proposed: ProposedSize) -> Size {
        let (widest, lines) = text_extent(text, wrap_width(proposed.width));
        Size::new(widest as f64, lines as f64)
    }

    fn draw_text(&self, text: &str, attrs: Attr, cx: &mut dyn DrawingContext, rect: Rect) {
        let rows = rect.size.height.max(0.0).ceil() as usize;
        let lines = wrap_text(text, wrap_width(Some(rect.size.width)));
        for (row, line) in lines.iter().take(rows).enumerate() {
            let origin = Point::new(rect.origin.x, rect.origin.y + row as f64);
            cx.show_text(origin, line, attrs);
        }
    }
}

// =============================================================================
// Text
// =============================================================================

#[derive(Clone)]
pub struct Text {
    content: Rc<str>,
    color: Option<Rgba>,
    attrs: Attr,
    system: Option<Rc<dyn TextSystem>>,
}

impl Text {
    pub fn new(content: impl Into<Rc<str>>) -> Self {
        Self {
            content: content.into(),
            color: None,
            attrs: Attr::NONE,
            system: None,
        }
    }

    /// Text color. Without one, text is drawn in the inherited fill color.
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    pub fn attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }

    /// Measure and draw with `system` instead of [`CellText`].
    pub fn system(mut self, system: Rc<dyn TextSystem>) -> Self {
        self.system = Some(system);
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    fn text_system(&self) -> &dyn TextSystem {
        match &self.system {
            Some(system) => system.as_ref(),
            None => &CellText,
        }
    }

    fn draw(&self, cx: &mut dyn DrawingContext, size: Size) {
        self.text_system()
            .draw_text(&self.content, self.attrs, cx, Rect::from_size(size));
    }
}

impl Element for Text {
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size> {
        Ok(self
            .text_system()
            .measure_text(&self.content, self.attrs, proposed))
    }

    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()> {
        match self.color {
            Some(color) => scoped(cx, |cx| {
                cx.set_fill_color(color);
                self.draw(cx, size);
            }),
            None => self.draw(cx, size),
        }
        Ok(())
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Text")
            .field("content", &self.content)
            .field("color", &self.color)
            .field("attrs", &self.attrs)
            .field("custom_system", &self.system.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Recorder;

    #[test]
    fn test_unconstrained_text_is_one_line() {
        let size = Text::new("hello").measure(ProposedSize::UNSPECIFIED).unwrap();
        assert_eq!(size, Size::new(5.0, 1.0));
    }

    #[test]
    fn test_zero_width_stacks_characters() {
        let size = Text::new("abc").measure(ProposedSize::new(Some(0.0), None)).unwrap();
        assert_eq!(size, Size::new(1.0, 3.0));
    }

    #[test]
    fn test_wide_characters() {
        let size = Text::new("日本").measure(ProposedSize::UNSPECIFIED).unwrap();
        assert_eq!(size, Size::new(4.0, 1.0));
    }

    #[test]
    fn test_render_lines_and_color() {
        let view = Text::new("abcd").color(Rgba::GREEN).attrs(Attr::BOLD);
        let mut rec = Recorder::new();
        view.render(&mut rec, Size::new(2.0, 2.0)).unwrap();
        assert_eq!(
            rec.texts(),
            vec![(Point::new(0.0, 0.0), "ab"), (Point::new(0.0, 1.0), "cd")]
        );
        assert_eq!(rec.save_depth(), 0);
        assert_eq!(rec.fill_color(), Rgba::BLACK);
    }

    #[test]
    fn test_render_clips_to_height() {
        let mut rec = Recorder::new();
        Text::new("abcdef").render(&mut rec, Size::new(2.0, 1.0)).unwrap();
        assert_eq!(rec.texts().len(), 1);
    }

    struct Fixed;

    impl TextSystem for Fixed {
        fn measure_text(&self, _: &str, _: Attr, _: ProposedSize) -> Size {
            Size::new(7.0, 3.0)
        }

        fn draw_text(&self, text: &str, attrs: Attr, cx: &mut dyn DrawingContext, _: Rect) {
            cx.show_text(Point::ZERO, text, attrs);
        }
    }

    #[test]
    fn test_custom_text_system() {
        let view = Text::new("x").system(Rc::new(Fixed));
        assert_eq!(view.measure(ProposedSize::UNSPECIFIED).unwrap(), Size::new(7.0, 3.0));
    }
}
