//! Painting primitives - shapes, fills, and borders.

use crate::layout::{Guide, ProposedSize, Rect, Size};
use crate::renderer::{DrawingContext, Path, scoped};
use crate::types::Rgba;

use super::types::{Element, LayoutResult};
use super::view::View;

// =============================================================================
// Shape
// =============================================================================

/// A shape that fills whatever it is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rectangle,
    /// Ellipse inscribed in the view's bounds.
    Ellipse,
}

impl Shape {
    pub fn path(self, size: Size) -> Path {
        let bounds = Rect::from_size(size);
        match self {
            Self::Rectangle => Path::Rect(bounds),
            Self::Ellipse => Path::Ellipse(bounds),
        }
    }
}

impl Element for Shape {
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size> {
        Ok(proposed.or_default())
    }

    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()> {
        cx.add_path(self.path(size));
        cx.fill_path();
        Ok(())
    }
}

// =============================================================================
// ColorFill
// =============================================================================

/// Sets the fill color for everything its child draws.
#[derive(Debug, Clone)]
pub struct ColorFill {
    pub color: Rgba,
    pub child: Box<View>,
}

impl Element for ColorFill {
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size> {
        self.child.measure(proposed)
    }

    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()> {
        scoped(cx, |cx| {
            cx.set_fill_color(self.color);
            self.child.render(cx, size)
        })
    }

    fn custom_alignment(&self, guide: Guide, size: Size) -> LayoutResult<Option<f64>> {
        self.child.custom_alignment(guide, size)
    }

    fn layout_priority(&self) -> f64 {
        self.child.layout_priority()
    }
}

// =============================================================================
// Border
// =============================================================================

/// Draws its child, then a `width`-thick border inside the child's bounds.
#[derive(Debug, Clone)]
pub struct Border {
    pub color: Rgba,
    pub width: f64,
    pub child: Box<View>,
}

impl Border {
    /// Top, bottom, left, and right edge rects for a view of `size`.
    pub fn edges(size: Size, width: f64) -> [Rect; 4] {
        let w = width.max(0.0).min(size.width / 2.0);
        let h = width.max(0.0).min(size.height / 2.0);
        let side = (size.height - 2.0 * h).max(0.0);
        [
            Rect::new(0.0, 0.0, size.width, h),
            Rect::new(0.0, size.height - h, size.width, h),
            Rect::new(0.0, h, w, side),
            Rect::new(size.width - w, h, w, side),
        ]
    }
}

impl Element for Border {
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size> {
        self.child.measure(proposed)
    }

    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()> {
        self.child.render(cx, size)?;
        if self.width <= 0.0 {
            return Ok(());
        }
        scoped(cx, |cx| {
            cx.set_fill_color(self.color);
            for edge in Self::edges(size, self.width) {
                cx.add_path(Path::Rect(edge));
            }
            cx.fill_path();
        });
        Ok(())
    }

    fn custom_alignment(&self, guide: Guide, size: Size) -> LayoutResult<Option<f64>> {
        self.child.custom_alignment(guide, size)
    }

    fn layout_priority(&self) -> f64 {
        self.child.layout_priority()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::rectangle;
    use crate::renderer::{DrawCommand, Recorder};

    #[test]
    fn test_shape_takes_proposal() {
        let size = Shape::Ellipse.measure(ProposedSize::new(Some(30.0), None)).unwrap();
        assert_eq!(size, Size::new(30.0, 10.0));
    }

    #[test]
    fn test_color_fill_round_trip() {
        let view = rectangle().fill(Rgba::RED);
        let mut rec = Recorder::new();
        let before = rec.state();
        view.render(&mut rec, Size::new(100.0, 100.0)).unwrap();

        let set_fills = rec
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::SetFillColor(_)))
            .count();
        assert_eq!(set_fills, 1);
        assert!(rec.commands().contains(&DrawCommand::SetFillColor(Rgba::RED)));
        assert_eq!(rec.fills(), vec![(Rect::new(0.0, 0.0, 100.0, 100.0), Rgba::RED)]);
        assert_eq!(rec.state(), before);
        assert_eq!(rec.save_depth(), 0);
    }

    #[test]
    fn test_border_edges_stay_inside() {
        let edges = Border::edges(Size::new(10.0, 4.0), 1.0);
        assert_eq!(edges[0], Rect::new(0.0, 0.0, 10.0, 1.0));
        assert_eq!(edges[1], Rect::new(0.0, 3.0, 10.0, 1.0));
        assert_eq!(edges[2], Rect::new(0.0, 1.0, 1.0, 2.0));
        assert_eq!(edges[3], Rect::new(9.0, 1.0, 1.0, 2.0));
    }

    #[test]
    fn test_border_draws_after_child() {
        let view = rectangle().fill(Rgba::BLUE).border(Rgba::WHITE, 1.0);
        let mut rec = Recorder::new();
        view.render(&mut rec, Size::new(6.0, 3.0)).unwrap();
        let fills = rec.fills();
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].1, Rgba::BLUE);
        assert_eq!(fills[1], (Rect::new(0.0, 0.0, 6.0, 3.0), Rgba::WHITE));
    }

    #[test]
    fn test_fill_forwards_priority() {
        let view = rectangle().priority(2.0).fill(Rgba::RED);
        assert_eq!(view.layout_priority(), 2.0);
    }
}
