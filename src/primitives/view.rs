//! View - the closed set of view descriptions.
//!
//! A `View` is an immutable value. Modifiers consume a view and wrap it,
//! so a description is built inside-out:
//!
//! ```
//! use spark_views::layout::{ProposedSize, Size};
//! use spark_views::primitives::{Element, rectangle};
//! use spark_views::types::Rgba;
//!
//! let badge = rectangle().fill(Rgba::RED).frame(6.0, 2.0).border(Rgba::WHITE, 1.0);
//! assert_eq!(badge.measure(ProposedSize::UNSPECIFIED).unwrap(), Size::new(6.0, 2.0));
//! ```

use std::rc::Rc;

use crate::layout::{Alignment, Guide, ProposedSize, Size};
use crate::renderer::DrawingContext;
use crate::types::Rgba;

use super::frame::{AlignmentGuideOverride, FixedFrame, FlexibleFrame, FrameBounds, LayoutPriority};
use super::overlay::{GeometryReader, Overlay};
use super::shape::{Border, ColorFill, Shape};
use super::stack::Stack;
use super::text::Text;
use super::types::{AnyView, Element, LayoutResult};

#[derive(Debug, Clone)]
pub enum View {
    Shape(Shape),
    Text(Text),
    ColorFill(ColorFill),
    FixedFrame(FixedFrame),
    FlexibleFrame(FlexibleFrame),
    AlignmentGuide(AlignmentGuideOverride),
    LayoutPriority(LayoutPriority),
    Border(Border),
    Overlay(Overlay),
    GeometryReader(GeometryReader),
    Stack(Stack),
    Any(AnyView),
}

macro_rules! dispatch {
    ($view:expr, $inner:ident => $body:expr) => {
        match $view {
            View::Shape($inner) => $body,
            View::Text($inner) => $body,
            View::ColorFill($inner) => $body,
            View::FixedFrame($inner) => $body,
            View::FlexibleFrame($inner) => $body,
            View::AlignmentGuide($inner) => $body,
            View::LayoutPriority($inner) => $body,
            View::Border($inner) => $body,
            View::Overlay($inner) => $body,
            View::GeometryReader($inner) => $body,
            View::Stack($inner) => $body,
            View::Any($inner) => $body,
        }
    };
}

impl Element for View {
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size> {
        dispatch!(self, view => view.measure(proposed))
    }

    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()> {
        dispatch!(self, view => view.render(cx, size))
    }

    fn custom_alignment(&self, guide: Guide, size: Size) -> LayoutResult<Option<f64>> {
        dispatch!(self, view => view.custom_alignment(guide, size))
    }

    fn layout_priority(&self) -> f64 {
        dispatch!(self, view => view.layout_priority())
    }
}

// =============================================================================
// Modifiers
// =============================================================================

impl View {
    /// Fill color for everything this view draws.
    pub fn fill(self, color: Rgba) -> View {
        View::ColorFill(ColorFill {
            color,
            child: Box::new(self),
        })
    }

    /// Fixed `width` x `height` frame, child centered.
    pub fn frame(self, width: f64, height: f64) -> View {
        self.fixed_frame(Some(width), Some(height), Alignment::center())
    }

    /// Fixed frame; an absent dimension takes the child's.
    pub fn fixed_frame(self, width: Option<f64>, height: Option<f64>, alignment: Alignment) -> View {
        View::FixedFrame(FixedFrame {
            width,
            height,
            alignment,
            child: Box::new(self),
        })
    }

    pub fn flexible_frame(self, bounds: FrameBounds) -> View {
        View::FlexibleFrame(FlexibleFrame {
            bounds,
            child: Box::new(self),
        })
    }

    /// Override `guide` for this view with `compute(size)`.
    pub fn alignment_guide(self, guide: Guide, compute: impl Fn(Size) -> f64 + 'static) -> View {
        View::AlignmentGuide(AlignmentGuideOverride {
            guide,
            compute: Rc::new(compute),
            child: Box::new(self),
        })
    }

    /// Stack priority; higher is offered space first.
    pub fn priority(self, priority: f64) -> View {
        View::LayoutPriority(LayoutPriority {
            priority,
            child: Box::new(self),
        })
    }

    pub fn border(self, color: Rgba, width: f64) -> View {
        View::Border(Border {
            color,
            width,
            child: Box::new(self),
        })
    }

    /// `overlay` drawn on top, centered and proposed this view's size.
    pub fn overlay(self, overlay: View) -> View {
        View::Overlay(Overlay {
            base: Box::new(self),
            overlay: Box::new(overlay),
            alignment: Alignment::center(),
        })
    }

    /// Labels the view with the width it was laid out at.
    pub fn measured(self) -> View {
        self.overlay(View::GeometryReader(GeometryReader::new(|size| {
            super::text(format!("{}", size.width as i64))
        })))
    }

    /// This view behind an [`AnyView`].
    pub fn erased(self) -> View {
        match self {
            View::Any(_) => self,
            view => View::Any(AnyView::new(view)),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<Shape> for View {
    fn from(shape: Shape) -> Self {
        View::Shape(shape)
    }
}

impl From<Text> for View {
    fn from(text: Text) -> Self {
        View::Text(text)
    }
}

impl From<GeometryReader> for View {
    fn from(reader: GeometryReader) -> Self {
        View::GeometryReader(reader)
    }
}

impl From<Stack> for View {
    fn from(stack: Stack) -> Self {
        View::Stack(stack)
    }
}

impl From<AnyView> for View {
    fn from(view: AnyView) -> Self {
        View::Any(view)
    }
}
