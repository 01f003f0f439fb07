//! Views whose layout depends on another view's accepted size.
//!
//! - [`Overlay`] - draws a second view on top of a base, sized to the base.
//! - [`GeometryReader`] - takes whatever it is offered and builds its
//!   content from the size it ends up with.

use std::fmt;
use std::rc::Rc;

use crate::layout::{Alignment, Guide, Point, ProposedSize, Size};
use crate::renderer::DrawingContext;

use super::frame::{aligned_offset, render_aligned};
use super::types::{Element, LayoutResult};
use super::view::View;

/// Builds a view for a given size.
pub type ContentFn = Rc<dyn Fn(Size) -> View>;

// =============================================================================
// Overlay
// =============================================================================

/// `overlay` drawn over `base`. Layout is entirely the base's; the overlay
/// is proposed the base's size and aligned inside it.
#[derive(Debug, Clone)]
pub struct Overlay {
    pub base: Box<View>,
    pub overlay: Box<View>,
    pub alignment: Alignment,
}

impl Element for Overlay {
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size> {
        self.base.measure(proposed)
    }

    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()> {
        self.base.render(cx, size)?;
        let overlay_size = self.overlay.measure(ProposedSize::fixed(size))?;
        let offset = aligned_offset(self.alignment, &self.overlay, size, overlay_size)?;
        render_aligned(cx, &self.overlay, overlay_size, offset)
    }

    fn custom_alignment(&self, guide: Guide, size: Size) -> LayoutResult<Option<f64>> {
        self.base.custom_alignment(guide, size)
    }

    fn layout_priority(&self) -> f64 {
        self.base.layout_priority()
    }
}

// =============================================================================
// GeometryReader
// =============================================================================

/// Accepts the proposal (unconstrained dimensions fall back to the shape
/// default) and renders `content(size)` at its top-leading corner.
#[derive(Clone)]
pub struct GeometryReader {
    pub content: ContentFn,
}

impl GeometryReader {
    pub fn new(content: impl Fn(Size) -> View + 'static) -> Self {
        Self {
            content: Rc::new(content),
        }
    }
}

impl Element for GeometryReader {
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size> {
        Ok(proposed.or_default())
    }

    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()> {
        let content = (self.content)(size);
        let content_size = content.measure(ProposedSize::fixed(size))?;
        render_aligned(cx, &content, content_size, Point::ZERO)
    }
}

impl fmt::Debug for GeometryReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometryReader").finish_non_exhaustive()
    }
}
