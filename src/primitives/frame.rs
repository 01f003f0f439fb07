//! Frames and layout wrappers.
//!
//! - [`FixedFrame`] - explicit width and/or height; absent dimensions defer
//!   to the child.
//! - [`FlexibleFrame`] - min/max bounds per dimension.
//! - [`AlignmentGuideOverride`] - replaces one guide's value for its child.
//! - [`LayoutPriority`] - raises or lowers the child's stack priority.

use std::fmt;

use crate::layout::{Alignment, Guide, Point, ProposedSize, Size};
use crate::renderer::{DrawingContext, scoped};

use super::types::{Element, GuideFn, LayoutResult, alignment_point};
use super::view::View;

/// Offset that puts `child`'s alignment point on the container's.
///
/// The container's point is always the guide's default. The child's is its
/// override when the guide is custom. Built-in guides ignore overrides, so
/// centered alignment is plain centering.
pub(crate) fn aligned_offset(alignment: Alignment, child: &View, size: Size, child_size: Size) -> LayoutResult<Point> {
    let offset = |guide: Guide| -> LayoutResult<f64> {
        Ok(guide.default_value(size) - alignment_point(child, guide, child_size)?)
    };
    Ok(Point::new(offset(alignment.horizontal)?, offset(alignment.vertical)?))
}

pub(crate) fn render_aligned(cx: &mut dyn DrawingContext, child: &View, child_size: Size, offset: Point) -> LayoutResult<()> {
    scoped(cx, |cx| {
        cx.translate(offset.x, offset.y);
        child.render(cx, child_size)
    })
}

// =============================================================================
// FixedFrame
// =============================================================================

#[derive(Debug, Clone)]
pub struct FixedFrame {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub alignment: Alignment,
    pub child: Box<View>,
}

impl FixedFrame {
    /// The child's size and offset when the frame is `size`.
    fn placement(&self, size: Size) -> LayoutResult<(Size, Point)> {
        let child_size = self.child.measure(ProposedSize::fixed(size))?;
        let offset = aligned_offset(self.alignment, &self.child, size, child_size)?;
        Ok((child_size, offset))
    }
}

impl Element for FixedFrame {
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size> {
        let child = self.child.measure(ProposedSize::new(
            self.width.or(proposed.width),
            self.height.or(proposed.height),
        ))?;
        Ok(Size::new(
            self.width.unwrap_or(child.width),
            self.height.unwrap_or(child.height),
        ))
    }

    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()> {
        let (child_size, offset) = self.placement(size)?;
        render_aligned(cx, &self.child, child_size, offset)
    }

    fn custom_alignment(&self, guide: Guide, size: Size) -> LayoutResult<Option<f64>> {
        let (child_size, offset) = self.placement(size)?;
        Ok(self
            .child
            .custom_alignment(guide, child_size)?
            .map(|value| value + offset.get(guide.axis())))
    }
}

// =============================================================================
// FlexibleFrame
// =============================================================================

/// Bounds for a [`FlexibleFrame`]. `None` leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameBounds {
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
    pub alignment: Alignment,
}

/// Clamp into `[min, max]`; the minimum wins when they cross.
fn clamp(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let value = max.map_or(value, |max| value.min(max));
    min.map_or(value, |min| value.max(min))
}

impl FrameBounds {
    pub fn width(min: f64, max: f64) -> Self {
        Self {
            min_width: Some(min),
            max_width: Some(max),
            ..Self::default()
        }
    }

    pub fn height(min: f64, max: f64) -> Self {
        Self {
            min_height: Some(min),
            max_height: Some(max),
            ..Self::default()
        }
    }

    pub fn clamp(&self, size: Size) -> Size {
        Size::new(
            clamp(size.width, self.min_width, self.max_width),
            clamp(size.height, self.min_height, self.max_height),
        )
    }

    fn clamp_proposal(&self, proposed: ProposedSize) -> ProposedSize {
        ProposedSize::new(
            proposed.width.map(|w| clamp(w, self.min_width, self.max_width)),
            proposed.height.map(|h| clamp(h, self.min_height, self.max_height)),
        )
    }
}

#[derive(Debug, Clone)]
pub struct FlexibleFrame {
    pub bounds: FrameBounds,
    pub child: Box<View>,
}

impl FlexibleFrame {
    fn placement(&self, size: Size) -> LayoutResult<(Size, Point)> {
        let child_size = self.child.measure(ProposedSize::fixed(size))?;
        let offset = aligned_offset(self.bounds.alignment, &self.child, size, child_size)?;
        Ok((child_size, offset))
    }
}

impl Element for FlexibleFrame {
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size> {
        let child = self.child.measure(self.bounds.clamp_proposal(proposed))?;
        Ok(self.bounds.clamp(child))
    }

    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()> {
        let (child_size, offset) = self.placement(size)?;
        render_aligned(cx, &self.child, child_size, offset)
    }

    fn custom_alignment(&self, guide: Guide, size: Size) -> LayoutResult<Option<f64>> {
        let (child_size, offset) = self.placement(size)?;
        Ok(self
            .child
            .custom_alignment(guide, child_size)?
            .map(|value| value + offset.get(guide.axis())))
    }
}

// =============================================================================
// AlignmentGuideOverride
// =============================================================================

#[derive(Clone)]
pub struct AlignmentGuideOverride {
    pub guide: Guide,
    pub compute: GuideFn,
    pub child: Box<View>,
}

impl Element for AlignmentGuideOverride {
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size> {
        self.child.measure(proposed)
    }

    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()> {
        self.child.render(cx, size)
    }

    fn custom_alignment(&self, guide: Guide, size: Size) -> LayoutResult<Option<f64>> {
        if guide == self.guide {
            return Ok(Some((self.compute)(size)));
        }
        self.child.custom_alignment(guide, size)
    }

    fn layout_priority(&self) -> f64 {
        self.child.layout_priority()
    }
}

impl fmt::Debug for AlignmentGuideOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignmentGuideOverride")
            .field("guide", &self.guide)
            .field("child", &self.child)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// LayoutPriority
// =============================================================================

#[derive(Debug, Clone)]
pub struct LayoutPriority {
    pub priority: f64,
    pub child: Box<View>,
}

impl Element for LayoutPriority {
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size> {
        self.child.measure(proposed)
    }

    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()> {
        self.child.render(cx, size)
    }

    fn custom_alignment(&self, guide: Guide, size: Size) -> LayoutResult<Option<f64>> {
        self.child.custom_alignment(guide, size)
    }

    fn layout_priority(&self) -> f64 {
        self.priority
    }
}
