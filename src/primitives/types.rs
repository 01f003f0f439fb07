//! Primitive types - the view protocol and type erasure.

use std::fmt;
use std::rc::Rc;

use crate::error::LayoutError;
use crate::layout::{Guide, ProposedSize, Size};
use crate::renderer::DrawingContext;

pub type LayoutResult<T> = Result<T, LayoutError>;

/// Computes a guide value from the size of the view it is attached to.
pub type GuideFn = Rc<dyn Fn(Size) -> f64>;

// =============================================================================
// Element
// =============================================================================

/// The sizing and rendering protocol every view implements.
///
/// Layout is two passes. `measure` runs top-down with proposals and must be
/// a pure function of the view and the proposal. `render` then runs
/// top-down with the final sizes, drawing with the view's origin at the
/// context's current translation.
pub trait Element {
    /// The size this view occupies when offered `proposed`.
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size>;

    /// Draw into `cx`, filling exactly `size`. Any state change made to
    /// the context is undone before returning.
    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()>;

    /// This view's override for `guide` when laid out at `size`, if any.
    fn custom_alignment(&self, guide: Guide, size: Size) -> LayoutResult<Option<f64>> {
        let _ = (guide, size);
        Ok(None)
    }

    /// Higher priorities are offered space first by stacks.
    fn layout_priority(&self) -> f64 {
        0.0
    }
}

/// Where `guide` falls inside `view` at `size`.
///
/// Built-in guides are positional, so only custom guides consult the view's
/// override before falling back to the default.
pub(crate) fn alignment_point(view: &impl Element, guide: Guide, size: Size) -> LayoutResult<f64> {
    if guide.is_builtin() {
        return Ok(guide.default_value(size));
    }
    Ok(view
        .custom_alignment(guide, size)?
        .unwrap_or_else(|| guide.default_value(size)))
}

// =============================================================================
// AnyView
// =============================================================================

/// A type-erased view. Lets any [`Element`], including ones defined outside
/// this crate, sit in a stack next to built-in views.
#[derive(Clone)]
pub struct AnyView(Rc<dyn Element>);

impl AnyView {
    pub fn new(element: impl Element + 'static) -> Self {
        Self(Rc::new(element))
    }
}

impl Element for AnyView {
    fn measure(&self, proposed: ProposedSize) -> LayoutResult<Size> {
        self.0.measure(proposed)
    }

    fn render(&self, cx: &mut dyn DrawingContext, size: Size) -> LayoutResult<()> {
        self.0.render(cx, size)
    }

    fn custom_alignment(&self, guide: Guide, size: Size) -> LayoutResult<Option<f64>> {
        self.0.custom_alignment(guide, size)
    }

    fn layout_priority(&self) -> f64 {
        self.0.layout_priority()
    }
}

impl fmt::Debug for AnyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AnyView(..)")
    }
}
