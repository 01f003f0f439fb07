//! Drawing context - the surface views render into.
//!
//! Views never touch a `FrameBuffer` directly. They talk to a
//! [`DrawingContext`], which keeps a stack of graphics states (translation
//! and fill color) so nested renders can't leak transforms to siblings.
//!
//! Paths are added in local coordinates and stored in device space, so a
//! later `translate` doesn't move a path that was already added.

use crate::layout::{Point, Rect};
use crate::types::{Attr, Rgba};

// =============================================================================
// Path
// =============================================================================

/// A fillable shape outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Path {
    Rect(Rect),
    /// Ellipse inscribed in the rect.
    Ellipse(Rect),
}

impl Path {
    pub fn bounds(&self) -> Rect {
        match *self {
            Self::Rect(r) | Self::Ellipse(r) => r,
        }
    }

    pub fn translate(self, offset: Point) -> Self {
        match self {
            Self::Rect(r) => Self::Rect(r.translate(offset)),
            Self::Ellipse(r) => Self::Ellipse(r.translate(offset)),
        }
    }

    /// Whether `point` lies inside the filled area.
    pub fn contains(&self, point: Point) -> bool {
        match *self {
            Self::Rect(r) => r.contains(point),
            Self::Ellipse(r) => {
                let rx = r.size.width / 2.0;
                let ry = r.size.height / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let dx = (point.x - (r.origin.x + rx)) / rx;
                let dy = (point.y - (r.origin.y + ry)) / ry;
                dx * dx + dy * dy <= 1.0
            }
        }
    }
}

// =============================================================================
// Graphics State
// =============================================================================

/// Saved/restored part of a drawing context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphicsState {
    /// Accumulated translation from local to device space.
    pub offset: Point,
    pub fill: Rgba,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            offset: Point::ZERO,
            fill: Rgba::BLACK,
        }
    }
}

/// Current graphics state plus the saved ones beneath it.
#[derive(Debug, Clone, Default)]
pub struct StateStack {
    current: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl StateStack {
    pub fn new(initial: GraphicsState) -> Self {
        Self {
            current: initial,
            saved: Vec::new(),
        }
    }

    #[inline]
    pub fn current(&self) -> &GraphicsState {
        &self.current
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut GraphicsState {
        &mut self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pop the last saved state. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.current = state,
            None => tracing::warn!("restore without matching save"),
        }
    }

    /// Number of outstanding saves.
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

// =============================================================================
// DrawingContext
// =============================================================================

/// The drawing surface contract views render against.
pub trait DrawingContext {
    /// Push a copy of the current graphics state.
    fn save(&mut self);

    /// Pop back to the last saved graphics state.
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);

    fn set_fill_color(&mut self, color: Rgba);

    /// Add a path, in local coordinates, to the pending fill.
    fn add_path(&mut self, path: Path);

    /// Fill every pending path with the current fill color and clear them.
    fn fill_path(&mut self);

    /// Draw one line of text with its top-left corner at `origin` (local
    /// coordinates), using the current fill color.
    fn show_text(&mut self, origin: Point, text: &str, attrs: Attr);

    /// Current local-to-device translation.
    fn transform(&self) -> Point;

    fn fill_color(&self) -> Rgba;
}

/// Run `f` between a `save` and a `restore`, restoring even when `f` fails.
pub fn scoped<R>(cx: &mut dyn DrawingContext, f: impl FnOnce(&mut dyn DrawingContext) -> R) -> R {
    cx.save();
    let result = f(&mut *cx);
    cx.restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_contains() {
        let e = Path::Ellipse(Rect::new(0.0, 0.0, 10.0, 4.0));
        assert!(e.contains(Point::new(5.0, 2.0)));
        assert!(!e.contains(Point::new(0.2, 0.2)));
        assert!(!Path::Ellipse(Rect::new(0.0, 0.0, 0.0, 4.0)).contains(Point::ZERO));
    }

    #[test]
    fn test_path_translate() {
        let p = Path::Rect(Rect::new(1.0, 1.0, 2.0, 2.0)).translate(Point::new(3.0, -1.0));
        assert_eq!(p.bounds(), Rect::new(4.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn test_state_stack_restore() {
        let mut stack = StateStack::default();
        stack.save();
        stack.current_mut().offset = Point::new(5.0, 5.0);
        stack.current_mut().fill = Rgba::RED;
        assert_eq!(stack.depth(), 1);
        stack.restore();
        assert_eq!(*stack.current(), GraphicsState::default());
        // unbalanced restore leaves state alone
        stack.restore();
        assert_eq!(stack.depth(), 0);
    }
}
