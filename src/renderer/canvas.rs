//! CellCanvas - a `DrawingContext` that rasterizes into a `FrameBuffer`.
//!
//! A cell is covered by a path when the cell's center lies inside the
//! path in device space. Fills paint cell backgrounds; text writes
//! characters with the fill color as foreground.

use crate::layout::{Point, Rect};
use crate::types::{Attr, Rgba};

use super::buffer::FrameBuffer;
use super::context::{DrawingContext, GraphicsState, Path, StateStack};

pub struct CellCanvas {
    buffer: FrameBuffer,
    state: StateStack,
    pending: Vec<Path>,
}

impl CellCanvas {
    pub fn new(buffer: FrameBuffer) -> Self {
        Self::with_state(buffer, GraphicsState::default())
    }

    /// Canvas whose initial graphics state is `initial`.
    pub fn with_state(buffer: FrameBuffer, initial: GraphicsState) -> Self {
        Self {
            buffer,
            state: StateStack::new(initial),
            pending: Vec::new(),
        }
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> FrameBuffer {
        self.buffer
    }

    /// Number of outstanding saves; zero once a render pass has unwound.
    pub fn save_depth(&self) -> usize {
        self.state.depth()
    }

    /// Cell index range covering `[lo, hi)` clamped to `[0, limit)`.
    fn cell_span(lo: f64, hi: f64, limit: u16) -> (i64, i64) {
        let start = lo.floor().max(0.0).min(limit as f64) as i64;
        let end = hi.ceil().max(0.0).min(limit as f64) as i64;
        (start, end)
    }

    fn rasterize(&mut self, path: Path, color: Rgba) {
        let bounds: Rect = path.bounds();
        let (x0, x1) = Self::cell_span(bounds.min_x(), bounds.max_x(), self.buffer.width());
        let (y0, y1) = Self::cell_span(bounds.min_y(), bounds.max_y(), self.buffer.height());

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if path.contains(center) {
                    self.buffer.fill_cell(x, y, color);
                }
            }
        }
    }
}

impl DrawingContext for CellCanvas {
    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let state = self.state.current_mut();
        state.offset = state.offset + Point::new(dx, dy);
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.state.current_mut().fill = color;
    }

    fn add_path(&mut self, path: Path) {
        let offset = self.state.current().offset;
        self.pending.push(path.translate(offset));
    }

    fn fill_path(&mut self) {
        let color = self.state.current().fill;
        for path in std::mem::take(&mut self.pending) {
            self.rasterize(path, color);
        }
    }

    fn show_text(&mut self, origin: Point, text: &str, attrs: Attr) {
        let state = *self.state.current();
        let at = origin + state.offset;
        self.buffer
            .draw_text(at.x.round() as i64, at.y.round() as i64, text, state.fill, attrs);
    }

    fn transform(&self) -> Point {
        self.state.current().offset
    }

    fn fill_color(&self) -> Rgba {
        self.state.current().fill
    }
}
