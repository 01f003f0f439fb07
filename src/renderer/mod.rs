//! Renderer - drawing contexts and frame output.
//!
//! Views draw against the [`DrawingContext`] trait. Two contexts ship:
//!
//! - [`CellCanvas`] rasterizes into a [`FrameBuffer`] of terminal cells
//! - [`Recorder`] captures a display list of [`DrawCommand`]s
//!
//! A finished buffer is turned into bytes by [`encode`].

mod buffer;
mod canvas;
mod context;
mod output;
mod recorder;

pub use buffer::FrameBuffer;
pub use canvas::CellCanvas;
pub use context::{DrawingContext, GraphicsState, Path, StateStack, scoped};
pub use output::encode;
pub use recorder::{DrawCommand, Recorder};
