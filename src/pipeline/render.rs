//! Rendering driver - one measure + render pass into a document.
//!
//! ```text
//! View → frame(size) → measure → render into CellCanvas → encode → bytes
//! ```
//!
//! The view is placed in a fixed frame of the canvas size, so whatever it
//! measures to, it is centered in the canvas like any framed child.

use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::layout::{Point, ProposedSize, Size};
use crate::primitives::{Element, View};
use crate::renderer::{CellCanvas, DrawingContext, FrameBuffer, GraphicsState, Recorder, encode};

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn initial_state(&self) -> GraphicsState {
        GraphicsState {
            offset: Point::ZERO,
            fill: self.config.fill,
        }
    }

    /// Measure `view` in a canvas of `size` and return the framed root and
    /// its accepted size.
    fn layout(&self, view: &View, size: Size) -> Result<(View, Size)> {
        let (width, height) = canvas_cells(size)?;
        let root = view.clone().frame(width as f64, height as f64);
        let measured = root.measure(ProposedSize::fixed(Size::new(width as f64, height as f64)))?;
        Ok((root, measured))
    }

    /// Render into a fresh frame buffer.
    pub fn render_frame(&self, view: &View, size: Size) -> Result<FrameBuffer> {
        let (root, measured) = self.layout(view, size)?;
        let buffer = FrameBuffer::with_background(
            measured.width as u16,
            measured.height as u16,
            self.config.background,
        );
        let mut canvas = CellCanvas::with_state(buffer, self.initial_state());
        root.render(&mut canvas, measured)?;

        tracing::debug!(
            width = measured.width,
            height = measured.height,
            "rendered frame"
        );
        Ok(canvas.into_buffer())
    }

    /// Render and encode as a self-contained document.
    pub fn render(&self, view: &View, size: Size) -> Result<Vec<u8>> {
        let buffer = self.render_frame(view, size)?;
        Ok(encode(&buffer, self.config.encoding)?)
    }

    /// Render into a display list instead of cells.
    pub fn record(&self, view: &View, size: Size) -> Result<Recorder> {
        let (root, measured) = self.layout(view, size)?;
        let mut recorder = Recorder::new();
        recorder.set_fill_color(self.config.fill);
        root.render(&mut recorder, measured)?;
        Ok(recorder)
    }
}

/// Largest canvas, in cells, the driver will allocate.
const MAX_CANVAS_CELLS: usize = u16::MAX as usize * 64;

/// Cell dimensions for a canvas of `size`; partial cells round up.
fn canvas_cells(size: Size) -> Result<(u16, u16)> {
    let limit = u16::MAX as f64;
    let valid = |extent: f64| extent.is_finite() && (0.0..=limit).contains(&extent);
    if !valid(size.width) || !valid(size.height) {
        return Err(Error::InvalidCanvas { size });
    }
    let (width, height) = (size.width.ceil() as u16, size.height.ceil() as u16);
    if width as usize * height as usize > MAX_CANVAS_CELLS {
        return Err(Error::InvalidCanvas { size });
    }
    Ok((width, height))
}

/// Render `view` into a `size` document with the default configuration.
pub fn render(view: &View, size: Size) -> Result<Vec<u8>> {
    Renderer::default().render(view, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Encoding;
    use crate::layout::Rect;
    use crate::primitives::{hstack, rectangle, text};
    use crate::types::Rgba;

    fn plain() -> Renderer {
        Renderer::new(RenderConfig {
            encoding: Encoding::Plain,
            ..RenderConfig::default()
        })
    }

    #[test]
    fn test_render_centers_in_canvas() {
        let view = text("hi");
        let out = plain().render(&view, Size::new(6.0, 3.0)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "      \n  hi  \n      \n");
    }

    #[test]
    fn test_render_frame_fills_cells() {
        let view = hstack([rectangle().fill(Rgba::RED), rectangle().fill(Rgba::BLUE)]);
        let buffer = plain().render_frame(&view, Size::new(4.0, 2.0)).unwrap();
        assert_eq!(buffer.get(0, 0).unwrap().bg, Rgba::RED);
        assert_eq!(buffer.get(1, 1).unwrap().bg, Rgba::RED);
        assert_eq!(buffer.get(2, 0).unwrap().bg, Rgba::BLUE);
        assert_eq!(buffer.get(3, 1).unwrap().bg, Rgba::BLUE);
    }

    #[test]
    fn test_default_render_is_ansi() {
        let out = render(&rectangle().fill(Rgba::GREEN), Size::new(2.0, 1.0)).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("48;2;0;255;0"));
    }

    #[test]
    fn test_invalid_canvas_sizes() {
        for size in [
            Size::new(-1.0, 5.0),
            Size::new(f64::INFINITY, 5.0),
            Size::new(5.0, f64::NAN),
            Size::new(70000.0, 1.0),
            Size::new(65535.0, 65535.0),
            Size::new(4096.0, 4096.0),
        ] {
            let err = render(&rectangle(), size).unwrap_err();
            assert!(matches!(err, Error::InvalidCanvas { .. }), "{size:?}");
        }
    }

    #[test]
    fn test_canvas_area_limit() {
        assert_eq!(canvas_cells(Size::new(65535.0, 64.0)).unwrap(), (65535, 64));
        assert!(canvas_cells(Size::new(65535.0, 65.0)).is_err());
        assert_eq!(canvas_cells(Size::new(1024.0, 1023.5)).unwrap(), (1024, 1024));
    }

    #[test]
    fn test_empty_canvas() {
        let out = plain().render(&rectangle(), Size::ZERO).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_record_starts_from_config_fill() {
        let recorder = plain().record(&rectangle(), Size::new(3.0, 2.0)).unwrap();
        assert_eq!(recorder.fills(), vec![(Rect::new(0.0, 0.0, 3.0, 2.0), Rgba::WHITE)]);
        assert_eq!(recorder.save_depth(), 0);
        assert_eq!(recorder.fill_color(), Rgba::WHITE);
    }
}
