//! Recorder - a `DrawingContext` that captures a display list.
//!
//! Paths and text origins are recorded in device space, so the command
//! stream can be replayed or inspected without tracking translations.

use crate::layout::{Point, Rect};
use crate::types::{Attr, Rgba};

use super::context::{DrawingContext, GraphicsState, Path, StateStack};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate { dx: f64, dy: f64 },
    SetFillColor(Rgba),
    AddPath(Path),
    /// Fill of the pending paths; `bounds` is their union in device space.
    FillPath { bounds: Rect, color: Rgba },
    ShowText { origin: Point, text: String, attrs: Attr },
}

#[derive(Debug, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
    state: StateStack,
    pending: Vec<Path>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Current graphics state; equal to the initial one after a balanced pass.
    pub fn state(&self) -> GraphicsState {
        *self.state.current()
    }

    pub fn save_depth(&self) -> usize {
        self.state.depth()
    }

    /// Bounds and colors of every fill, in order.
    pub fn fills(&self) -> Vec<(Rect, Rgba)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillPath { bounds, color } => Some((*bounds, *color)),
                _ => None,
            })
            .collect()
    }

    /// Every line of text shown, in order.
    pub fn texts(&self) -> Vec<(Point, &str)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::ShowText { origin, text, .. } => Some((*origin, text.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl DrawingContext for Recorder {
    fn save(&mut self) {
        self.state.save();
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.state.restore();
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let state = self.state.current_mut();
        state.offset = state.offset + Point::new(dx, dy);
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.state.current_mut().fill = color;
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn add_path(&mut self, path: Path) {
        let device = path.translate(self.state.current().offset);
        self.pending.push(device);
        self.commands.push(DrawCommand::AddPath(device));
    }

    fn fill_path(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        let Some(bounds) = pending.iter().map(Path::bounds).reduce(Rect::union) else {
            return;
        };
        self.commands.push(DrawCommand::FillPath {
            bounds,
            color: self.state.current().fill,
        });
    }

    fn show_text(&mut self, origin: Point, text: &str, attrs: Attr) {
        self.commands.push(DrawCommand::ShowText {
            origin: origin + self.state.current().offset,
            text: text.to_string(),
            attrs,
        });
    }

    fn transform(&self) -> Point {
        self.state.current().offset
    }

    fn fill_color(&self) -> Rgba {
        self.state.current().fill
    }
}
