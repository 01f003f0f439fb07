//! View primitives - the building blocks of a view description.
//!
//! - [`rectangle`] / [`ellipse`] - shapes that fill what they are offered
//! - [`text`] - wrapped text
//! - [`hstack`] / [`vstack`] - rows and columns
//! - modifiers on [`View`] - fills, frames, borders, alignment guides,
//!   layout priority, overlays, type erasure
//! - [`geometry_reader`] - content built from the size it is given
//!
//! Every view implements [`Element`]: `measure` under a proposal, then
//! `render` at the accepted size.
//!
//! ```
//! use spark_views::layout::{ProposedSize, Size};
//! use spark_views::primitives::{Element, hstack, rectangle, text};
//! use spark_views::types::Rgba;
//!
//! let row = hstack([rectangle().fill(Rgba::RED).frame(4.0, 2.0), text("hi")]);
//! let size = row.measure(ProposedSize::fixed(Size::new(20.0, 5.0))).unwrap();
//! assert_eq!(size, Size::new(6.0, 2.0));
//! ```

mod types;
mod view;
mod shape;
mod text;
mod frame;
mod overlay;
mod stack;

use std::rc::Rc;

use crate::layout::Size;

pub use types::*;
pub use view::View;
pub use shape::{Border, ColorFill, Shape};
pub use text::{CellText, Text, TextSystem};
pub use frame::{AlignmentGuideOverride, FixedFrame, FlexibleFrame, FrameBounds, LayoutPriority};
pub use overlay::{ContentFn, GeometryReader, Overlay};
pub use stack::Stack;

pub fn rectangle() -> View {
    View::Shape(Shape::Rectangle)
}

pub fn ellipse() -> View {
    View::Shape(Shape::Ellipse)
}

pub fn text(content: impl Into<Rc<str>>) -> View {
    View::Text(Text::new(content))
}

/// Takes the proposed size and builds `content` from the accepted one.
pub fn geometry_reader(content: impl Fn(Size) -> View + 'static) -> View {
    View::GeometryReader(GeometryReader::new(content))
}

/// Children side by side, centered vertically.
pub fn hstack(children: impl IntoIterator<Item = View>) -> View {
    View::Stack(Stack::horizontal(children))
}

/// Children top to bottom, centered horizontally.
pub fn vstack(children: impl IntoIterator<Item = View>) -> View {
    View::Stack(Stack::vertical(children))
}
