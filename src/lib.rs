//! # spark-views
//!
//! Declarative view descriptions with propose/accept layout and
//! fine-grained invalidation.
//!
//! ## Architecture
//!
//! A view is an immutable description, rebuilt wholesale whenever the state
//! it was built from changes. Layout is two passes over that description:
//!
//! ```text
//! measure(proposed) → size        (top-down, per distinct proposal)
//! render(context, size)           (top-down, with the accepted sizes)
//! ```
//!
//! What persists across rebuilds is a tree of nodes, one per scope. State
//! cells remember which nodes read them and flag exactly those nodes for
//! rebuild when written.
//!
//! ## Modules
//!
//! - [`types`] - Colors, cell attributes, cells
//! - [`layout`] - Geometry, alignment guides, stack distribution
//! - [`primitives`] - The view protocol and the built-in views
//! - [`renderer`] - Drawing contexts, frame buffer, output encoding
//! - [`engine`] - Node arena and evaluation stack
//! - [`state`] - State cells, bindings, observed objects
//! - [`pipeline`] - Rendering driver and host glue
//! - [`config`] - Render configuration

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{Encoding, RenderConfig};
pub use error::{Error, LayoutError, Result};

pub use engine::{
    Node, create_node, current_node, evaluate, mark_needs_rebuild, needs_rebuild, release_node,
};

pub use layout::{Alignment, AlignmentId, Axis, Guide, Point, ProposedSize, Rect, Size};

pub use primitives::{
    AnyView, Element, FrameBounds, Stack, Text, TextSystem, View, ellipse, geometry_reader, hstack,
    rectangle, text, vstack,
};

pub use renderer::{DrawingContext, FrameBuffer, Recorder};

pub use pipeline::{Renderer, Root, render, scope};

pub use state::{Binding, ObservedObject, Observable, Publisher, State, Tracked};
