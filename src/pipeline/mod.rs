//! Pipeline
//!
//! Connects view descriptions to output.
//!
//! ```text
//! body() → View → measure → render → FrameBuffer → encode → bytes
//!    ↑
//! State write → Node.needs_rebuild → Root::update
//! ```
//!
//! - [`Renderer`] / [`render`] - one full measure + render pass
//! - [`Root`] - owns the root node and re-evaluates its body when any node
//!   under it is invalidated
//! - [`scope`] - evaluate a nested body in its own child node

mod render;
mod root;

pub use render::{Renderer, render};
pub use root::{Root, scope};
