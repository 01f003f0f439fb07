//! Root - host glue between state, nodes, and rendering.
//!
//! A `Root` owns a root node and the body that describes the view. The
//! body is evaluated inside the root node, so any state it reads is
//! tracked. Nested [`scope`]s get their own child nodes, keyed by position,
//! and only record the state they read themselves.
//!
//! ```
//! use spark_views::layout::Size;
//! use spark_views::pipeline::Root;
//! use spark_views::primitives::text;
//! use spark_views::state::State;
//!
//! let name = State::new(String::from("world"));
//! let greeting = name.clone();
//! let mut root = Root::new(move || text(format!("hello {}", greeting.get())));
//!
//! name.set(String::from("there"));
//! assert!(root.needs_rebuild());
//! assert!(root.update());
//! assert!(!root.needs_rebuild());
//! let _bytes = root.render(Size::new(20.0, 1.0)).unwrap();
//! ```

use crate::engine::{Node, child_node, create_node, current_node, evaluate, release_node, subtree_needs_rebuild};
use crate::error::Result;
use crate::layout::Size;
use crate::primitives::View;

use super::render::Renderer;

pub struct Root {
    node: Node,
    body: Box<dyn Fn() -> View>,
    view: View,
    renderer: Renderer,
    rebuilds: usize,
}

impl Root {
    pub fn new(body: impl Fn() -> View + 'static) -> Self {
        Self::with_renderer(Renderer::default(), body)
    }

    pub fn with_renderer(renderer: Renderer, body: impl Fn() -> View + 'static) -> Self {
        let node = create_node();
        let view = evaluate(node, &body);
        Self {
            node,
            body: Box::new(body),
            view,
            renderer,
            rebuilds: 0,
        }
    }

    pub fn node(&self) -> Node {
        self.node
    }

    /// The most recently built description.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Times the body has been re-evaluated since creation.
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Whether any node under this root has been invalidated.
    pub fn needs_rebuild(&self) -> bool {
        subtree_needs_rebuild(self.node)
    }

    /// Re-evaluate the body if anything it depends on changed. Returns
    /// whether it did.
    pub fn update(&mut self) -> bool {
        if !self.needs_rebuild() {
            return false;
        }
        self.view = evaluate(self.node, || (self.body)());
        self.rebuilds += 1;
        tracing::debug!(rebuilds = self.rebuilds, "rebuilt root");
        true
    }

    /// Bring the description up to date and render it.
    pub fn render(&mut self, size: Size) -> Result<Vec<u8>> {
        self.update();
        self.renderer.render(&self.view, size)
    }

    /// Release the root node and everything under it.
    pub fn unmount(self) {}
}

impl Drop for Root {
    fn drop(&mut self) {
        release_node(self.node);
    }
}

/// Evaluate `body` in the child node at `position` of the current node.
///
/// Outside of any evaluation the body runs untracked.
pub fn scope<R>(position: usize, body: impl FnOnce() -> R) -> R {
    match current_node() {
        Some(parent) => evaluate(child_node(parent, position), body),
        None => body(),
    }
}
