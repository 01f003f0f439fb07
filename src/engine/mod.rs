//! Engine - the node arena behind invalidation.
//!
//! View descriptions are immutable and rebuilt wholesale. What persists
//! between rebuilds is the tree of [`Node`]s, one per re-evaluable scope:
//!
//! ```text
//! Node 0: root body          (needs_rebuild=false)
//! Node 1: ├─ scope at 0      (needs_rebuild=true)   <- read a State that changed
//! Node 2: └─ scope at 1      (needs_rebuild=false)
//! ```
//!
//! State cells remember which nodes read them and flag those nodes when
//! written. A host re-evaluates flagged nodes with [`evaluate`].

mod registry;

pub use registry::*;
