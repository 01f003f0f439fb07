//! Layout - geometry, alignment guides, and stack distribution.
//!
//! Sizing is propose/accept: a parent proposes a [`ProposedSize`], the child
//! answers with the [`Size`] it will occupy. Nothing here knows about
//! specific views; the view protocol lives in [`crate::primitives`].

mod types;
mod text_measure;
mod alignment;
mod stack;

pub use types::*;
pub use text_measure::*;
pub use alignment::{Alignment, AlignmentId, Guide};
pub(crate) use alignment::average;
pub use stack::{LayoutCache, LayoutInfo, StackLayout, distribute};
