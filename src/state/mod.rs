//! State Module - reactive state that invalidates nodes
//!
//! - **State** - Mutable cell; reads record the current node, writes flag
//!   every recorded node for rebuild
//! - **Binding** - Get/set pair over a State or an object field
//! - **ObservedObject** - External object that flags its latest reader when
//!   it announces a change

mod binding;
mod cell;
mod observed;

pub use binding::*;
pub use cell::*;
pub use observed::*;
