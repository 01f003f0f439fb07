//! Error types.

use thiserror::Error;

use crate::layout::{Axis, Size};

/// A view was asked to do something its sizing contract does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    /// A stack needs a concrete extent along its main axis to distribute.
    #[error("{axis} stack was proposed an unconstrained {axis} extent")]
    UnconstrainedProposal { axis: Axis },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("canvas size {size:?} must be finite, non-negative, and fit in a terminal frame")]
    InvalidCanvas { size: Size },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
