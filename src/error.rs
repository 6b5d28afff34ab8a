//! Error types for the checked failure paths.
//!
//! The hot-path elementwise operators deliberately do not return errors;
//! their operand contracts are `debug_assert!`ed and documented. Everything
//! that validates a window, a stride, or an externally supplied buffer
//! reports through [`VolumeError`] instead.

use crate::vec3::Vec3i;

/// Failures surfaced by windowing, dilation, reductions, and views.
#[derive(Debug, thiserror::Error)]
pub enum VolumeError {
    /// A buffer's length disagrees with the element count its shape implies.
    #[error("shape {shape} holds {expected} elements, got {got}")]
    ElementCountMismatch {
        shape: Vec3i,
        expected: usize,
        got: usize,
    },

    /// A crop/pad/dilation window does not fit inside its source or target.
    #[error("window extent {window} does not fit within {bounds}")]
    OutOfBounds { window: Vec3i, bounds: Vec3i },

    /// A sparse stride had a zero or negative axis.
    #[error("sparse stride {stride} must be positive on every axis")]
    BadStride { stride: Vec3i },

    /// A reduction that needs at least one element was given none.
    #[error("reduction over an empty volume")]
    EmptyInput,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VolumeError>;
