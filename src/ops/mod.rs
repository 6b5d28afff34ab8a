//! # Volume Operations
//!
//! Everything the engine does to a volume between layers lives here, in
//! three layers of its own:
//!
//! - [`kernels`] — flat-slice loops: out-of-place binary ops, in-place
//!   compounds, the fused multiply-add family, the reduction
//! - [`arith`] — the operator surface: `std::ops` impls on
//!   [`Volume`](crate::Volume), `mad_*`, `fill`/`flip`/`max`/`min`/`sum`
//! - [`window`] — crop, zero-pad, and the sparse explode/implode dilation
//!   transforms
//!
//! ## Precision policy
//!
//! All operations are generic over [`Element`](crate::Element). The two
//! places precision is pinned deliberately — the `f64` scalar in the
//! multiply-accumulate kernels and the `f64` reciprocal in scalar division —
//! are documented at their definitions and are part of the numeric
//! contract, not incidental.
//!
//! ## Failure policy
//!
//! Hot-path operand mismatches are debug assertions with a documented
//! release-mode contract. Window, stride, and empty-input violations are
//! checked and reported as [`VolumeError`](crate::VolumeError); see
//! [`crate::error`].

pub mod arith;
pub mod kernels;
pub mod window;

pub use arith::{fill, flip, mad_prod_to, mad_self, mad_to, max, min, sum};
pub use window::{
    crop, crop_left, crop_right, pad_zeros, sparse_explode, sparse_explode_ref,
    sparse_implode, sparse_implode_ref,
};
