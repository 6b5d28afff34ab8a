//! volumic: the numeric substrate for a parallel 3-D convolutional engine.
//!
//! Dense volumetric buffers and the arithmetic and grid-transform kernels
//! that manipulate them: elementwise operators, reductions, cropping and
//! zero-padding, and the sparse explode/implode dilation transforms that
//! implement strided convolution without max-pooling.
//!
//! # Features
//!
//! - [`Volume<T>`](Volume) — contiguous 3-D buffers with `(x, y, z)`
//!   indexing and a deterministic text rendering for diagnostics and golden
//!   tests.
//! - A pooled allocator ([`VolumePool`], [`VolumeHandle`]) recycling buffers
//!   across the intermediate results of forward/backward passes, safe under
//!   concurrent acquisition from worker threads.
//! - An operator surface ([`ops::arith`]) of compound-assignment and binary
//!   arithmetic, fused multiply-adds, fills, and reductions.
//! - Windowing and dilation transforms ([`ops::window`]), each in a
//!   reference nested-loop form and an optimized strided form that agree
//!   exactly.
//! - A reversed-axis boundary ([`boundary`]) matching external row-major
//!   array conventions without copying.
//!
//! # Goals
//!
//! - Numerically exact, documented primitives: where precision or
//!   evaluation order matters it is pinned, never incidental.
//! - Hot-path performance: operand contracts are debug assertions, not
//!   branches; allocation goes through the reuse pool.
//! - Checked boundaries everywhere a caller bug could otherwise read out of
//!   range silently.
//!
//! # Modules
//!
//! - [`volumes`] — `Volume`, `VolumeView`, the `Element` trait
//! - [`pool`] — the reuse pool and shared handles
//! - [`ops`] — kernels, operator surface, windowing/dilation
//! - [`boundary`] — the external dense-array convention
//! - [`vec3`], [`error`] — shape triples and error types
//!
//! # Example
//!
//! ```rust
//! use volumic::ops::{sparse_explode, sparse_implode, sum};
//! use volumic::{Vec3i, Volume};
//!
//! let v = Volume::from_vec(Vec3i::new(2, 2, 2), (1..=8).map(|i| i as f32).collect());
//! let fat = sparse_explode(&v, Vec3i::new(2, 1, 1), Vec3i::new(4, 2, 2)).unwrap();
//! let back = sparse_implode(&fat, Vec3i::new(2, 1, 1), v.shape()).unwrap();
//! assert_eq!(back.data(), v.data());
//! assert_eq!(sum(&v), 36.0);
//! ```

pub mod boundary;
pub mod error;
pub mod ops;
pub mod pool;
pub mod vec3;
pub mod volumes;

pub use error::{Result, VolumeError};
pub use pool::{get_volume, PoolStats, VolumeHandle, VolumePool};
pub use vec3::Vec3i;
pub use volumes::{Element, Real, Volume, VolumeView};
