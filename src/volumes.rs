//! Dense volumetric buffers.
//!
//! # Core Volume Types
//!
//! This module defines the dense 3-D array every kernel in this crate
//! computes on, together with the element trait that fixes which scalar
//! types may inhabit it.
//!
//! It provides:
//! - [`Volume<T>`] — an owning, contiguous 3-D buffer with `(x, y, z)`
//!   indexing
//! - [`VolumeView<T>`] — a non-owning view over externally owned memory with
//!   the same indexing contract
//! - [`Element`] — the floating-point element trait (`f32`, `f64`)
//! - [`Real`] — the crate's default working precision
//! - a deterministic [`Display`](std::fmt::Display) rendering used for
//!   diagnostics and golden-file comparisons
//!
//! ## Memory layout
//!
//! Storage is contiguous with **x varying fastest**, then y, then z:
//! the element at `(x, y, z)` lives at flat offset `(z * sy + y) * sx + x`.
//! An external row-major array therefore sees the same buffer under the
//! reversed shape `(z, y, x)` with no copying; see [`crate::boundary`].
//!
//! ## Ownership
//!
//! A `Volume` always owns its buffer. Shared, pool-recycled ownership is the
//! job of [`crate::pool::VolumeHandle`]; borrowing foreign memory is the job
//! of [`VolumeView`]. The three are deliberately distinct types so that
//! ownership is never ambiguous at a call site.
//!
//! ## Example
//!
//! ```rust
//! use volumic::{Vec3i, Volume};
//!
//! let v: Volume<f32> = Volume::from_vec(
//!     Vec3i::new(2, 2, 2),
//!     (1..=8).map(|i| i as f32).collect(),
//! );
//! assert_eq!(v.at(1, 0, 0), 2.0); // x is the fastest axis
//! assert_eq!(v.at(0, 0, 1), 5.0);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Sub, SubAssign};
use std::sync::Arc;

use crate::error::{Result, VolumeError};
use crate::pool::{self, VolumeHandle, VolumePool};
use crate::vec3::Vec3i;

/// Scalar types a [`Volume`] may hold.
///
/// Implemented for `f32` and `f64`. The trait carries the conversions the
/// mixed-precision accumulate kernels need and the per-precision global pool
/// the operator surface allocates from.
pub trait Element:
    Copy
    + Send
    + Sync
    + PartialOrd
    + fmt::Display
    + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + 'static
{
    /// The additive identity.
    const ZERO: Self;

    /// Narrowing conversion from `f64`.
    fn from_f64(v: f64) -> Self;

    /// Widening conversion to `f64`.
    fn to_f64(self) -> f64;

    /// The process-wide reuse pool for this precision.
    fn global_pool() -> Arc<VolumePool<Self>>;
}

impl Element for f32 {
    const ZERO: Self = 0.0;

    fn from_f64(v: f64) -> Self {
        v as f32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn global_pool() -> Arc<VolumePool<f32>> {
        pool::global_f32()
    }
}

impl Element for f64 {
    const ZERO: Self = 0.0;

    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn global_pool() -> Arc<VolumePool<f64>> {
        pool::global_f64()
    }
}

/// The default working precision.
///
/// The surrounding engine computes in single precision; double-precision
/// volumes remain available explicitly as `Volume<f64>`.
pub type Real = f32;

/// An owning dense 3-D array with `(x, y, z)` indexing.
///
/// The flat buffer is contiguous with x fastest (see the module docs).
/// Construction asserts that the buffer length matches the shape's element
/// count; past that boundary the shape/length agreement is an invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume<T> {
    shape: Vec3i,
    data: Vec<T>,
}

impl<T: Element> Volume<T> {
    /// Creates a zero-filled volume of the given shape.
    pub fn new(shape: Vec3i) -> Self {
        Self {
            shape,
            data: vec![T::ZERO; shape.num_elements()],
        }
    }

    /// Creates a volume over an existing flat buffer.
    ///
    /// The buffer must be in this crate's layout: x fastest, then y, then z.
    ///
    /// # Panics
    /// Panics if `data.len()` differs from the shape's element count.
    pub fn from_vec(shape: Vec3i, data: Vec<T>) -> Self {
        assert_eq!(
            shape.num_elements(),
            data.len(),
            "shape {} is incompatible with {} data elements",
            shape,
            data.len()
        );
        Self { shape, data }
    }

    /// The per-axis extents.
    pub fn shape(&self) -> Vec3i {
        self.shape
    }

    /// Total element count.
    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    /// The flat buffer, x fastest.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the flat buffer.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Flat offset of `(x, y, z)`.
    ///
    /// No bounds checking beyond the slice access a caller performs with the
    /// result; coordinates are trusted.
    #[inline]
    pub fn index_of(&self, x: i64, y: i64, z: i64) -> usize {
        ((z * self.shape.y + y) * self.shape.x + x) as usize
    }

    /// The element at `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the shape.
    #[inline]
    pub fn at(&self, x: i64, y: i64, z: i64) -> T {
        self.data[self.index_of(x, y, z)]
    }

    /// Mutable reference to the element at `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the shape.
    #[inline]
    pub fn at_mut(&mut self, x: i64, y: i64, z: i64) -> &mut T {
        let i = self.index_of(x, y, z);
        &mut self.data[i]
    }

    /// Detaches the flat buffer, leaving the volume empty.
    ///
    /// Used by the pool to reclaim storage on the last handle drop.
    pub(crate) fn take_data(&mut self) -> Vec<T> {
        self.shape = Vec3i::ZERO;
        std::mem::take(&mut self.data)
    }
}

/// A non-owning view over externally owned memory.
///
/// Exposes the same shape/indexing/rendering contract as [`Volume`] but
/// never enters the reuse pool and never participates in reference
/// counting. This is the type the host-language boundary wraps foreign
/// arrays in; see [`crate::boundary::view_from_array`].
#[derive(Debug, Clone, Copy)]
pub struct VolumeView<'a, T> {
    shape: Vec3i,
    data: &'a [T],
}

impl<'a, T: Element> VolumeView<'a, T> {
    /// Wraps a borrowed flat buffer in a view of the given shape.
    ///
    /// Unlike [`Volume::from_vec`], a length disagreement here reports as an
    /// error: the buffer typically comes from outside the process, so it is
    /// input to validate rather than an invariant to assert.
    pub fn new(shape: Vec3i, data: &'a [T]) -> Result<Self> {
        let expected = shape.num_elements();
        if data.len() != expected {
            return Err(VolumeError::ElementCountMismatch {
                shape,
                expected,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// The per-axis extents.
    pub fn shape(&self) -> Vec3i {
        self.shape
    }

    /// Total element count.
    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    /// The borrowed flat buffer, x fastest.
    pub fn data(&self) -> &'a [T] {
        self.data
    }

    /// Flat offset of `(x, y, z)`.
    #[inline]
    pub fn index_of(&self, x: i64, y: i64, z: i64) -> usize {
        ((z * self.shape.y + y) * self.shape.x + x) as usize
    }

    /// The element at `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the shape.
    #[inline]
    pub fn at(&self, x: i64, y: i64, z: i64) -> T {
        self.data[self.index_of(x, y, z)]
    }

    /// Copies the viewed data into a pooled volume of the same shape.
    pub fn materialize(&self) -> VolumeHandle<T> {
        let pool = T::global_pool();
        let mut vol = pool.checkout(self.shape);
        vol.data_mut().copy_from_slice(self.data);
        pool.adopt(vol)
    }
}

/// Shared rendering for volumes and views.
///
/// z blocks separated by a blank line, x rows separated by a newline, y
/// values separated by a single space, no trailing separators. The exact
/// order and separators are an observable contract relied on by golden
/// comparisons; do not restyle.
fn fmt_grid<T: fmt::Display + Copy>(
    f: &mut fmt::Formatter<'_>,
    shape: Vec3i,
    data: &[T],
) -> fmt::Result {
    let (sx, sy, sz) = (shape.x, shape.y, shape.z);
    for z in 0..sz {
        if z > 0 {
            f.write_str("\n\n")?;
        }
        for x in 0..sx {
            if x > 0 {
                f.write_str("\n")?;
            }
            for y in 0..sy {
                if y > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", data[((z * sy + y) * sx + x) as usize])?;
            }
        }
    }
    Ok(())
}

impl<T: Element> fmt::Display for Volume<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_grid(f, self.shape, &self.data)
    }
}

impl<T: Element> fmt::Display for VolumeView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_grid(f, self.shape, self.data)
    }
}
