//! The volume operator surface.
//!
//! # Arithmetic Operators
//!
//! The ergonomic API the surrounding engine computes with, built on the
//! kernels in [`super::kernels`]:
//!
//! - compound assignment (`+=`, `-=`, `*=`, `/=`) mutating a [`Volume`] in
//!   place, with scalar and volume right-hand sides
//! - binary `+`, `-`, `*`, `/` on `&Volume`, allocating the result from the
//!   global pool and returning an owning [`VolumeHandle`]
//! - the fused multiply-add family ([`mad_to`], [`mad_prod_to`],
//!   [`mad_self`])
//! - [`fill`], [`flip`], [`max`], [`min`], [`sum`]
//!
//! ## Operand contract
//!
//! Binary arithmetic between two volumes requires identical total element
//! counts (per-axis shapes need not match). The check is a `debug_assert!`:
//! these operators sit on the hot path of every forward and backward pass,
//! so release builds document the precondition instead of paying for it.
//! With mismatched counts in release mode the result is unspecified (the
//! zipped kernels stop at the shorter operand), never a memory fault.
//!
//! ## Scalar division
//!
//! `/= c` does not divide per element. It computes `1.0 / c` once at `f64`,
//! casts to the element type, and multiplies. The reciprocal-multiply and
//! the `f64` width of the intermediate are part of the numeric contract.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use crate::error::{Result, VolumeError};
use crate::ops::kernels;
use crate::pool::VolumeHandle;
use crate::volumes::{Element, Real, Volume};

impl<T: Element> AddAssign<T> for Volume<T> {
    fn add_assign(&mut self, c: T) {
        kernels::add_scalar(self.data_mut(), c);
    }
}

impl<T: Element> SubAssign<T> for Volume<T> {
    fn sub_assign(&mut self, c: T) {
        kernels::sub_scalar(self.data_mut(), c);
    }
}

impl<T: Element> MulAssign<T> for Volume<T> {
    fn mul_assign(&mut self, c: T) {
        kernels::mul_scalar(self.data_mut(), c);
    }
}

/// Reciprocal-multiply scalar division; see the module docs.
impl<T: Element> DivAssign<T> for Volume<T> {
    fn div_assign(&mut self, c: T) {
        let one_over_c = 1.0f64 / c.to_f64();
        kernels::mul_scalar(self.data_mut(), T::from_f64(one_over_c));
    }
}

impl<T: Element> AddAssign<&Volume<T>> for Volume<T> {
    fn add_assign(&mut self, rhs: &Volume<T>) {
        debug_assert_eq!(
            self.num_elements(),
            rhs.num_elements(),
            "operand element counts differ"
        );
        kernels::add_slice(self.data_mut(), rhs.data());
    }
}

impl<T: Element> SubAssign<&Volume<T>> for Volume<T> {
    fn sub_assign(&mut self, rhs: &Volume<T>) {
        debug_assert_eq!(
            self.num_elements(),
            rhs.num_elements(),
            "operand element counts differ"
        );
        kernels::sub_slice(self.data_mut(), rhs.data());
    }
}

impl<T: Element> MulAssign<&Volume<T>> for Volume<T> {
    fn mul_assign(&mut self, rhs: &Volume<T>) {
        debug_assert_eq!(
            self.num_elements(),
            rhs.num_elements(),
            "operand element counts differ"
        );
        kernels::mul_slice(self.data_mut(), rhs.data());
    }
}

/// Elementwise sum into a pooled result; operands untouched.
///
/// ```rust
/// use volumic::{Vec3i, Volume};
///
/// let a = Volume::from_vec(Vec3i::new(2, 1, 1), vec![1.0f32, 2.0]);
/// let b = Volume::from_vec(Vec3i::new(2, 1, 1), vec![10.0f32, 20.0]);
/// let c = &a + &b;
/// assert_eq!(c.data(), &[11.0, 22.0]);
/// ```
impl<'a, 'b, T: Element> Add<&'b Volume<T>> for &'a Volume<T> {
    type Output = VolumeHandle<T>;

    fn add(self, rhs: &'b Volume<T>) -> VolumeHandle<T> {
        debug_assert_eq!(
            self.num_elements(),
            rhs.num_elements(),
            "operand element counts differ"
        );
        let pool = T::global_pool();
        let mut r = pool.checkout(self.shape());
        kernels::add_two(self.data(), rhs.data(), r.data_mut());
        pool.adopt(r)
    }
}

impl<'a, 'b, T: Element> Sub<&'b Volume<T>> for &'a Volume<T> {
    type Output = VolumeHandle<T>;

    fn sub(self, rhs: &'b Volume<T>) -> VolumeHandle<T> {
        debug_assert_eq!(
            self.num_elements(),
            rhs.num_elements(),
            "operand element counts differ"
        );
        let pool = T::global_pool();
        let mut r = pool.checkout(self.shape());
        kernels::sub_two(self.data(), rhs.data(), r.data_mut());
        pool.adopt(r)
    }
}

impl<'a, 'b, T: Element> Mul<&'b Volume<T>> for &'a Volume<T> {
    type Output = VolumeHandle<T>;

    fn mul(self, rhs: &'b Volume<T>) -> VolumeHandle<T> {
        debug_assert_eq!(
            self.num_elements(),
            rhs.num_elements(),
            "operand element counts differ"
        );
        let pool = T::global_pool();
        let mut r = pool.checkout(self.shape());
        kernels::mul_two(self.data(), rhs.data(), r.data_mut());
        pool.adopt(r)
    }
}

impl<'a, 'b, T: Element> Div<&'b Volume<T>> for &'a Volume<T> {
    type Output = VolumeHandle<T>;

    fn div(self, rhs: &'b Volume<T>) -> VolumeHandle<T> {
        debug_assert_eq!(
            self.num_elements(),
            rhs.num_elements(),
            "operand element counts differ"
        );
        let pool = T::global_pool();
        let mut r = pool.checkout(self.shape());
        kernels::div_two(self.data(), rhs.data(), r.data_mut());
        pool.adopt(r)
    }
}

/// `o += a * x`, scalar at `f64`, accumulation order literal.
pub fn mad_to<T: Element>(a: f64, x: &Volume<T>, o: &mut Volume<T>) {
    debug_assert_eq!(
        x.num_elements(),
        o.num_elements(),
        "operand element counts differ"
    );
    kernels::mad_to(a, x.data(), o.data_mut());
}

/// `o += a * b`, elementwise product accumulated in native precision.
pub fn mad_prod_to<T: Element>(a: &Volume<T>, b: &Volume<T>, o: &mut Volume<T>) {
    debug_assert_eq!(
        a.num_elements(),
        b.num_elements(),
        "operand element counts differ"
    );
    debug_assert_eq!(
        b.num_elements(),
        o.num_elements(),
        "operand element counts differ"
    );
    kernels::mad_prod(a.data(), b.data(), o.data_mut());
}

/// `o += a * o`, scalar at `f64`.
pub fn mad_self<T: Element>(a: f64, o: &mut Volume<T>) {
    kernels::mad_self(a, o.data_mut());
}

/// Broadcasts `c` into every element of `v`.
pub fn fill<T: Element>(v: &mut Volume<T>, c: T) {
    v.data_mut().fill(c);
}

/// Reverses the **flat memory order** of the buffer.
///
/// This is not a per-axis geometric flip: element `(x, y, z)` swaps with
/// the element at the mirrored flat offset, whatever coordinate that falls
/// on. Callers needing a true axis reversal must not use this. Defined only
/// for the default working precision, matching its single consumer.
pub fn flip(v: &mut Volume<Real>) {
    v.data_mut().reverse();
}

/// The largest element of `v`.
///
/// # Errors
/// [`VolumeError::EmptyInput`] if `v` has no elements.
pub fn max<T: Element>(v: &Volume<T>) -> Result<T> {
    let mut it = v.data().iter();
    let first = *it.next().ok_or(VolumeError::EmptyInput)?;
    Ok(it.fold(first, |m, &x| if x > m { x } else { m }))
}

/// The smallest element of `v`.
///
/// # Errors
/// [`VolumeError::EmptyInput`] if `v` has no elements.
pub fn min<T: Element>(v: &Volume<T>) -> Result<T> {
    let mut it = v.data().iter();
    let first = *it.next().ok_or(VolumeError::EmptyInput)?;
    Ok(it.fold(first, |m, &x| if x < m { x } else { m }))
}

/// Sum of all elements; plain sequential accumulation from zero.
pub fn sum<T: Element>(v: &Volume<T>) -> T {
    kernels::sum(v.data())
}
