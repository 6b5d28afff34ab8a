//! Flat-buffer elementwise kernels.
//!
//! # Kernel Library
//!
//! Single-pass loops over flat slices of equal length. These are the lowest
//! layer of the crate: everything in [`super::arith`] and
//! [`super::window`] bottoms out here.
//!
//! ## Contract
//!
//! - Operand slices must have equal lengths and must not alias; both are the
//!   caller's responsibility. The zipped iteration stops at the shortest
//!   slice, so a length violation produces unspecified results rather than a
//!   fault — callers assert lengths at their own boundary.
//! - The out-of-place binary kernels (`add_two`, `sub_two`, `mul_two`,
//!   `div_two`) are elementwise and order-independent, and run on the rayon
//!   pool; their results are identical to a sequential pass.
//! - The accumulate kernels (`mad_to`, `mad_prod`, `mad_self`) and the
//!   reduction (`sum`) are strictly sequential: their per-element
//!   accumulation order is part of the observable contract.
//! - `mad_to` and `mad_self` take their scalar at `f64` and perform each
//!   element's accumulate in `f64` before rounding back to the element type,
//!   which bounds the compounding rounding error over the long accumulation
//!   chains a training pass produces.
//! - `sum` is a plain left-to-right accumulation from zero with no
//!   compensation; downstream consumers calibrate against exactly that, so
//!   it must not be swapped for a pairwise or compensated scheme.

use rayon::prelude::*;

use crate::volumes::Element;

/// `r[i] = a[i] + b[i]`, out of place.
pub fn add_two<T: Element>(a: &[T], b: &[T], r: &mut [T]) {
    r.par_iter_mut()
        .zip(a.par_iter())
        .zip(b.par_iter())
        .for_each(|((r, &a), &b)| *r = a + b);
}

/// `r[i] = a[i] - b[i]`, out of place.
pub fn sub_two<T: Element>(a: &[T], b: &[T], r: &mut [T]) {
    r.par_iter_mut()
        .zip(a.par_iter())
        .zip(b.par_iter())
        .for_each(|((r, &a), &b)| *r = a - b);
}

/// `r[i] = a[i] * b[i]`, out of place.
pub fn mul_two<T: Element>(a: &[T], b: &[T], r: &mut [T]) {
    r.par_iter_mut()
        .zip(a.par_iter())
        .zip(b.par_iter())
        .for_each(|((r, &a), &b)| *r = a * b);
}

/// `r[i] = a[i] / b[i]`, out of place.
pub fn div_two<T: Element>(a: &[T], b: &[T], r: &mut [T]) {
    r.par_iter_mut()
        .zip(a.par_iter())
        .zip(b.par_iter())
        .for_each(|((r, &a), &b)| *r = a / b);
}

/// `a[i] += c`, in place.
pub fn add_scalar<T: Element>(a: &mut [T], c: T) {
    for v in a.iter_mut() {
        *v += c;
    }
}

/// `a[i] -= c`, in place.
pub fn sub_scalar<T: Element>(a: &mut [T], c: T) {
    for v in a.iter_mut() {
        *v -= c;
    }
}

/// `a[i] *= c`, in place.
pub fn mul_scalar<T: Element>(a: &mut [T], c: T) {
    for v in a.iter_mut() {
        *v *= c;
    }
}

/// `a[i] += v[i]`, in place.
pub fn add_slice<T: Element>(a: &mut [T], v: &[T]) {
    for (a, &v) in a.iter_mut().zip(v) {
        *a += v;
    }
}

/// `a[i] -= v[i]`, in place.
pub fn sub_slice<T: Element>(a: &mut [T], v: &[T]) {
    for (a, &v) in a.iter_mut().zip(v) {
        *a -= v;
    }
}

/// `a[i] *= v[i]`, in place.
pub fn mul_slice<T: Element>(a: &mut [T], v: &[T]) {
    for (a, &v) in a.iter_mut().zip(v) {
        *a *= v;
    }
}

/// `o[i] += a * x[i]` with the scalar held at `f64`.
///
/// Each element's accumulate is computed in `f64` and rounded once on the
/// store. Sequential; the per-element order is the contract.
pub fn mad_to<T: Element>(a: f64, x: &[T], o: &mut [T]) {
    for (o, &x) in o.iter_mut().zip(x) {
        *o = T::from_f64(o.to_f64() + a * x.to_f64());
    }
}

/// `o[i] += a[i] * b[i]` in the native element precision. Sequential.
pub fn mad_prod<T: Element>(a: &[T], b: &[T], o: &mut [T]) {
    for ((o, &a), &b) in o.iter_mut().zip(a).zip(b) {
        *o += a * b;
    }
}

/// `o[i] += a * o[i]` with the scalar held at `f64`. Sequential.
pub fn mad_self<T: Element>(a: f64, o: &mut [T]) {
    for v in o.iter_mut() {
        *v = T::from_f64(v.to_f64() + a * v.to_f64());
    }
}

/// Left-to-right sum from the additive identity. No compensation.
pub fn sum<T: Element>(a: &[T]) -> T {
    let mut r = T::ZERO;
    for &v in a {
        r += v;
    }
    r
}
