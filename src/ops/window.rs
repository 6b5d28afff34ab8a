//! Windowing and dilation transforms.
//!
//! # Crop, Pad, Explode, Implode
//!
//! Grid transforms over whole volumes, each materializing its result from
//! the global pool:
//!
//! - [`crop`] / [`crop_left`] — origin-aligned window
//! - [`crop_right`] — window anchored at the high-index corner
//! - [`pad_zeros`] — embed a volume in a larger zero field
//! - [`sparse_explode`] / [`sparse_implode`] — scatter onto / gather from a
//!   strided lattice, the machinery behind dilated convolution without
//!   max-pooling
//!
//! Every transform validates its window before touching memory and reports
//! [`VolumeError::OutOfBounds`] (or [`VolumeError::BadStride`]) on a bad
//! request; the sources are never read out of range.
//!
//! ## Dual formulations
//!
//! The dilation transforms exist twice. `sparse_explode_ref` and
//! `sparse_implode_ref` are the executable definitions: explicit per-axis
//! nested loops, one element at a time. `sparse_explode` and
//! `sparse_implode` are the production forms, working on whole x-runs with
//! a strided-slice walk and a contiguous fast path when `sparse.x == 1`.
//! The two forms produce identical buffers for every valid input; the test
//! suite pins that equivalence over randomized volumes.

use crate::error::{Result, VolumeError};
use crate::ops::arith::fill;
use crate::pool::VolumeHandle;
use crate::vec3::Vec3i;
use crate::volumes::{Element, Volume};

fn check_stride(sparse: Vec3i) -> Result<()> {
    if sparse.x < 1 || sparse.y < 1 || sparse.z < 1 {
        return Err(VolumeError::BadStride { stride: sparse });
    }
    Ok(())
}

/// Validates that the full `inner * sparse` rectangular prefix fits.
fn check_dilation(inner: Vec3i, sparse: Vec3i, outer: Vec3i) -> Result<()> {
    check_stride(sparse)?;
    let extent = inner * sparse;
    if !extent.fits_within(outer) {
        return Err(VolumeError::OutOfBounds {
            window: extent,
            bounds: outer,
        });
    }
    Ok(())
}

/// Copies the window of shape `s` at offset `off` out of `c`.
fn crop_window<T: Element>(c: &Volume<T>, off: Vec3i, s: Vec3i) -> Result<VolumeHandle<T>> {
    let outer = c.shape();
    if off.x < 0
        || off.y < 0
        || off.z < 0
        || !s.fits_within(outer)
        || !(off + s).fits_within(outer)
    {
        return Err(VolumeError::OutOfBounds {
            window: s,
            bounds: outer,
        });
    }
    let pool = T::global_pool();
    let mut out = pool.checkout(s);
    let rowlen = s.x as usize;
    if rowlen > 0 {
        for z in 0..s.z {
            for y in 0..s.y {
                let src = c.index_of(off.x, y + off.y, z + off.z);
                let dst = out.index_of(0, y, z);
                out.data_mut()[dst..dst + rowlen]
                    .copy_from_slice(&c.data()[src..src + rowlen]);
            }
        }
    }
    Ok(pool.adopt(out))
}

/// The origin-aligned window of shape `s` taken from `c`.
///
/// # Errors
/// [`VolumeError::OutOfBounds`] if `s` exceeds `c`'s shape on any axis.
pub fn crop<T: Element>(c: &Volume<T>, s: Vec3i) -> Result<VolumeHandle<T>> {
    crop_window(c, Vec3i::ZERO, s)
}

/// Alias of [`crop`]: the window anchored at the low-index corner.
pub fn crop_left<T: Element>(c: &Volume<T>, s: Vec3i) -> Result<VolumeHandle<T>> {
    crop(c, s)
}

/// The window of shape `s` anchored at the high-index corner of `c`.
///
/// The per-axis offset is `shape(c) - s`.
///
/// # Errors
/// [`VolumeError::OutOfBounds`] if `s` exceeds `c`'s shape on any axis.
pub fn crop_right<T: Element>(c: &Volume<T>, s: Vec3i) -> Result<VolumeHandle<T>> {
    crop_window(c, c.shape() - s, s)
}

/// Embeds `v` at the origin of a zero-filled volume of shape `s`.
///
/// When `s` equals `v`'s shape this degenerates to a copy and the zero fill
/// is skipped.
///
/// # Errors
/// [`VolumeError::OutOfBounds`] if any axis of `s` is smaller than `v`'s.
pub fn pad_zeros<T: Element>(v: &Volume<T>, s: Vec3i) -> Result<VolumeHandle<T>> {
    let vs = v.shape();
    if !vs.fits_within(s) {
        return Err(VolumeError::OutOfBounds {
            window: vs,
            bounds: s,
        });
    }
    let pool = T::global_pool();
    let mut out = pool.checkout(s);
    if vs != s {
        fill(&mut out, T::ZERO);
    }
    let rowlen = vs.x as usize;
    if rowlen > 0 {
        for z in 0..vs.z {
            for y in 0..vs.y {
                let src = v.index_of(0, y, z);
                let dst = out.index_of(0, y, z);
                out.data_mut()[dst..dst + rowlen]
                    .copy_from_slice(&v.data()[src..src + rowlen]);
            }
        }
    }
    Ok(pool.adopt(out))
}

/// Scatters `v` onto a strided lattice inside a zero-filled volume of
/// shape `s`.
///
/// Element `(x, y, z)` of `v` lands at
/// `(x * sparse.x, y * sparse.y, z * sparse.z)`; every target element off
/// the lattice stays zero. Production form: whole x-runs, strided-slice
/// walk, contiguous copy when `sparse.x == 1`.
///
/// ```rust
/// use volumic::ops::sparse_explode;
/// use volumic::{Vec3i, Volume};
///
/// let v = Volume::from_vec(Vec3i::new(2, 1, 1), vec![3.0f32, 7.0]);
/// let r = sparse_explode(&v, Vec3i::new(2, 1, 1), Vec3i::new(4, 1, 1)).unwrap();
/// assert_eq!(r.data(), &[3.0, 0.0, 7.0, 0.0]);
/// ```
///
/// # Errors
/// [`VolumeError::BadStride`] for a non-positive stride axis;
/// [`VolumeError::OutOfBounds`] if the `shape(v) * sparse` prefix does not
/// fit in `s`.
pub fn sparse_explode<T: Element>(
    v: &Volume<T>,
    sparse: Vec3i,
    s: Vec3i,
) -> Result<VolumeHandle<T>> {
    let vs = v.shape();
    check_dilation(vs, sparse, s)?;
    let pool = T::global_pool();
    let mut r = pool.checkout(s);
    fill(&mut r, T::ZERO);
    let kx = sparse.x as usize;
    let rowlen = vs.x as usize;
    if rowlen > 0 {
        for z in 0..vs.z {
            for y in 0..vs.y {
                let src = v.index_of(0, y, z);
                let src_row = &v.data()[src..src + rowlen];
                let dst = r.index_of(0, y * sparse.y, z * sparse.z);
                if kx == 1 {
                    r.data_mut()[dst..dst + rowlen].copy_from_slice(src_row);
                } else {
                    let span = (rowlen - 1) * kx + 1;
                    let out_row = &mut r.data_mut()[dst..dst + span];
                    for (o, &val) in out_row.iter_mut().step_by(kx).zip(src_row) {
                        *o = val;
                    }
                }
            }
        }
    }
    Ok(pool.adopt(r))
}

/// Reference form of [`sparse_explode`]: explicit per-axis nested loops.
///
/// Kept as the executable definition of the scatter; the test suite asserts
/// it agrees with the production form byte for byte.
pub fn sparse_explode_ref<T: Element>(
    v: &Volume<T>,
    sparse: Vec3i,
    s: Vec3i,
) -> Result<VolumeHandle<T>> {
    let vs = v.shape();
    check_dilation(vs, sparse, s)?;
    let pool = T::global_pool();
    let mut r = pool.checkout(s);
    fill(&mut r, T::ZERO);
    for z in 0..vs.z {
        for y in 0..vs.y {
            for x in 0..vs.x {
                *r.at_mut(x * sparse.x, y * sparse.y, z * sparse.z) = v.at(x, y, z);
            }
        }
    }
    Ok(pool.adopt(r))
}

/// Gathers a strided lattice out of `r` into a dense volume of shape `vs`.
///
/// Element `(x, y, z)` of the result reads `r` at
/// `(x * sparse.x, y * sparse.y, z * sparse.z)` — the inverse of
/// [`sparse_explode`] with the same stride.
///
/// # Errors
/// [`VolumeError::BadStride`] for a non-positive stride axis;
/// [`VolumeError::OutOfBounds`] if the `vs * sparse` prefix does not fit in
/// `r`'s shape.
pub fn sparse_implode<T: Element>(
    r: &Volume<T>,
    sparse: Vec3i,
    vs: Vec3i,
) -> Result<VolumeHandle<T>> {
    check_dilation(vs, sparse, r.shape())?;
    let pool = T::global_pool();
    let mut v = pool.checkout(vs);
    let kx = sparse.x as usize;
    let rowlen = vs.x as usize;
    if rowlen > 0 {
        for z in 0..vs.z {
            for y in 0..vs.y {
                let src = r.index_of(0, y * sparse.y, z * sparse.z);
                let dst = v.index_of(0, y, z);
                if kx == 1 {
                    v.data_mut()[dst..dst + rowlen]
                        .copy_from_slice(&r.data()[src..src + rowlen]);
                } else {
                    let span = (rowlen - 1) * kx + 1;
                    let src_row = &r.data()[src..src + span];
                    let out_row = &mut v.data_mut()[dst..dst + rowlen];
                    for (o, &val) in out_row.iter_mut().zip(src_row.iter().step_by(kx)) {
                        *o = val;
                    }
                }
            }
        }
    }
    Ok(pool.adopt(v))
}

/// Reference form of [`sparse_implode`]: explicit per-axis nested loops.
pub fn sparse_implode_ref<T: Element>(
    r: &Volume<T>,
    sparse: Vec3i,
    vs: Vec3i,
) -> Result<VolumeHandle<T>> {
    check_dilation(vs, sparse, r.shape())?;
    let pool = T::global_pool();
    let mut v = pool.checkout(vs);
    for z in 0..vs.z {
        for y in 0..vs.y {
            for x in 0..vs.x {
                *v.at_mut(x, y, z) = r.at(x * sparse.x, y * sparse.y, z * sparse.z);
            }
        }
    }
    Ok(pool.adopt(v))
}
