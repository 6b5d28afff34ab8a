//! The external dense-array boundary.
//!
//! The host-language binding hands volumes to callers as plain row-major
//! numeric arrays. Internally a volume is indexed `(x, y, z)` with x the
//! fastest axis, which is exactly a row-major array of shape `(z, y, x)` —
//! so crossing the boundary is a shape-tuple reversal over the same flat
//! buffer, never a transpose copy.
//!
//! The reversal is compatibility-critical: emitting the tuple in internal
//! order silently transposes every exported result. [`array_shape`] and
//! [`view_from_array`] are the only two places the convention lives.
//!
//! Imported memory is wrapped in a non-owning [`VolumeView`] rather than a
//! pooled volume: the caller keeps ownership, nothing is refcounted, and
//! [`VolumeView::materialize`] is the explicit copy into pool-managed
//! storage when the engine needs one.

use crate::error::Result;
use crate::vec3::Vec3i;
use crate::volumes::{Element, Volume, VolumeView};

/// The shape of `v` as seen by an external row-major array: `(z, y, x)`.
pub fn array_shape<T: Element>(v: &Volume<T>) -> [usize; 3] {
    let s = v.shape();
    [s.z as usize, s.y as usize, s.x as usize]
}

/// Exports `v` as a reversed-axis shape plus its flat buffer.
///
/// Zero-copy: the buffer already is the external array's row-major storage.
pub fn export<T: Element>(v: &Volume<T>) -> ([usize; 3], &[T]) {
    (array_shape(v), v.data())
}

/// Wraps an external row-major array of shape `(z, y, x)` in a view.
///
/// # Errors
/// [`VolumeError::ElementCountMismatch`](crate::VolumeError) if the buffer
/// length disagrees with the shape product.
pub fn view_from_array<T: Element>(data: &[T], shape: [usize; 3]) -> Result<VolumeView<'_, T>> {
    let internal = Vec3i::new(shape[2] as i64, shape[1] as i64, shape[0] as i64);
    VolumeView::new(internal, data)
}
