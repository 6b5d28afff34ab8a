//! Pooled allocation of volume buffers.
//!
//! # Volume Reuse Pool
//!
//! Forward and backward passes materialize a steady stream of intermediate
//! volumes; allocating each one from the system allocator would dominate the
//! cost of the arithmetic itself. [`VolumePool`] keeps per-size free lists
//! of retired buffers and hands them back out on the next request of the
//! same element count.
//!
//! ## Contract
//!
//! - [`VolumePool::acquire`] returns a [`VolumeHandle`] whose contents are
//!   **zero or arbitrary**: a fresh buffer is zeroed, a reused one still
//!   carries its previous values. Callers that need zeros must fill.
//! - A handle is shared ownership: [`Clone`] bumps a reference count, and
//!   the buffer returns to the pool's free list when the last clone drops.
//! - The pool is safe to call from any number of worker threads; the free
//!   lists sit behind a mutex and the hit/miss counters are atomic.
//!
//! A process-wide pool per precision backs the non-mutating operator
//! surface; [`get_volume`] reaches it directly.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::{debug, trace};

use crate::vec3::Vec3i;
use crate::volumes::{Element, Volume};

/// Snapshot of a pool's allocation counters.
#[derive(Debug, Clone, Copy)]
pub struct PoolStats {
    /// Buffers currently sitting in the free lists.
    pub cached_buffers: usize,
    /// Total elements held across all cached buffers.
    pub cached_elements: usize,
    /// Acquisitions served from the free lists.
    pub hits: u64,
    /// Acquisitions that fell through to a fresh allocation.
    pub misses: u64,
}

/// A thread-safe reuse pool for volume buffers of one element type.
///
/// Free lists are keyed by element count: a buffer is shape-agnostic
/// storage, and the shape is metadata reapplied when the buffer is next
/// checked out.
pub struct VolumePool<T: Element> {
    buckets: Mutex<HashMap<usize, Vec<Vec<T>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T: Element> VolumePool<T> {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Acquires a volume of the given shape as a shared handle.
    ///
    /// The contents are zero for a fresh buffer and arbitrary for a reused
    /// one; see the module docs.
    pub fn acquire(self: &Arc<Self>, shape: Vec3i) -> VolumeHandle<T> {
        let vol = self.checkout(shape);
        self.adopt(vol)
    }

    /// Checks a plain [`Volume`] out of the pool for in-place construction.
    ///
    /// Transforms use this to build a result with exclusive access before
    /// wrapping it in a shared handle via [`adopt`](Self::adopt).
    pub(crate) fn checkout(&self, shape: Vec3i) -> Volume<T> {
        let n = shape.num_elements();
        let reused = self
            .buckets
            .lock()
            .expect("volume pool mutex poisoned")
            .get_mut(&n)
            .and_then(Vec::pop);
        match reused {
            Some(buf) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(elements = n, "volume pool hit");
                Volume::from_vec(shape, buf)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!(elements = n, "volume pool miss");
                Volume::new(shape)
            }
        }
    }

    /// Wraps an already-built volume in a shared handle tied to this pool.
    pub(crate) fn adopt(self: &Arc<Self>, vol: Volume<T>) -> VolumeHandle<T> {
        VolumeHandle {
            inner: Arc::new(Pooled {
                vol,
                pool: Arc::clone(self),
            }),
        }
    }

    /// Returns a retired buffer to the free list for its size.
    fn reclaim(&self, buf: Vec<T>) {
        if buf.is_empty() {
            return;
        }
        let n = buf.len();
        self.buckets
            .lock()
            .expect("volume pool mutex poisoned")
            .entry(n)
            .or_default()
            .push(buf);
    }

    /// Drops every cached buffer, releasing the memory to the allocator.
    pub fn empty_cache(&self) {
        let mut map = self.buckets.lock().expect("volume pool mutex poisoned");
        let buffers: usize = map.values().map(Vec::len).sum();
        map.clear();
        debug!(buffers, "volume pool cache drained");
    }

    /// A snapshot of the pool's counters.
    pub fn stats(&self) -> PoolStats {
        let map = self.buckets.lock().expect("volume pool mutex poisoned");
        let mut cached_buffers = 0;
        let mut cached_elements = 0;
        for (n, stack) in map.iter() {
            cached_buffers += stack.len();
            cached_elements += n * stack.len();
        }
        PoolStats {
            cached_buffers,
            cached_elements,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<T: Element> Default for VolumePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pool-owned payload of a handle; returns its buffer on the last drop.
struct Pooled<T: Element> {
    vol: Volume<T>,
    pool: Arc<VolumePool<T>>,
}

impl<T: Element> Drop for Pooled<T> {
    fn drop(&mut self) {
        let buf = self.vol.take_data();
        self.pool.reclaim(buf);
    }
}

/// A shared-ownership handle to a pooled [`Volume`].
///
/// Cloning is a reference-count bump. The volume lives as long as the
/// longest-lived clone; when the final clone drops, the buffer goes back to
/// the pool it came from.
///
/// ```rust
/// use volumic::{get_volume, Vec3i};
///
/// let a = get_volume::<f32>(Vec3i::new(2, 2, 2));
/// let b = a.clone();
/// assert_eq!(a.num_elements(), b.num_elements());
/// ```
pub struct VolumeHandle<T: Element> {
    inner: Arc<Pooled<T>>,
}

impl<T: Element> VolumeHandle<T> {
    /// Mutable access to the volume, available only while this is the sole
    /// handle. Mirrors [`Arc::get_mut`].
    pub fn get_mut(&mut self) -> Option<&mut Volume<T>> {
        Arc::get_mut(&mut self.inner).map(|p| &mut p.vol)
    }
}

impl<T: Element> Clone for VolumeHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Element> Deref for VolumeHandle<T> {
    type Target = Volume<T>;

    fn deref(&self) -> &Volume<T> {
        &self.inner.vol
    }
}

impl<T: Element> fmt::Debug for VolumeHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeHandle")
            .field("shape", &self.inner.vol.shape())
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}

static POOL_F32: OnceLock<Arc<VolumePool<f32>>> = OnceLock::new();
static POOL_F64: OnceLock<Arc<VolumePool<f64>>> = OnceLock::new();

pub(crate) fn global_f32() -> Arc<VolumePool<f32>> {
    Arc::clone(POOL_F32.get_or_init(|| Arc::new(VolumePool::new())))
}

pub(crate) fn global_f64() -> Arc<VolumePool<f64>> {
    Arc::clone(POOL_F64.get_or_init(|| Arc::new(VolumePool::new())))
}

/// Acquires a volume of the given shape from the process-wide pool for `T`.
///
/// This is the allocation path the non-mutating operators and the grid
/// transforms use internally. Contents follow the zero-or-arbitrary
/// contract of [`VolumePool::acquire`].
pub fn get_volume<T: Element>(shape: Vec3i) -> VolumeHandle<T> {
    T::global_pool().acquire(shape)
}
