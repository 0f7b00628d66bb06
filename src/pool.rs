//! Process-wide pool of reusable backing blocks for pixel data.
//!
//! Blocks are leased by byte-size bucket (powers of two, 1 KiB minimum) and
//! return to their bucket's free list when the lease drops. Recycled blocks
//! are handed out as-is, without zero-filling. Backing storage is `u64`
//! words so every supported element type is alignment-compatible; the typed
//! slice view is produced by reinterpreting an exact-length byte prefix.
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, OnceLock};

use bytemuck::Pod;
use log::debug;

/// Smallest bucket, in bytes.
const MIN_BUCKET_BYTES: usize = 1024;
/// Power-of-two buckets from 1 KiB up to 2 GiB.
const BUCKETS: usize = 22;

struct BlockPool {
    buckets: [Mutex<Vec<Box<[u64]>>>; BUCKETS],
}

static POOL: OnceLock<BlockPool> = OnceLock::new();

fn pool() -> &'static BlockPool {
    POOL.get_or_init(|| BlockPool {
        buckets: std::array::from_fn(|_| Mutex::new(Vec::new())),
    })
}

fn bucket_index(bytes: usize) -> Option<usize> {
    let size = bytes.max(MIN_BUCKET_BYTES).next_power_of_two();
    let index = (size.trailing_zeros() - MIN_BUCKET_BYTES.trailing_zeros()) as usize;
    (index < BUCKETS).then_some(index)
}

fn bucket_words(index: usize) -> usize {
    (MIN_BUCKET_BYTES << index) / std::mem::size_of::<u64>()
}

/// Lease `len` elements of `T` from the pool.
///
/// The returned block exposes exactly `len` elements even when the backing
/// bucket is larger. Requests beyond the largest bucket are allocated
/// exactly and simply dropped on release.
pub fn rent<T: Pod>(len: usize) -> PoolBlock<T> {
    let bytes = len * std::mem::size_of::<T>();
    let raw = match bucket_index(bytes) {
        Some(index) => {
            let recycled = pool().buckets[index]
                .lock()
                .expect("pool mutex poisoned")
                .pop();
            recycled.unwrap_or_else(|| vec![0u64; bucket_words(index)].into_boxed_slice())
        }
        None => {
            debug!("rent of {bytes} bytes exceeds the largest bucket; allocating unpooled");
            vec![0u64; bytes.div_ceil(std::mem::size_of::<u64>())].into_boxed_slice()
        }
    };
    PoolBlock {
        raw: Some(raw),
        len,
        _marker: PhantomData,
    }
}

/// An exclusive lease of pooled storage, released on drop.
pub struct PoolBlock<T> {
    raw: Option<Box<[u64]>>,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T: Pod> PoolBlock<T> {
    /// Number of elements in the lease.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn raw(&self) -> &[u64] {
        self.raw.as_ref().expect("block present until drop")
    }
}

impl<T: Pod> Deref for PoolBlock<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        let bytes: &[u8] = bytemuck::cast_slice(self.raw());
        bytemuck::cast_slice(&bytes[..self.len * std::mem::size_of::<T>()])
    }
}

impl<T: Pod> DerefMut for PoolBlock<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        let len = self.len * std::mem::size_of::<T>();
        let raw = self.raw.as_mut().expect("block present until drop");
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(raw);
        bytemuck::cast_slice_mut(&mut bytes[..len])
    }
}

impl<T> Drop for PoolBlock<T> {
    fn drop(&mut self) {
        let Some(raw) = self.raw.take() else {
            return;
        };
        let bytes = raw.len() * std::mem::size_of::<u64>();
        if let Some(index) = bucket_index(bytes) {
            if bucket_words(index) == raw.len() {
                pool().buckets[index]
                    .lock()
                    .expect("pool mutex poisoned")
                    .push(raw);
            }
        }
    }
}

impl<T: Pod + std::fmt::Debug> std::fmt::Debug for PoolBlock<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolBlock").field("len", &self.len).finish()
    }
}
