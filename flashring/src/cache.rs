//! Optional RAM staging buffer that batches partial writes before calling
//! `append`.
//!
//! This is a convenience wrapper around [`RingStore`]; it does not
//! participate in any of the ring's invariants and callers are free to call
//! `RingStore::append` directly instead. Grounded on the original's
//! `ringfs_append_to_cache`, which accumulates bytes into a fixed-size RAM
//! buffer and flushes a full object's worth to `append` once the buffer
//! would overflow.

use crate::error::Error;
use crate::flash::Flash;
use crate::store::RingStore;

/// Stages up to `N` bytes (one object's worth) in RAM before handing a full
/// object to [`RingStore::append`].
///
/// `N` should match the store's configured `object_size`; pushing more
/// bytes than fit triggers a flush of whatever is currently staged before
/// the new bytes are accepted, exactly like the original's
/// `ringfs_append_to_cache`.
pub struct ByteCache<F, const N: usize> {
    store: RingStore<F>,
    buffer: [u8; N],
    filling_level: usize,
}

impl<F: Flash, const N: usize> ByteCache<F, N> {
    pub fn new(store: RingStore<F>) -> Self {
        ByteCache {
            store,
            buffer: [0u8; N],
            filling_level: 0,
        }
    }

    /// Stage `data` into the cache, flushing the previously staged bytes
    /// first if `data` would not fit in the remaining space.
    pub fn push(&mut self, data: &[u8]) -> Result<(), Error> {
        if self.filling_level + data.len() > N {
            self.flush()?;
        }

        let end = self.filling_level + data.len();
        self.buffer[self.filling_level..end].copy_from_slice(data);
        self.filling_level = end;
        Ok(())
    }

    /// Append whatever is currently staged and reset the cache, regardless
    /// of whether it is full.
    pub fn flush(&mut self) -> Result<(), Error> {
        if self.filling_level == 0 {
            return Ok(());
        }
        self.store.append(&self.buffer)?;
        self.filling_level = 0;
        Ok(())
    }

    /// Borrow the wrapped store.
    pub fn store(&self) -> &RingStore<F> {
        &self.store
    }

    /// Borrow the wrapped store mutably.
    pub fn store_mut(&mut self) -> &mut RingStore<F> {
        &mut self.store
    }

    /// Consume the cache, discarding any partially staged bytes, and
    /// return the wrapped store.
    pub fn into_store(self) -> RingStore<F> {
        self.store
    }
}
