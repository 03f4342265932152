//! Response buffer ownership.

use heapless::Vec;
use log::warn;

use crate::network::Pool;
use crate::network::error::Status;

/// One allocation from a [`Pool`], returned to it when dropped.
///
/// Only the first `capacity` bytes are exposed, even if the pool handed out
/// more, so the capacity declared to the stack never exceeds what was asked for.
pub struct PoolBuffer<'p, P: Pool> {
    pool: &'p mut P,
    buffer: Option<P::Buffer>,
    capacity: usize,
}

impl<'p, P: Pool> PoolBuffer<'p, P> {
    /// Allocate `capacity` bytes from `pool`.
    pub fn allocate(pool: &'p mut P, capacity: usize) -> Result<Self, Status> {
        let buffer = pool.allocate(capacity)?;
        if buffer.as_ref().len() < capacity {
            warn!(
                "pool returned {} bytes for a {} byte request",
                buffer.as_ref().len(),
                capacity
            );
            pool.free(buffer);
            return Err(Status::OutOfResources);
        }
        Ok(Self {
            pool,
            buffer: Some(buffer),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[u8] {
        match &self.buffer {
            Some(buffer) => &buffer.as_ref()[..self.capacity],
            None => &[],
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match &mut self.buffer {
            Some(buffer) => &mut buffer.as_mut()[..self.capacity],
            None => &mut [],
        }
    }
}

impl<P: Pool> Drop for PoolBuffer<'_, P> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.pool.free(buffer);
        }
    }
}

impl<P: Pool> core::fmt::Debug for PoolBuffer<'_, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PoolBuffer")
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// A pool without a firmware allocator behind it.
///
/// Each allocation is an inline `heapless::Vec` of at most `N` bytes.
#[derive(Debug, Default)]
pub struct InlinePool<const N: usize> {
    outstanding: usize,
}

impl<const N: usize> InlinePool<N> {
    pub const fn new() -> Self {
        Self { outstanding: 0 }
    }

    /// Allocations handed out and not yet freed.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }
}

impl<const N: usize> Pool for InlinePool<N> {
    type Buffer = Vec<u8, N>;

    fn allocate(&mut self, size: usize) -> Result<Self::Buffer, Status> {
        let mut buffer = Vec::new();
        buffer
            .resize_default(size)
            .map_err(|_| Status::OutOfResources)?;
        self.outstanding += 1;
        Ok(buffer)
    }

    fn free(&mut self, _buffer: Self::Buffer) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }
}
