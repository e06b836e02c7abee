//! Bounded pool of reusable byte buffers for staging template output.
//!
//! [`BufferPool::acquire`] never blocks and never fails: it pops an idle
//! buffer or allocates a fresh one. The returned [`PooledBuffer`] hands its
//! storage back on drop, so every exit path (success, error, panic unwind)
//! releases exactly once. Released buffers are cleared but keep their
//! capacity; once `capacity` buffers are idle, further releases are dropped.

use std::io;
use std::ops::{Deref, DerefMut};

use bytes::BytesMut;
use parking_lot::Mutex;

/// Thread-safe free list of [`BytesMut`] buffers.
#[derive(Debug)]
pub struct BufferPool {
    free: Mutex<Vec<BytesMut>>,
    capacity: usize,
}

impl BufferPool {
    /// Create a pool retaining at most `capacity` idle buffers.
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    /// Check out an empty buffer.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buf = self.free.lock().pop().unwrap_or_default();
        debug_assert!(buf.is_empty(), "idle buffers must be cleared on release");
        PooledBuffer { buf, pool: self }
    }

    /// Return a buffer to the pool. Its contents are discarded.
    pub fn release(&self, mut buf: BytesMut) {
        buf.clear();
        let mut free = self.free.lock();
        if free.len() < self.capacity {
            free.push(buf);
        } else {
            tracing::trace!(capacity = self.capacity, "buffer pool full; dropping buffer");
        }
    }

    /// Number of idle buffers currently held.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// ---------------------------------------------------------------------------
// PooledBuffer
// ---------------------------------------------------------------------------

/// A checked-out buffer. Released to its pool when dropped.
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    buf: BytesMut,
    pool: &'a BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = BytesMut;

    fn deref(&self) -> &BytesMut {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }
}

impl io::Write for PooledBuffer<'_> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
