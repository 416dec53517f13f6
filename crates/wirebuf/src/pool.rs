//! Explicit checkout/recycle pool for writer reuse.
//!
//! High-throughput serialize loops churn through writers; pooling keeps their
//! allocations warm without any global mutable state. A checked-out writer is
//! exclusively owned by one call stack until it is recycled. Readers are two
//! words over a borrowed slice, so they are constructed inline instead.

use tracing::{debug, trace};

use crate::writer::{BinaryWriter, DEFAULT_CAPACITY};

/// Idle writers retained by default before recycles start dropping.
pub const DEFAULT_MAX_IDLE: usize = 16;

/// A free list of reusable [`BinaryWriter`] instances.
#[derive(Debug)]
pub struct WriterPool {
    idle: Vec<BinaryWriter>,
    initial_capacity: usize,
    max_idle: usize,
}

impl WriterPool {
    /// Create a pool whose fresh writers start at `initial_capacity` bytes.
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_retention(initial_capacity, DEFAULT_MAX_IDLE)
    }

    /// Create a pool with an explicit idle-retention limit.
    pub fn with_retention(initial_capacity: usize, max_idle: usize) -> Self {
        Self {
            idle: Vec::new(),
            initial_capacity,
            max_idle,
        }
    }

    /// Hand out a writer: an idle one if available, otherwise freshly built.
    pub fn checkout(&mut self) -> BinaryWriter {
        match self.idle.pop() {
            Some(writer) => {
                trace!(idle = self.idle.len(), "reusing pooled writer");
                writer
            }
            None => {
                debug!(capacity = self.initial_capacity, "pool empty, building writer");
                BinaryWriter::with_capacity(self.initial_capacity)
            }
        }
    }

    /// Return a writer to the pool.
    ///
    /// The writer is reset before it is retained; beyond the retention limit
    /// it is dropped instead, bounding idle memory.
    pub fn recycle(&mut self, mut writer: BinaryWriter) {
        writer.reset();
        if self.idle.len() < self.max_idle {
            self.idle.push(writer);
        } else {
            trace!(max_idle = self.max_idle, "retention limit reached, dropping writer");
        }
    }

    /// Number of idle writers currently retained.
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }
}

impl Default for WriterPool {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_builds_when_empty() {
        let mut pool = WriterPool::new(32);
        let writer = pool.checkout();
        assert_eq!(writer.capacity(), 32);
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn recycle_resets_and_retains() {
        let mut pool = WriterPool::new(8);
        let mut writer = pool.checkout();
        writer.write_u64(42);
        writer.write_u64(43);
        let grown = writer.capacity();

        pool.recycle(writer);
        assert_eq!(pool.idle_count(), 1);

        let writer = pool.checkout();
        assert_eq!(writer.cursor(), 0);
        assert_eq!(writer.dump().len(), 0);
        // The grown allocation survives the round-trip.
        assert_eq!(writer.capacity(), grown);
    }

    #[test]
    fn retention_limit_drops_excess() {
        let mut pool = WriterPool::with_retention(8, 2);
        let writers: Vec<_> = (0..4).map(|_| pool.checkout()).collect();
        for writer in writers {
            pool.recycle(writer);
        }
        assert_eq!(pool.idle_count(), 2);
    }
}
