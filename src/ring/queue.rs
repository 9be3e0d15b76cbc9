/*!
 * Elastic Ring
 * FIFO queue over a chain of fixed-size chunks, growing and shrinking at the ends
 */

use super::chunk::{allocate_chain, Chunk};
use super::config::{GrowthStrategy, RingConfig};
use super::errors::{RingError, RingResult};
use log::debug;
use std::collections::VecDeque;

/// Dynamically-resizable FIFO queue built from a chain of fixed-size chunks
///
/// Values are written at the tail cursor and read at the head cursor. When
/// the tail chunk fills, the next chunk is taken from the pre-linked part of
/// the chain, then from the free pool, and only then freshly allocated via
/// the growth strategy. When the head chunk is exhausted it is detached and
/// either retained in the bounded free pool for cheap reuse or dropped,
/// shrinking total capacity.
///
/// Not safe for concurrent use; see [`crate::sync::SyncRing`] for the
/// lock-and-notify wrapper.
pub struct ElasticRing<T> {
    /// Active chain: front is the head chunk, entries past `tail_chunk` are
    /// pre-linked spares from an earlier growth batch.
    pub(super) chain: VecDeque<Chunk<T>>,
    /// Next slot to read in the head chunk
    pub(super) head_pos: usize,
    /// Ordinal of the tail chunk within the chain
    pub(super) tail_chunk: usize,
    /// Next slot to write in the tail chunk
    pub(super) tail_pos: usize,
    /// Live (pushed, not yet pulled) element count
    pub(super) size: usize,
    /// Slot count of the chain plus pooled chunks
    pub(super) capacity: usize,
    /// Detached, empty chunks awaiting reuse; disjoint from the chain
    pub(super) free: VecDeque<Chunk<T>>,
    free_capacity: usize,
    growth_strategy: GrowthStrategy,
}

impl<T> ElasticRing<T> {
    /// Create a ring from the given configuration
    ///
    /// Zero chunk size, chunk count, or free-pool capacity are coerced to 1.
    pub fn new(config: RingConfig) -> Self {
        let chunk_size = config.chunk_size.max(1);
        let chunk_count = config.chunk_count.max(1);
        let free_capacity = config.free_chunk_buffer.max(1);

        let (chunks, capacity) = allocate_chain(chunk_size, chunk_count);

        Self {
            chain: chunks.into(),
            head_pos: 0,
            tail_chunk: 0,
            tail_pos: 0,
            size: 0,
            capacity,
            free: VecDeque::with_capacity(free_capacity),
            free_capacity,
            growth_strategy: config.growth_strategy,
        }
    }

    /// Live element count
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total slot count currently held, active chain plus free pool
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Append a value at the tail. Never fails; allocation failure is fatal.
    pub fn push(&mut self, value: T) {
        self.chain[self.tail_chunk].write(self.tail_pos, value);
        self.tail_pos += 1;
        self.size += 1;

        if self.tail_pos < self.chain[self.tail_chunk].len() {
            return;
        }

        // Tail chunk is full: line up the next one. Pre-linked chunks from an
        // earlier growth batch win over the pool, the pool wins over a fresh
        // allocation.
        if self.tail_chunk + 1 == self.chain.len() {
            match self.free.pop_front() {
                Some(spare) => self.chain.push_back(spare),
                None => self.grow(),
            }
        }
        self.tail_chunk += 1;
        self.tail_pos = 0;
    }

    /// Remove and return the value at the head
    ///
    /// Fails with [`RingError::Empty`] when no elements are buffered; the
    /// queue state is untouched in that case.
    pub fn pull(&mut self) -> RingResult<T> {
        if self.size == 0 {
            return Err(RingError::Empty);
        }

        let value = self.chain[0]
            .take(self.head_pos)
            .expect("occupied slot below size watermark - cursor accounting is corrupt");
        self.head_pos += 1;
        self.size -= 1;

        if self.head_pos == self.chain[0].len() {
            self.retire_head();
        }

        Ok(value)
    }

    /// Finite draining iterator over currently-buffered elements
    ///
    /// Each step pulls once; the iterator ends at the first `Empty`.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { ring: self }
    }

    /// Allocate a fresh batch via the growth strategy and pre-link it
    fn grow(&mut self) {
        let (chunk_size, chunk_count) = (self.growth_strategy)(self.capacity);
        let (chunks, added) = allocate_chain(chunk_size.max(1), chunk_count.max(1));

        debug!(
            "ring capacity grown {} -> {} ({} chunks of {} slots)",
            self.capacity,
            self.capacity + added,
            chunks.len(),
            chunk_size.max(1),
        );

        self.capacity += added;
        self.chain.extend(chunks);
    }

    /// Detach the exhausted head chunk, pooling it or letting it go
    fn retire_head(&mut self) {
        // Push advances the tail the moment a chunk fills, so an exhausted
        // head always has a successor and the chain never empties.
        let spent = self
            .chain
            .pop_front()
            .expect("exhausted head chunk has a successor");
        self.tail_chunk -= 1;
        self.head_pos = 0;

        if self.free.len() < self.free_capacity {
            self.free.push_back(spent);
        } else {
            self.capacity -= spent.len();
            debug!(
                "ring chunk of {} slots discarded, capacity now {}",
                spent.len(),
                self.capacity
            );
        }
    }
}

impl<T> Default for ElasticRing<T> {
    fn default() -> Self {
        Self::new(RingConfig::default())
    }
}

/// Draining iterator returned by [`ElasticRing::drain`]
pub struct Drain<'a, T> {
    ring: &'a mut ElasticRing<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.ring.pull().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.ring.size, Some(self.ring.size))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}
