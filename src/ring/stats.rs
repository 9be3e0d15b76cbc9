/*!
 * Ring Statistics
 * Point-in-time snapshot of chain layout and occupancy
 */

use super::queue::ElasticRing;
use serde::{Deserialize, Serialize};

/// Snapshot of a ring's storage layout
///
/// Produced by [`ElasticRing::stats`]; never mutates the ring. Active figures
/// cover the chunks reachable from the head (including pre-linked spares past
/// the tail), passive figures cover the free pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingStats {
    /// Live element count
    pub size: usize,
    /// Total slot count, active plus passive
    pub capacity: usize,
    /// Chunks in the active chain
    pub active_chunks: usize,
    /// Slot count of the active chain
    pub active_capacity: usize,
    /// Chunks held in the free pool
    pub passive_chunks: usize,
    /// Slot count held in the free pool
    pub passive_capacity: usize,
    /// Slot count of each active chunk, head first
    pub active_chunk_sizes: Vec<usize>,
    /// Ordinal of the tail chunk within the active chain
    pub tail_chunk: usize,
    /// Next slot to read within the head chunk
    pub start_position: usize,
    /// Logical write offset: slots of all chunks before the tail, plus the
    /// tail cursor
    pub end_position: usize,
}

impl<T> ElasticRing<T> {
    /// Walk the active chain and report sizes, positions, and chunk counts
    ///
    /// Safe to call at any point between operations; on the synchronized
    /// wrapper it runs under the same lock as push and pull.
    pub fn stats(&self) -> RingStats {
        let active_chunk_sizes: Vec<usize> = self.chain.iter().map(|chunk| chunk.len()).collect();
        let active_capacity = active_chunk_sizes.iter().sum();

        let end_position: usize = active_chunk_sizes[..self.tail_chunk].iter().sum::<usize>()
            + self.tail_pos;

        RingStats {
            size: self.size,
            capacity: self.capacity,
            active_chunks: active_chunk_sizes.len(),
            active_capacity,
            passive_chunks: self.free.len(),
            passive_capacity: self.capacity - active_capacity,
            active_chunk_sizes,
            tail_chunk: self.tail_chunk,
            start_position: self.head_pos,
            end_position,
        }
    }
}
