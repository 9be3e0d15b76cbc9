/*!
 * Ring Configuration
 * Construction-time options and the growth strategy contract
 */

use std::fmt;
use std::sync::Arc;

// Default layout: four 256-slot chunks up front, two detached chunks retained
// for reuse, growth in batches of the same shape.
pub const DEFAULT_CHUNK_SIZE: usize = 256;
pub const DEFAULT_CHUNK_COUNT: usize = 4;
pub const DEFAULT_FREE_CHUNK_BUFFER: usize = 2;

/// Decides how much storage to add when a push finds no pre-linked chunk and
/// an empty free pool.
///
/// Maps the current total capacity to `(chunk_size, chunk_count)` for the
/// next allocation batch. Must be pure: no side effects, deterministic given
/// capacity. Both returned values are expected to be at least 1; zeroes are
/// coerced to 1 so a misbehaving strategy cannot stall a push.
pub type GrowthStrategy = Arc<dyn Fn(usize) -> (usize, usize) + Send + Sync>;

/// Ring construction options
///
/// Zero values for sizes and counts are coerced to 1 at construction.
#[derive(Clone)]
pub struct RingConfig {
    /// Slot count of each initial chunk
    pub chunk_size: usize,
    /// Number of chunks in the initial chain
    pub chunk_count: usize,
    /// Capacity of the free pool of detached chunks kept for reuse
    pub free_chunk_buffer: usize,
    /// Strategy consulted when more capacity must be allocated
    pub growth_strategy: GrowthStrategy,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_count: DEFAULT_CHUNK_COUNT,
            free_chunk_buffer: DEFAULT_FREE_CHUNK_BUFFER,
            growth_strategy: Arc::new(|_| (DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_COUNT)),
        }
    }
}

impl RingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_chunk_count(mut self, chunk_count: usize) -> Self {
        self.chunk_count = chunk_count;
        self
    }

    pub fn with_free_chunk_buffer(mut self, free_chunk_buffer: usize) -> Self {
        self.free_chunk_buffer = free_chunk_buffer;
        self
    }

    pub fn with_growth_strategy<F>(mut self, strategy: F) -> Self
    where
        F: Fn(usize) -> (usize, usize) + Send + Sync + 'static,
    {
        self.growth_strategy = Arc::new(strategy);
        self
    }
}

impl fmt::Debug for RingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingConfig")
            .field("chunk_size", &self.chunk_size)
            .field("chunk_count", &self.chunk_count)
            .field("free_chunk_buffer", &self.free_chunk_buffer)
            .finish_non_exhaustive()
    }
}
