/*!
 * Elastic Ring Library
 * Chunk-chained FIFO queue with on-demand growth, pooled shrink, and a
 * blocking, cancellable wrapper
 */

pub mod ring;
pub mod sync;

// Re-exports
pub use ring::{Drain, ElasticRing, GrowthStrategy, RingConfig, RingError, RingResult, RingStats};
pub use sync::{CancellationToken, Elements, SyncRing};
