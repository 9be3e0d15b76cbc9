/*!
 * Ring Core
 * Chunk-chained FIFO storage with on-demand growth and pooled shrink
 */

pub mod chunk;
pub mod config;
pub mod errors;
pub mod queue;
pub mod stats;

// Re-export public API
pub use config::{GrowthStrategy, RingConfig};
pub use errors::{RingError, RingResult};
pub use queue::{Drain, ElasticRing};
pub use stats::RingStats;
