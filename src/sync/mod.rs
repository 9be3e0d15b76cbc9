/*!
 * Synchronized Ring
 * Mutual exclusion, blocking pulls, and cancellation over the ring core
 */

pub mod cancel;
pub mod queue;

// Re-export public API
pub use cancel::CancellationToken;
pub use queue::{Elements, SyncRing};
