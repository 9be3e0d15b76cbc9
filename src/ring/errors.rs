/*!
 * Error Types
 * Recoverable signals returned by ring operations
 */

use thiserror::Error;

/// Result type for ring operations
pub type RingResult<T> = Result<T, RingError>;

/// Ring operation errors
///
/// Both variants are ordinary return-path signals, not failures: `Empty` is
/// the end-of-sequence marker for iteration, `Cancelled` reports that a
/// blocking pull's token fired before data arrived.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    #[error("ring is empty")]
    Empty,

    #[error("pull was cancelled")]
    Cancelled,
}
