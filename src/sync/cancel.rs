/*!
 * Cancellation Token
 * Advisory per-call cancellation for blocking pulls
 */

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Clonable token that interrupts blocking pulls
///
/// All clones share one state: cancelling any clone wakes every pull
/// currently waiting with this token, which then returns
/// [`crate::RingError::Cancelled`]. The token is advisory and per-call - it
/// is never stored in the ring, and cancelling it does not disturb pulls
/// waiting with other tokens.
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<TokenState>,
}

struct TokenState {
    cancelled: AtomicBool,
    // Dropping this sender disconnects `signal`, waking every blocked
    // receiver clone at once.
    guard: Mutex<Option<flume::Sender<()>>>,
    signal: flume::Receiver<()>,
}

impl CancellationToken {
    pub fn new() -> Self {
        let (tx, rx) = flume::bounded(0);
        Self {
            inner: Arc::new(TokenState {
                cancelled: AtomicBool::new(false),
                guard: Mutex::new(Some(tx)),
                signal: rx,
            }),
        }
    }

    /// Fire the token, waking all pulls waiting with it. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.guard.lock().take();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Channel that disconnects when the token fires
    pub(super) fn signal(&self) -> &flume::Receiver<()> {
        &self.inner.signal
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
