/*!
 * Synchronized Ring Wrapper
 * Serializes ring access behind one lock and turns empty pulls into waits
 */

use super::cancel::CancellationToken;
use crate::ring::{ElasticRing, RingConfig, RingError, RingResult, RingStats};
use parking_lot::Mutex;

/// Lock state: the ring plus the pulls currently waiting for data
///
/// The waiter list lives under the same mutex as the ring, so registering a
/// waiter is atomic with the emptiness check that precedes it.
struct RingState<T> {
    ring: ElasticRing<T>,
    waiters: Vec<flume::Sender<()>>,
}

/// Thread-safe, cancellable wrapper around [`ElasticRing`]
///
/// All access is serialized by a single mutex; FIFO order therefore holds
/// under concurrent multi-producer/multi-consumer use. A pull on an empty
/// ring releases the lock and blocks until a push arrives or its token
/// fires. Pushes never block.
pub struct SyncRing<T> {
    state: Mutex<RingState<T>>,
}

impl<T> SyncRing<T> {
    /// Create a synchronized ring from the given configuration
    pub fn new(config: RingConfig) -> Self {
        Self {
            state: Mutex::new(RingState {
                ring: ElasticRing::new(config),
                waiters: Vec::new(),
            }),
        }
    }

    /// Live element count
    pub fn size(&self) -> usize {
        self.state.lock().ring.size()
    }

    /// Total slot count currently held
    pub fn capacity(&self) -> usize {
        self.state.lock().ring.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().ring.is_empty()
    }

    /// Snapshot of the underlying ring, taken under the lock
    pub fn stats(&self) -> RingStats {
        self.state.lock().ring.stats()
    }

    /// Append a value and wake every waiting pull
    ///
    /// The wake is a hint, not a handoff: woken pulls re-check emptiness
    /// under the lock, so a faster consumer racing ahead is tolerated.
    pub fn push(&self, value: T) {
        let mut state = self.state.lock();
        state.ring.push(value);
        for waiter in state.waiters.drain(..) {
            let _ = waiter.try_send(());
        }
    }

    /// Remove and return the head value, waiting while the ring is empty
    ///
    /// Returns [`RingError::Cancelled`] if `token` fires while waiting. A
    /// cancelled wait never removes an element; buffered data present at
    /// check time is still pulled even if the token has already fired.
    pub fn pull(&self, token: &CancellationToken) -> RingResult<T> {
        loop {
            let wake = {
                let mut state = self.state.lock();
                if state.ring.size() > 0 {
                    return state.ring.pull();
                }
                let (tx, rx) = flume::bounded(1);
                state.waiters.push(tx);
                rx
            };

            // Lock released: block on whichever fires first. Either side
            // waking by disconnect is equivalent to a message.
            let cancelled = flume::Selector::new()
                .recv(&wake, |_| false)
                .recv(token.signal(), |_| true)
                .wait();

            if cancelled {
                return Err(RingError::Cancelled);
            }
        }
    }

    /// Blocking iterator: each step pulls with `token`, ending on cancellation
    ///
    /// Restartable per call but not rewindable - elements are consumed from
    /// the shared ring as they are yielded.
    pub fn elements<'a>(&'a self, token: &'a CancellationToken) -> Elements<'a, T> {
        Elements { ring: self, token }
    }
}

impl<T> Default for SyncRing<T> {
    fn default() -> Self {
        Self::new(RingConfig::default())
    }
}

/// Blocking iterator returned by [`SyncRing::elements`]
pub struct Elements<'a, T> {
    ring: &'a SyncRing<T>,
    token: &'a CancellationToken,
}

impl<T> Iterator for Elements<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.ring.pull(self.token).ok()
    }
}
