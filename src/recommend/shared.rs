use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::recommend::Snapshot;

/// Handle to the current snapshot, shared between threads.
///
/// Readers take an `Arc` of whatever snapshot is live and keep using it even if
/// a newer one is published meanwhile. `publish` swaps in a fully built
/// snapshot in one step; a live snapshot is never mutated.
#[derive(Debug, Clone)]
pub struct SharedSnapshot {
    current: Arc<ArcSwap<Snapshot>>,
}

impl SharedSnapshot {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(snapshot)),
        }
    }

    /// The snapshot that is live right now
    #[inline]
    pub fn load(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Replace the live snapshot and return the previous one
    pub fn publish(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let items = snapshot.len();
        let previous = self.current.swap(Arc::new(snapshot));
        info!(items, previous_items = previous.len(), "snapshot published");
        previous
    }
}
