//! Process-wide shared ocean registry.
//!
//! Propagation workers do not pass the ocean around; they ask this
//! registry for the current snapshot at the start of a computation and
//! hold the returned handle for its duration. Publishing a new ocean
//! swaps the slot atomically: readers that already hold a snapshot keep
//! it alive through shared ownership, readers that call [`current`]
//! afterwards see the new one. Readers never block each other, and a
//! publisher never invalidates a reader's view.
//!
//! The slot is a readers-writer lock around one `Option<Arc<OceanModel>>`;
//! the lock's acquire/release ordering gives the publish-then-observe
//! guarantee across threads.

use std::sync::{Arc, OnceLock, RwLock};

use super::model::OceanModel;

type Slot = RwLock<Option<Arc<OceanModel>>>;

static REGISTRY: OnceLock<Slot> = OnceLock::new();

fn slot() -> &'static Slot {
    REGISTRY.get_or_init(|| RwLock::new(None))
}

/// The currently published ocean, or `None` if nothing has been
/// published yet.
///
/// The returned handle is a snapshot: it stays valid (and unchanged) for
/// as long as the caller holds it, regardless of later [`update`] calls.
pub fn current() -> Option<Arc<OceanModel>> {
    slot()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Atomically replace the published ocean.
///
/// After this returns, every subsequent [`current`] call in any thread
/// observes the new handle. Previously published oceans stay alive until
/// their last reader drops its snapshot.
pub fn update(ocean: Arc<OceanModel>) {
    let mut guard = slot()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Some(ocean);
    log::info!("published new shared ocean");
}

/// Clear the registry.
///
/// Subsequent [`current`] calls return `None` until the next [`update`].
/// Snapshots already handed out stay alive.
pub fn reset() {
    let mut guard = slot()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = None;
}
