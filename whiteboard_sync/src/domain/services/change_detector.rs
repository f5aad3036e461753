use std::sync::{Mutex, MutexGuard};

/// Collections whose changes are detected through a backend supplied hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedResource {
    PostIts,
    Anchors,
}

impl TrackedResource {
    /// Endpoint serving the current hash of the collection
    pub fn hash_path(&self) -> &'static str {
        match self {
            TrackedResource::PostIts => "/postitsHash",
            TrackedResource::Anchors => "/anchorsHash",
        }
    }
}

impl std::fmt::Display for TrackedResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackedResource::PostIts => write!(f, "post-its"),
            TrackedResource::Anchors => write!(f, "anchors"),
        }
    }
}

/// Last hash seen for one collection
///
/// The read-compare-write happens under the lock, so two concurrent
/// observations of the same new hash report a change only once.
#[derive(Debug, Default)]
pub struct HashTracker {
    last_hash: Mutex<Option<String>>,
}

impl HashTracker {
    /// Stores `hash` and returns `true` if nothing was stored yet or if it differs from the stored one
    pub fn observe(&self, hash: &str) -> bool {
        let mut last_hash = self.lock();

        if last_hash.as_deref() == Some(hash) {
            return false;
        }

        *last_hash = Some(hash.to_string());
        true
    }

    pub fn last_hash(&self) -> Option<String> {
        self.lock().clone()
    }

    pub fn reset(&self) {
        *self.lock() = None;
    }

    // Nothing can leave the value half written, a poisoned lock is still usable
    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.last_hash
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Decides whether a collection has to be fetched again
///
/// Holds no payload, only the opaque digests handed out by the backend.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    post_its: HashTracker,
    anchors: HashTracker,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracker(&self, resource: TrackedResource) -> &HashTracker {
        match resource {
            TrackedResource::PostIts => &self.post_its,
            TrackedResource::Anchors => &self.anchors,
        }
    }

    /// See `HashTracker::observe`
    pub fn has_changed(&self, resource: TrackedResource, hash: &str) -> bool {
        self.tracker(resource).observe(hash)
    }

    /// Forgets both hashes: the next check of either collection reports a change
    pub fn reset(&self) {
        self.post_its.reset();
        self.anchors.reset();
    }
}
