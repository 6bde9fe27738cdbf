//! Server-side label store of a single widget.
//!
//! The store is the authoritative copy of a widget's labels. Every effective
//! mutation bumps a revision counter; the store is dirty while that revision has
//! not been delivered to the client yet.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tlabel_model::{DEFAULT_PREFIX, Labels, ModelResult, Snapshot, validate_prefix};
use tracing::trace;

/// Store shared between the widget that owns it and every handle bound to it.
pub type SharedStore = Arc<Mutex<LabelStore>>;

/// Lock a shared store.
///
/// A poisoned lock still holds consistent data (every mutation is a single map
/// operation), so the guard is recovered instead of propagating the panic.
pub fn lock(store: &SharedStore) -> MutexGuard<'_, LabelStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone)]
pub struct LabelStore {
    labels: Labels,
    prefix: String,
    revision: u64,
    delivered: u64,
}

impl LabelStore {
    /// Create an empty, clean store with the given attribute prefix.
    ///
    /// Fails when the prefix is empty or contains whitespace.
    pub fn new(prefix: impl Into<String>) -> ModelResult<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        Ok(Self::with_valid_prefix(prefix))
    }

    fn with_valid_prefix(prefix: String) -> Self {
        Self {
            labels: Labels::new(),
            prefix,
            revision: 0,
            delivered: 0,
        }
    }

    /// Wrap the store for sharing.
    pub fn shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// Insert or overwrite a label. Always marks the store dirty.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        trace!(key = %key, "label set");
        self.labels.insert(key, value);
        self.touch();
    }

    /// Insert or overwrite all given labels with a single dirty mark.
    ///
    /// An empty set is a no-op.
    pub fn extend(&mut self, labels: Labels) {
        if labels.is_empty() {
            return;
        }
        trace!(count = labels.len(), "labels set in bulk");
        self.labels.extend(labels.iter());
        self.touch();
    }

    /// Remove a label.
    ///
    /// Deleting a key that is not present leaves the store untouched, so no
    /// snapshot gets delivered for it.
    pub fn delete(&mut self, key: &str) {
        if !self.labels.contains_key(key) {
            trace!(key, "delete skipped, key absent");
            return;
        }
        self.labels.remove(key);
        trace!(key, "label deleted");
        self.touch();
    }

    /// Copy of the current labels. Never marks the store dirty.
    pub fn labels(&self) -> Labels {
        self.labels.clone()
    }

    /// Returns `true` if the key is present. Never marks the store dirty.
    pub fn contains(&self, key: &str) -> bool {
        self.labels.contains_key(key)
    }

    /// Attribute prefix rendered in front of every key.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Override the attribute prefix.
    ///
    /// Marks the store dirty only when the prefix actually changes.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) -> ModelResult<()> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        if prefix != self.prefix {
            trace!(prefix = %prefix, "prefix changed");
            self.prefix = prefix;
            self.touch();
        }
        Ok(())
    }

    /// Current revision; bumped by every effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if a mutation happened since the last delivery.
    pub fn is_dirty(&self) -> bool {
        self.revision != self.delivered
    }

    /// Snapshot of the current state, for any revision.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            labels: self.labels.clone(),
            prefix: self.prefix.clone(),
        }
    }

    /// Snapshot tagged with its revision if the store is dirty.
    pub fn pending_snapshot(&self) -> Option<(u64, Snapshot)> {
        self.is_dirty().then(|| (self.revision, self.snapshot()))
    }

    /// Record that the given revision reached the client.
    ///
    /// Mutations made after that revision was taken keep the store dirty.
    pub fn mark_delivered(&mut self, revision: u64) {
        self.delivered = self.delivered.max(revision.min(self.revision));
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl Default for LabelStore {
    fn default() -> Self {
        Self::with_valid_prefix(DEFAULT_PREFIX.to_string())
    }
}
