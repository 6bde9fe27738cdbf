#![cfg(feature = "sink")]

//! Logging decorator for snapshot transports.
//!
//! Wraps any [`SnapshotSink`] and records every delivery as a structured
//! tracing event before forwarding it.

use tlabel_core::{CoreResult, SnapshotSink};
use tlabel_model::Snapshot;
use tracing::{debug, error, trace};

/// Sink that logs every snapshot and forwards it to `inner`.
#[derive(Debug, Default)]
pub struct TracingSink<S> {
    inner: S,
}

impl<S: SnapshotSink> TracingSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: SnapshotSink> SnapshotSink for TracingSink<S> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn deliver(&self, widget: &str, snapshot: Snapshot) -> CoreResult<()> {
        let labels = snapshot.labels.len();
        let prefix = snapshot.prefix.clone();
        trace!(widget, snapshot = ?snapshot, "snapshot payload");

        match self.inner.deliver(widget, snapshot) {
            Ok(()) => {
                debug!(widget, sink = self.inner.name(), labels, prefix = %prefix, "snapshot sent");
                Ok(())
            }
            Err(e) => {
                error!(widget, sink = self.inner.name(), error = %e, "snapshot not sent");
                Err(e)
            }
        }
    }
}
