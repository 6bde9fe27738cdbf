//! Snapshot delivery from server-side stores to client counterparts.
//!
//! Mutations only mark a store dirty. The host calls [`flush`] (or [`flush_all`])
//! on its own response cycle; each dirty store is turned into a [`Snapshot`]
//! and handed to a [`SnapshotSink`]. There is no acknowledgement and no retry:
//! a failed delivery leaves the store dirty and the next flush sends it again.
use tlabel_model::Snapshot;
use tracing::{debug, instrument, trace, warn};

use crate::{
    component::Component,
    error::{CoreError, CoreResult},
    store::lock,
};

/// Transport carrying snapshots to the client counterpart of a widget.
pub trait SnapshotSink: Send + Sync {
    /// Sink name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Deliver the latest snapshot of `widget`.
    fn deliver(&self, widget: &str, snapshot: Snapshot) -> CoreResult<()>;
}

/// Deliver the widget's snapshot if its store is dirty.
///
/// Returns `Ok(true)` when a snapshot was delivered and `Ok(false)` when the
/// widget has no store or nothing changed since the last delivery.
#[instrument(level = "debug", skip(component, sink), fields(widget = component.id(), sink = sink.name()))]
pub fn flush<C>(component: &C, sink: &dyn SnapshotSink) -> CoreResult<bool>
where
    C: Component + ?Sized,
{
    let Some(store) = component.label_store() else {
        trace!("no label store attached");
        return Ok(false);
    };

    let pending = lock(&store).pending_snapshot();
    let Some((revision, snapshot)) = pending else {
        trace!("label store clean");
        return Ok(false);
    };

    let count = snapshot.labels.len();
    if let Err(e) = sink.deliver(component.id(), snapshot) {
        warn!(error = %e, revision, "snapshot delivery failed");
        return Err(e);
    }

    lock(&store).mark_delivered(revision);
    debug!(revision, labels = count, "snapshot delivered");
    Ok(true)
}

/// Flush every given widget.
///
/// All widgets are attempted even if some deliveries fail; the first error is
/// returned after the pass. On success returns the number of delivered snapshots.
pub fn flush_all<'a, I, C>(components: I, sink: &dyn SnapshotSink) -> CoreResult<usize>
where
    I: IntoIterator<Item = &'a C>,
    C: Component + ?Sized + 'a,
{
    let mut delivered = 0;
    let mut first_err: Option<CoreError> = None;

    for component in components {
        match flush(component, sink) {
            Ok(true) => delivered += 1,
            Ok(false) => {}
            Err(e) => {
                first_err.get_or_insert(e);
            }
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(delivered),
    }
}
