use tlabel_model::Snapshot;
use tracing::trace;

use crate::{
    reconciler::{AttributeReconciler, Reconcile},
    target::AttributeTarget,
};

/// Resolves the rendered root element of the widget the connector extends.
///
/// Resolution may fail while the parent is not mounted yet.
pub trait ParentResolver {
    type Target: AttributeTarget + ?Sized;

    fn resolve(&mut self) -> Option<&mut Self::Target>;
}

/// A parent that is either mounted (`Some`) or not yet (`None`).
impl<T: AttributeTarget> ParentResolver for Option<T> {
    type Target = T;

    fn resolve(&mut self) -> Option<&mut T> {
        self.as_mut()
    }
}

/// Client counterpart of one widget's label store.
///
/// The host calls [`LabelConnector::on_attach`] when the connector is attached
/// to its parent and [`LabelConnector::on_state_changed`] for every delivered
/// snapshot.
#[derive(Debug)]
pub struct LabelConnector<P: ParentResolver> {
    parent: P,
    state: Snapshot,
    reconciler: AttributeReconciler,
}

impl<P: ParentResolver> LabelConnector<P> {
    pub fn new(parent: P) -> Self {
        Self {
            parent,
            state: Snapshot::default(),
            reconciler: AttributeReconciler::new(),
        }
    }

    /// Apply the current state after attaching to the parent.
    pub fn on_attach(&mut self) -> Reconcile {
        trace!("connector attached");
        self.apply()
    }

    /// Store the new state and apply it.
    pub fn on_state_changed(&mut self, snapshot: Snapshot) -> Reconcile {
        self.state = snapshot;
        self.apply()
    }

    /// The parent's root element was replaced: drop the bookkeeping of the old
    /// element and apply the current state to the new one.
    pub fn on_target_replaced(&mut self) -> Reconcile {
        self.reconciler.reset();
        self.apply()
    }

    /// Last received state.
    pub fn state(&self) -> &Snapshot {
        &self.state
    }

    pub fn parent(&self) -> &P {
        &self.parent
    }

    pub fn parent_mut(&mut self) -> &mut P {
        &mut self.parent
    }

    pub fn reconciler(&self) -> &AttributeReconciler {
        &self.reconciler
    }

    fn apply(&mut self) -> Reconcile {
        self.reconciler
            .reconcile(self.parent.resolve(), &self.state)
    }
}
