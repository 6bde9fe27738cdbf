//! Host widget seam.
//!
//! The host framework owns its component tree; the core only needs to find or
//! attach the one label store a widget may carry.
use std::sync::OnceLock;

use tlabel_model::WidgetId;

use crate::store::SharedStore;

/// A host widget that can carry at most one label store.
pub trait Component {
    /// Identifier used for routing snapshots and in logs.
    fn id(&self) -> &str;

    /// The store attached to this widget, if any.
    fn label_store(&self) -> Option<SharedStore>;

    /// Attach `store` unless another one is attached already.
    ///
    /// Returns the store that ends up attached, which is the existing one when
    /// the widget already had a store.
    fn attach_label_store(&self, store: SharedStore) -> SharedStore;
}

/// Minimal [`Component`] implementation for hosts without their own widget type.
#[derive(Debug)]
pub struct Widget {
    id: WidgetId,
    store: OnceLock<SharedStore>,
}

impl Widget {
    pub fn new(id: impl Into<WidgetId>) -> Self {
        Self {
            id: id.into(),
            store: OnceLock::new(),
        }
    }
}

impl Component for Widget {
    fn id(&self) -> &str {
        &self.id
    }

    fn label_store(&self) -> Option<SharedStore> {
        self.store.get().cloned()
    }

    fn attach_label_store(&self, store: SharedStore) -> SharedStore {
        self.store.get_or_init(|| store).clone()
    }
}
