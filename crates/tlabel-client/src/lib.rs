//! Client-side projection of test labels onto rendered elements.
//!
//! A [`LabelConnector`] is the client counterpart of one widget's label store.
//! It keeps the last received [`tlabel_model::Snapshot`] and lets an
//! [`AttributeReconciler`] rewrite the prefixed attributes of the widget's
//! root element whenever it is attached or a new snapshot arrives.
mod error;
pub use error::TargetError;

mod target;
pub use target::{AttributeTarget, MemoryElement};

mod reconciler;
pub use reconciler::{AttributeReconciler, Reconcile};

mod connector;
pub use connector::{LabelConnector, ParentResolver};
