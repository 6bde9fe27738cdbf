//! Builder-style façade over a widget's label store.
use tlabel_model::{Label, Labels};

use crate::store::{LabelStore, SharedStore, lock};

/// Handle returned by [`crate::LabelContext::apply`].
///
/// A handle is either bound to the store of one widget or *dry*: created while
/// the activation gate was inactive, it has no store and every operation is a
/// no-op. The binding is fixed at construction, so callers can use the handle
/// the same way whether or not tracking is active.
///
/// Mutating methods return `&Self` to allow chaining:
///
/// ```rust
/// use tlabel_core::{LabelContext, Widget};
///
/// let ctx = LabelContext::new();
/// let button = Widget::new("button");
///
/// let labels = ctx
///     .apply(&button)
///     .set_label("type", "button")
///     .set_label("test", "test")
///     .labels();
/// assert_eq!(labels.get("type"), Some("button"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TestLabel {
    store: Option<SharedStore>,
}

impl TestLabel {
    pub(crate) fn bound(store: SharedStore) -> Self {
        Self { store: Some(store) }
    }

    pub(crate) fn dry() -> Self {
        Self { store: None }
    }

    /// Insert or overwrite a label.
    pub fn set_label(&self, key: impl Into<String>, value: impl Into<String>) -> &Self {
        self.with_store(|store| store.set(key, value))
    }

    /// Insert a label if a value is given, delete it otherwise.
    pub fn set_optional_label<V>(&self, key: impl Into<String>, value: Option<V>) -> &Self
    where
        V: Into<String>,
    {
        match value {
            Some(value) => self.set_label(key, value),
            None => {
                let key = key.into();
                self.delete_label(&key)
            }
        }
    }

    /// Delete a label; absent keys are ignored.
    pub fn delete_label(&self, key: &str) -> &Self {
        self.with_store(|store| store.delete(key))
    }

    /// Apply each present label in order, skipping `None` entries.
    ///
    /// Accepts plain [`Label`]s as well as `Option<Label>`s.
    pub fn set_pairs<I>(&self, pairs: I) -> &Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Label>>,
    {
        self.with_store(|store| {
            for pair in pairs.into_iter().filter_map(Into::into) {
                let (key, value) = pair.into_parts();
                store.set(key, value);
            }
        })
    }

    /// Insert or overwrite all given labels at once.
    pub fn set_labels(&self, labels: Labels) -> &Self {
        self.with_store(|store| store.extend(labels))
    }

    /// Copy of the current labels; empty for a dry handle.
    pub fn labels(&self) -> Labels {
        self.store
            .as_ref()
            .map(|store| lock(store).labels())
            .unwrap_or_default()
    }

    /// Returns `true` if this handle has no store.
    pub fn is_dry(&self) -> bool {
        self.store.is_none()
    }

    /// The bound store, if any.
    pub fn store(&self) -> Option<&SharedStore> {
        self.store.as_ref()
    }

    fn with_store(&self, f: impl FnOnce(&mut LabelStore)) -> &Self {
        if let Some(store) = &self.store {
            f(&mut lock(store));
        }
        self
    }
}
