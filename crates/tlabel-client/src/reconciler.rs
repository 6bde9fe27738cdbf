use std::collections::BTreeSet;

use tlabel_model::Snapshot;
use tracing::{debug, trace, warn};

use crate::target::AttributeTarget;

/// Outcome of a single [`AttributeReconciler::reconcile`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// The target was not resolved; nothing was touched.
    Deferred,
    /// The previous attributes were removed and the snapshot applied.
    Applied {
        removed: usize,
        applied: usize,
        rejected: usize,
    },
}

/// Rewrites the prefixed label attributes of a target element.
///
/// Every pass removes all attributes applied by the previous pass and then
/// applies the whole snapshot. Removal uses the prefix the keys were applied
/// with, so a prefix change never leaves stale attributes behind. A removal
/// the target refuses is retried on the next pass.
#[derive(Debug, Default)]
pub struct AttributeReconciler {
    applied: BTreeSet<String>,
    applied_prefix: String,
    /// Attribute names whose removal failed.
    stale: BTreeSet<String>,
}

impl AttributeReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `snapshot` to `target`.
    ///
    /// An unresolved target defers the pass without touching the bookkeeping;
    /// the next trigger starts over. An attribute rejected by the target is
    /// logged and skipped, it is not recorded as applied.
    pub fn reconcile<T>(&mut self, target: Option<&mut T>, snapshot: &Snapshot) -> Reconcile
    where
        T: AttributeTarget + ?Sized,
    {
        let Some(target) = target else {
            trace!("render target unresolved, deferring");
            return Reconcile::Deferred;
        };

        let previous = std::mem::take(&mut self.applied)
            .into_iter()
            .map(|key| format!("{}{}", self.applied_prefix, key));
        let mut names = std::mem::take(&mut self.stale);
        names.extend(previous);

        let mut removed = 0;
        for name in names {
            match target.remove_attribute(&name) {
                Ok(()) => removed += 1,
                Err(e) => {
                    warn!(attribute = %name, error = %e, "failed to remove label attribute, will retry");
                    self.stale.insert(name);
                }
            }
        }

        let mut rejected = 0;
        for (key, value) in snapshot.labels.iter() {
            let name = snapshot.attribute_name(key);
            match target.set_attribute(&name, value) {
                Ok(()) => {
                    self.stale.remove(&name);
                    self.applied.insert(key.to_string());
                }
                Err(e) => {
                    rejected += 1;
                    warn!(attribute = %name, error = %e, "label attribute rejected");
                }
            }
        }
        self.applied_prefix.clone_from(&snapshot.prefix);

        let applied = self.applied.len();
        debug!(
            removed,
            applied,
            rejected,
            stale = self.stale.len(),
            prefix = %snapshot.prefix,
            "labels reconciled"
        );
        Reconcile::Applied {
            removed,
            applied,
            rejected,
        }
    }

    /// Keys currently reflected on the target.
    pub fn applied_keys(&self) -> impl Iterator<Item = &str> {
        self.applied.iter().map(String::as_str)
    }

    /// Attribute names still waiting to be removed from the target.
    pub fn stale_attributes(&self) -> impl Iterator<Item = &str> {
        self.stale.iter().map(String::as_str)
    }

    /// Forget the applied keys, e.g. after the target element was replaced.
    pub fn reset(&mut self) {
        self.applied.clear();
        self.applied_prefix.clear();
        self.stale.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::TargetError, target::MemoryElement};
    use tlabel_model::Labels;

    fn snap(pairs: &[(&str, &str)]) -> Snapshot {
        Snapshot::new(pairs.iter().copied().collect::<Labels>())
    }

    fn prefixed<'a>(el: &'a MemoryElement, prefix: &'a str) -> Vec<(&'a str, &'a str)> {
        el.attributes_with_prefix(prefix).collect()
    }

    #[test]
    fn applies_snapshot_to_fresh_target() {
        let mut el = MemoryElement::new("button");
        let mut rec = AttributeReconciler::new();

        let out = rec.reconcile(Some(&mut el), &snap(&[("type", "button"), ("test", "test")]));

        assert_eq!(
            out,
            Reconcile::Applied {
                removed: 0,
                applied: 2,
                rejected: 0
            }
        );
        assert_eq!(
            prefixed(&el, "data-test-"),
            vec![("data-test-test", "test"), ("data-test-type", "button")]
        );
    }

    #[test]
    fn second_snapshot_replaces_first() {
        let mut el = MemoryElement::new("div");
        let mut rec = AttributeReconciler::new();

        rec.reconcile(Some(&mut el), &snap(&[("a", "1")]));
        let out = rec.reconcile(Some(&mut el), &snap(&[("b", "2")]));

        assert_eq!(
            out,
            Reconcile::Applied {
                removed: 1,
                applied: 1,
                rejected: 0
            }
        );
        assert_eq!(el.attribute("data-test-a"), None);
        assert_eq!(prefixed(&el, "data-test-"), vec![("data-test-b", "2")]);
        assert_eq!(rec.applied_keys().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn unrelated_attributes_are_untouched() {
        let mut el = MemoryElement::new("div");
        el.set_attribute("class", "x").unwrap();
        el.set_attribute("data-test-manual", "keep").unwrap();

        let mut rec = AttributeReconciler::new();
        rec.reconcile(Some(&mut el), &snap(&[("a", "1")]));
        rec.reconcile(Some(&mut el), &Snapshot::default());

        assert_eq!(el.attribute("class"), Some("x"));
        assert_eq!(el.attribute("data-test-manual"), Some("keep"));
        assert_eq!(el.attribute("data-test-a"), None);
    }

    #[test]
    fn unresolved_target_defers_without_touching_bookkeeping() {
        let mut el = MemoryElement::new("div");
        let mut rec = AttributeReconciler::new();
        rec.reconcile(Some(&mut el), &snap(&[("a", "1")]));

        let out = rec.reconcile(None::<&mut MemoryElement>, &snap(&[("b", "2")]));
        assert_eq!(out, Reconcile::Deferred);
        assert_eq!(rec.applied_keys().collect::<Vec<_>>(), vec!["a"]);

        rec.reconcile(Some(&mut el), &snap(&[("b", "2")]));
        assert_eq!(prefixed(&el, "data-test-"), vec![("data-test-b", "2")]);
    }

    #[test]
    fn prefix_change_removes_old_attributes() {
        let mut el = MemoryElement::new("div");
        let mut rec = AttributeReconciler::new();
        rec.reconcile(Some(&mut el), &snap(&[("a", "1")]));

        let qa = snap(&[("a", "1")]).with_prefix("qa-").unwrap();
        rec.reconcile(Some(&mut el), &qa);

        assert_eq!(el.attribute("data-test-a"), None);
        assert_eq!(el.attribute("qa-a"), Some("1"));
    }

    #[test]
    fn rejected_attribute_is_skipped_and_not_recorded() {
        let mut el = MemoryElement::new("div");
        let mut rec = AttributeReconciler::new();

        let out = rec.reconcile(Some(&mut el), &snap(&[("ok", "1"), ("bad key", "2")]));
        assert_eq!(
            out,
            Reconcile::Applied {
                removed: 0,
                applied: 1,
                rejected: 1
            }
        );
        assert_eq!(rec.applied_keys().collect::<Vec<_>>(), vec!["ok"]);
        assert_eq!(prefixed(&el, "data-test-"), vec![("data-test-ok", "1")]);
    }

    #[test]
    fn reset_forgets_applied_keys() {
        let mut old = MemoryElement::new("div");
        let mut rec = AttributeReconciler::new();
        rec.reconcile(Some(&mut old), &snap(&[("a", "1")]));

        rec.reset();
        assert_eq!(rec.applied_keys().count(), 0);

        let mut fresh = MemoryElement::new("div");
        let out = rec.reconcile(Some(&mut fresh), &snap(&[("a", "1")]));
        assert_eq!(
            out,
            Reconcile::Applied {
                removed: 0,
                applied: 1,
                rejected: 0
            }
        );
        assert_eq!(old.attribute("data-test-a"), Some("1"));
    }

    /// Element that refuses removals while `locked` is set.
    struct LockedElement {
        inner: MemoryElement,
        locked: bool,
    }

    impl AttributeTarget for LockedElement {
        fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), TargetError> {
            self.inner.set_attribute(name, value)
        }

        fn remove_attribute(&mut self, name: &str) -> Result<(), TargetError> {
            if self.locked {
                return Err(TargetError::Rejected {
                    name: name.to_string(),
                    reason: "locked".into(),
                });
            }
            self.inner.remove_attribute(name)
        }
    }

    #[test]
    fn failed_removal_is_retried_on_next_pass() {
        let mut el = LockedElement {
            inner: MemoryElement::new("div"),
            locked: false,
        };
        let mut rec = AttributeReconciler::new();
        rec.reconcile(Some(&mut el), &snap(&[("a", "1")]));

        el.locked = true;
        let out = rec.reconcile(Some(&mut el), &snap(&[("b", "2")]));
        assert_eq!(
            out,
            Reconcile::Applied {
                removed: 0,
                applied: 1,
                rejected: 0
            }
        );
        assert_eq!(el.inner.attribute("data-test-a"), Some("1"));
        assert_eq!(rec.stale_attributes().collect::<Vec<_>>(), vec!["data-test-a"]);

        el.locked = false;
        rec.reconcile(Some(&mut el), &snap(&[("b", "2")]));
        assert_eq!(el.inner.attribute("data-test-a"), None);
        assert_eq!(prefixed(&el.inner, "data-test-"), vec![("data-test-b", "2")]);
        assert_eq!(rec.stale_attributes().count(), 0);
    }

    #[test]
    fn reapplied_attribute_is_no_longer_stale() {
        let mut el = LockedElement {
            inner: MemoryElement::new("div"),
            locked: false,
        };
        let mut rec = AttributeReconciler::new();
        rec.reconcile(Some(&mut el), &snap(&[("a", "1")]));

        el.locked = true;
        rec.reconcile(Some(&mut el), &snap(&[("a", "2")]));
        assert_eq!(rec.stale_attributes().count(), 0);
        assert_eq!(el.inner.attribute("data-test-a"), Some("2"));
    }
}
