use std::sync::Mutex;

use tlabel_client::{LabelConnector, MemoryElement, Reconcile};
use tlabel_core::{CoreError, CoreResult, LabelContext, Policy, SnapshotSink, Widget, flush};
use tlabel_model::Snapshot;

/// Transport that serializes snapshots to JSON, like a real wire would.
#[derive(Default)]
struct WireSink {
    frames: Mutex<Vec<(String, String)>>,
}

impl WireSink {
    fn drain(&self) -> Vec<(String, Snapshot)> {
        std::mem::take(&mut *self.frames.lock().unwrap())
            .into_iter()
            .map(|(id, json)| (id, serde_json::from_str(&json).unwrap()))
            .collect()
    }
}

impl SnapshotSink for WireSink {
    fn name(&self) -> &'static str {
        "wire"
    }

    fn deliver(&self, widget: &str, snapshot: Snapshot) -> CoreResult<()> {
        let json = serde_json::to_string(&snapshot).map_err(|e| CoreError::Delivery {
            sink: self.name(),
            reason: e.to_string(),
        })?;
        self.frames.lock().unwrap().push((widget.to_string(), json));
        Ok(())
    }
}

#[test]
fn labelled_button_renders_test_attributes() {
    let ctx = LabelContext::new();
    let sink = WireSink::default();
    let button = Widget::new("button");

    ctx.apply(&button)
        .set_label("type", "button")
        .set_label("test", "test");

    let mut connector = LabelConnector::new(Some(MemoryElement::new("button")));
    connector.on_attach();

    assert!(flush(&button, &sink).unwrap());
    let frames = sink.drain();
    assert_eq!(frames.len(), 1, "exactly one snapshot expected");

    let (widget, snapshot) = frames.into_iter().next().unwrap();
    assert_eq!(widget, "button");
    assert_eq!(snapshot.prefix, "data-test-");
    assert_eq!(snapshot.labels.len(), 2);

    let out = connector.on_state_changed(snapshot);
    assert_eq!(
        out,
        Reconcile::Applied {
            removed: 0,
            applied: 2,
            rejected: 0
        }
    );

    let el = connector.parent().as_ref().unwrap();
    let attrs: Vec<_> = el.attributes_with_prefix("data-test-").collect();
    assert_eq!(
        attrs,
        vec![("data-test-test", "test"), ("data-test-type", "button")]
    );
    assert_eq!(
        el.render(),
        r#"<button data-test-test="test" data-test-type="button"></button>"#
    );
}

#[test]
fn later_changes_replace_rendered_attributes() {
    let ctx = LabelContext::new();
    let sink = WireSink::default();
    let field = Widget::new("field");
    let mut connector = LabelConnector::new(Some(MemoryElement::new("input")));

    let handle = ctx.apply(&field);
    handle.set_label("a", "1");
    flush(&field, &sink).unwrap();
    for (_, snap) in sink.drain() {
        connector.on_state_changed(snap);
    }

    handle.delete_label("a").set_label("b", "2");
    handle.delete_label("missing");
    flush(&field, &sink).unwrap();
    let frames = sink.drain();
    assert_eq!(frames.len(), 1);
    for (_, snap) in frames {
        connector.on_state_changed(snap);
    }

    let el = connector.parent().as_ref().unwrap();
    assert_eq!(el.attribute("data-test-a"), None);
    assert_eq!(el.attribute("data-test-b"), Some("2"));
}

#[test]
fn inactive_gate_renders_nothing() {
    let ctx = LabelContext::new();
    ctx.set_policy(Some(Policy::inactive()));
    let sink = WireSink::default();
    let button = Widget::new("button");

    let handle = ctx.apply(&button);
    handle.set_label("type", "button");

    assert!(handle.is_dry());
    assert!(!flush(&button, &sink).unwrap());
    assert!(sink.drain().is_empty());
}
