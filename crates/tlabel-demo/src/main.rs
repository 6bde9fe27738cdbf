use std::{collections::BTreeMap, path::PathBuf};

use tokio::sync::mpsc;
use tracing::{info, warn};

use tlabel_client::{LabelConnector, MemoryElement, Reconcile};
use tlabel_core::{Component, LabelContext, Widget, flush_all};
use tlabel_model::Label;
use tlabel_observe::{TracingSink, init_local_offset, init_logger};

mod config;
use config::DemoConfig;

mod transport;
use transport::{ChannelSink, Frame};

type Connectors = BTreeMap<String, LabelConnector<Option<MemoryElement>>>;

fn main() -> anyhow::Result<()> {
    // Local offset detection must happen before the runtime spawns threads.
    init_local_offset();

    let cfg = DemoConfig::load(std::env::args_os().nth(1).map(PathBuf::from).as_deref())?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cfg))
}

async fn run(cfg: DemoConfig) -> anyhow::Result<()> {
    // 1) logger
    init_logger(&cfg.logger)?;
    info!("logger initialized");

    // 2) label context
    let ctx = LabelContext::from_config(cfg.labels)?;
    info!(custom_policy = ctx.has_custom_policy(), "label context ready");

    // 3) client side: one connector per rendered widget
    let mut connectors = Connectors::new();
    connectors.insert("button".into(), mounted("button"));
    connectors.insert("name".into(), mounted("input"));
    for connector in connectors.values_mut() {
        connector.on_attach();
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let client = tokio::spawn(client_loop(rx, connectors));

    // 4) server side
    let button = Widget::new("button");
    let name = Widget::new("name");

    ctx.apply(&button)
        .set_label("type", "button")
        .set_label("test", "test");
    ctx.apply(&name).set_pairs([
        Some(Label::new("type", "text-field")?),
        None,
        Some(Label::new("field", "name")?),
    ]);

    let sink = TracingSink::new(ChannelSink::new(tx));
    let widgets = [&button, &name];
    let sent = flush_all(widgets.iter().copied(), &sink)?;
    info!(sent, "first flush");

    // Re-applying reuses the store; deleting an absent key sends nothing.
    ctx.apply(&name)
        .set_optional_label("field", None::<String>)
        .delete_label("never-set");
    let sent = flush_all(widgets.iter().copied(), &sink)?;
    info!(sent, "second flush");

    // 5) close the transport and print the rendered widgets
    drop(sink);
    let connectors = client.await?;
    for (id, connector) in &connectors {
        match connector.parent() {
            Some(el) => println!("{id}: {}", el.render()),
            None => warn!(widget = %id, "widget never mounted"),
        }
    }

    for widget in widgets {
        info!(widget = widget.id(), "done");
    }
    Ok(())
}

fn mounted(tag: &str) -> LabelConnector<Option<MemoryElement>> {
    LabelConnector::new(Some(MemoryElement::new(tag)))
}

async fn client_loop(mut rx: mpsc::UnboundedReceiver<Frame>, mut connectors: Connectors) -> Connectors {
    while let Some((widget, snapshot)) = rx.recv().await {
        let Some(connector) = connectors.get_mut(&widget) else {
            warn!(widget = %widget, "snapshot for unknown widget dropped");
            continue;
        };
        if let Reconcile::Applied { applied, .. } = connector.on_state_changed(snapshot) {
            info!(widget = %widget, applied, "labels rendered");
        }
    }
    connectors
}
