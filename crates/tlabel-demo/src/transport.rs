use tlabel_core::{CoreError, CoreResult, SnapshotSink};
use tlabel_model::{Snapshot, WidgetId};
use tokio::sync::mpsc;

/// Frame carried from the server side to the client task.
pub type Frame = (WidgetId, Snapshot);

/// Snapshot transport backed by an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Frame>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<Frame>) -> Self {
        Self { tx }
    }
}

impl SnapshotSink for ChannelSink {
    fn name(&self) -> &'static str {
        "channel"
    }

    fn deliver(&self, widget: &str, snapshot: Snapshot) -> CoreResult<()> {
        self.tx
            .send((widget.to_string(), snapshot))
            .map_err(|_| CoreError::Delivery {
                sink: self.name(),
                reason: "client side closed".into(),
            })
    }
}
