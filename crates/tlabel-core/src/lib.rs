pub mod component;
pub mod config;
pub mod context;
pub mod error;
pub mod gate;
pub mod handle;
pub mod store;
pub mod sync;

pub use component::{Component, Widget};
pub use config::LabelConfig;
pub use context::LabelContext;
pub use error::{CoreError, CoreResult};
pub use gate::{ActivationGate, Interceptor, Policy};
pub use handle::TestLabel;
pub use store::{LabelStore, SharedStore};
pub use sync::{SnapshotSink, flush, flush_all};
