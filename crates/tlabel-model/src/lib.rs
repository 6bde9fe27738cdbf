mod domain;
pub use domain::DEFAULT_PREFIX;
pub use domain::{Label, Labels, WidgetId};

mod error;
pub use error::{ModelError, ModelResult};

mod snapshot;
pub use snapshot::{Snapshot, validate_prefix};
