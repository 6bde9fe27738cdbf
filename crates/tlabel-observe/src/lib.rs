mod logger;
pub use logger::*;

mod sink;

#[cfg(feature = "sink")]
pub use sink::TracingSink;
