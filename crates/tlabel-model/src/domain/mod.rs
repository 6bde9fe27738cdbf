mod label;
pub use label::Label;

mod labels;
pub use labels::Labels;

mod constants;
pub use constants::DEFAULT_PREFIX;

/// Identifier of a host widget.
///
/// Used to route snapshots to the matching client counterpart and as a log field.
pub type WidgetId = String;
