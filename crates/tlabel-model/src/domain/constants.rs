//! Common model-level constants.

/// Attribute-name prefix used when a widget is attached without an explicit prefix.
///
/// A label `type = button` is rendered as `data-test-type="button"`.
pub const DEFAULT_PREFIX: &str = "data-test-";
