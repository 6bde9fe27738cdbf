use serde::{Deserialize, Deserializer, Serialize};

use crate::{DEFAULT_PREFIX, Labels, ModelError, ModelResult};

/// Shared state pushed from the server-side store to its client counterpart.
///
/// A snapshot is an immutable copy taken at delivery time. The client renders
/// every label as one attribute named `prefix + key`.
///
/// Wire shape:
///
/// ```json
/// { "labels": { "type": "button" }, "prefix": "data-test-" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Labels of the widget at the time the snapshot was taken.
    #[serde(default)]
    pub labels: Labels,
    /// Attribute-name prefix applied to every key.
    #[serde(default = "default_prefix", deserialize_with = "deserialize_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn deserialize_prefix<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let prefix = String::deserialize(deserializer)?;
    validate_prefix(&prefix).map_err(serde::de::Error::custom)?;
    Ok(prefix)
}

/// Check an attribute-name prefix.
///
/// The prefix must be non-empty and free of whitespace. An empty prefix would
/// render bare keys as attributes and overwrite regular markup.
pub fn validate_prefix(prefix: &str) -> ModelResult<()> {
    if prefix.is_empty() {
        return Err(ModelError::InvalidPrefix("prefix must not be empty".into()));
    }
    if prefix.chars().any(char::is_whitespace) {
        return Err(ModelError::InvalidPrefix(format!(
            "prefix must not contain whitespace: {prefix:?}"
        )));
    }
    Ok(())
}

impl Snapshot {
    /// Create a snapshot with the default prefix.
    pub fn new(labels: Labels) -> Self {
        Self {
            labels,
            prefix: default_prefix(),
        }
    }

    /// Replace the prefix.
    ///
    /// Fails with [`ModelError::InvalidPrefix`] when [`validate_prefix`] does.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> ModelResult<Self> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        self.prefix = prefix;
        Ok(self)
    }

    /// Attribute name for the given key.
    ///
    /// Plain concatenation; the key is not escaped.
    pub fn attribute_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(Labels::default())
    }
}
