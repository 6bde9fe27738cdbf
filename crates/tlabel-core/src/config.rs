use serde::{Deserialize, Serialize};
use tlabel_model::{DEFAULT_PREFIX, validate_prefix};

use crate::{
    error::{CoreError, CoreResult},
    gate::Policy,
};

/// Label tracking configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Attribute-name prefix given to every store created by the context.
    pub prefix: String,
    /// Whether label tracking starts enabled.
    ///
    /// `false` installs [`Policy::inactive`] so every handle is dry.
    pub enabled: bool,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            enabled: true,
        }
    }
}

impl LabelConfig {
    /// Check the configuration before it is used.
    pub fn validate(&self) -> CoreResult<()> {
        validate_prefix(&self.prefix).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Initial gate policy implied by this configuration.
    pub fn initial_policy(&self) -> Option<Policy> {
        (!self.enabled).then(Policy::inactive)
    }
}
