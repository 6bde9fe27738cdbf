use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tlabel_core::LabelConfig;
use tlabel_observe::LoggerConfig;

/// Demo configuration, read from an optional JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub logger: LoggerConfig,
    pub labels: LabelConfig,
}

impl DemoConfig {
    /// Load the configuration from `path`, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(cfg)
    }
}
