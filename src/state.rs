use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Marker record written to the root of every created instance.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct InstanceInfo {
    pub(crate) component: String,
    pub(crate) version: String,
    pub(crate) created_ts: String,
}

impl InstanceInfo {
    pub(crate) fn new(component: &str) -> Result<Self> {
        let created_ts = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("Failed to format creation timestamp")?;
        Ok(Self {
            component: component.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            created_ts,
        })
    }

    #[cfg(test)]
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize instance info")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
