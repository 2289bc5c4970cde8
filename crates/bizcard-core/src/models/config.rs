//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the bizcard pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BizcardConfig {
    /// Card extraction configuration.
    pub extraction: ExtractionConfig,
}

impl Default for BizcardConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
        }
    }
}

/// Card extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Rescan the top of the card for a company line when the main walk
    /// finds none.
    pub company_backfill: bool,

    /// Fall back to the first short line when no name was recognized.
    pub name_backfill: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            company_backfill: true,
            name_backfill: true,
        }
    }
}

impl BizcardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_both_backfill_passes_on() {
        let config: BizcardConfig = serde_json::from_str("{}").unwrap();

        assert!(config.extraction.company_backfill);
        assert!(config.extraction.name_backfill);
    }

    #[test]
    fn partial_config_overrides_one_knob() {
        let config: BizcardConfig =
            serde_json::from_str(r#"{"extraction": {"name_backfill": false}}"#).unwrap();

        assert!(config.extraction.company_backfill);
        assert!(!config.extraction.name_backfill);
    }
}
