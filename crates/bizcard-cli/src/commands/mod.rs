//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod parse;

use bizcard_core::models::config::BizcardConfig;

/// Load the effective configuration for a run.
pub(crate) fn load_config(path: Option<&str>) -> anyhow::Result<BizcardConfig> {
    match path {
        Some(p) => Ok(BizcardConfig::from_file(std::path::Path::new(p))?),
        None => Ok(BizcardConfig::default()),
    }
}
