//! CLI command implementations.

pub mod accounts;
pub mod analyze;
pub mod config;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;

use std::path::{Path, PathBuf};

use assetmix_core::Holding;
use tracing::{debug, warn};

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::error::CliResult;
use crate::loader;

/// Settings shared by every command of one run.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Resolved configuration, nicknames merged.
    pub config: AppConfig,
    /// File the configuration came from, `None` for defaults.
    pub config_path: Option<PathBuf>,
    /// Holdings file given on the command line.
    pub input: Option<PathBuf>,
    /// Requested output format.
    pub format: OutputFormat,
}

impl RunContext {
    /// Resolves configuration and merges the optional nicknames file.
    pub fn load(
        config: Option<&Path>,
        input: Option<PathBuf>,
        format: OutputFormat,
    ) -> CliResult<Self> {
        let (mut app_config, config_path) = AppConfig::resolve(config)?;

        if let Some(path) = app_config.nicknames_file.clone() {
            match loader::load_nicknames(&path) {
                Ok(nicknames) => {
                    debug!(path = %path.display(), count = nicknames.len(), "loaded nicknames");
                    app_config.merge_nicknames(nicknames);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping nicknames file"),
            }
        }

        Ok(Self {
            config: app_config,
            config_path,
            input,
            format,
        })
    }

    /// Loads every holding from the configured export.
    pub fn holdings(&self) -> CliResult<Vec<Holding>> {
        let path = self.config.holdings_path(self.input.as_deref())?;
        loader::load_holdings(&path)
    }
}
