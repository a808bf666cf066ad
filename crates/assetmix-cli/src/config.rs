//! Configuration file handling.
//!
//! The configuration is a small JSON document:
//!
//! ```json
//! {
//!   "excel_filename": "AssetAllocation.csv",
//!   "cash_symbols": ["SPAXX**", "FDRXX**"],
//!   "account_match": "suffix",
//!   "account_nicknames": { "*1234": "Roth IRA" },
//!   "nicknames_file": "nicknames.csv",
//!   "history_path": "history.log"
//! }
//! ```
//!
//! Relative paths are resolved against the working directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use assetmix_core::{AccountMatch, AllocationConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};

/// File name searched for when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default run history file.
pub const DEFAULT_HISTORY_PATH: &str = "history.log";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Holdings export to load when `--input` is not given.
    #[serde(default)]
    pub excel_filename: Option<PathBuf>,

    /// Symbols removed from the "minus cash" views.
    #[serde(default)]
    pub cash_symbols: Vec<String>,

    /// How `--account` selectors are matched.
    #[serde(default)]
    pub account_match: AccountMatch,

    /// Display names keyed by account selector.
    #[serde(default)]
    pub account_nicknames: BTreeMap<String, String>,

    /// Optional CSV file with `Account,Nickname` rows, merged into
    /// `account_nicknames` (inline entries win).
    #[serde(default)]
    pub nicknames_file: Option<PathBuf>,

    /// Where run transcripts are appended.
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,
}

fn default_history_path() -> PathBuf {
    PathBuf::from(DEFAULT_HISTORY_PATH)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            excel_filename: None,
            cash_symbols: Vec::new(),
            account_match: AccountMatch::default(),
            account_nicknames: BTreeMap::new(),
            nicknames_file: None,
            history_path: default_history_path(),
        }
    }
}

impl AppConfig {
    /// Loads a configuration file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Parses a configuration document.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Finds and loads the configuration.
    ///
    /// An explicit path must exist. Otherwise `./config.json` is tried, then
    /// `<user config dir>/assetmix/config.json`; if neither exists the
    /// defaults are used. Returns the config and the file it came from.
    pub fn resolve(explicit: Option<&Path>) -> CliResult<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        for candidate in search_paths() {
            if candidate.exists() {
                debug!(path = %candidate.display(), "loading configuration");
                return Ok((Self::load(&candidate)?, Some(candidate)));
            }
        }

        warn!("no {} found, using defaults", CONFIG_FILE_NAME);
        Ok((Self::default(), None))
    }

    /// Returns the subset of settings the allocation engine needs.
    #[must_use]
    pub fn allocation_config(&self) -> AllocationConfig {
        AllocationConfig::new()
            .with_cash_symbols(&self.cash_symbols)
            .with_account_match(self.account_match)
    }

    /// Returns the holdings file to load, preferring `input`.
    pub fn holdings_path(&self, input: Option<&Path>) -> CliResult<PathBuf> {
        input
            .map(Path::to_path_buf)
            .or_else(|| self.excel_filename.clone())
            .ok_or_else(|| CliError::Config {
                path: PathBuf::from(CONFIG_FILE_NAME),
                reason: "no holdings file: set excel_filename or pass --input".into(),
            })
    }

    /// Merges nicknames loaded from [`Self::nicknames_file`]. Inline entries
    /// take precedence.
    pub fn merge_nicknames(&mut self, loaded: BTreeMap<String, String>) {
        for (selector, nickname) in loaded {
            self.account_nicknames.entry(selector).or_insert(nickname);
        }
    }

    /// Returns the nickname for `account_id`, matching keys with the
    /// configured policy. An exact key wins over a partial one.
    #[must_use]
    pub fn nickname_for(&self, account_id: &str) -> Option<&str> {
        if let Some(name) = self.account_nicknames.get(account_id.trim()) {
            return Some(name.as_str());
        }
        self.account_nicknames
            .iter()
            .find(|(selector, _)| {
                !selector.trim().is_empty() && self.account_match.matches(selector, account_id)
            })
            .map(|(_, name)| name.as_str())
    }
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("assetmix").join(CONFIG_FILE_NAME));
    }
    paths
}
