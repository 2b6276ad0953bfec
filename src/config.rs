//! TOML configuration
//!
//! ```toml
//! threads = 8
//!
//! [archive]
//! base = "/p/user_pub/xclim/"
//!
//! [esgf]
//! node = "https://esgf-node.llnl.gov/esg-search/"
//! verify_ssl = true
//! timeout_secs = 60
//!
//! [trim]
//! criteria = ["cdate", "ver", "tpoints"]
//! ```
//!
//! Every section and field is optional.

use crate::constant::{DEFAULT_XML_BASE, ESGF_SEARCH_URL};
use crate::errors::Result;
use crate::esgf::EsgfSettings;
use crate::wrangle::SelectionCriterion;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level climlib configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimlibConfig {
    /// Worker threads for metadata scanning (defaults to all cores).
    #[serde(default)]
    pub threads: Option<usize>,

    /// Local archive settings.
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// ESGF node settings.
    #[serde(default)]
    pub esgf: EsgfConfig,

    /// Duplicate trimming settings.
    #[serde(default)]
    pub trim: TrimConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    #[serde(default = "default_base")]
    pub base: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EsgfConfig {
    #[serde(default = "default_node")]
    pub node: String,
    #[serde(default = "default_true")]
    pub verify_ssl: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrimConfig {
    #[serde(default = "SelectionCriterion::default_cascade")]
    pub criteria: Vec<SelectionCriterion>,
}

fn default_base() -> PathBuf {
    PathBuf::from(DEFAULT_XML_BASE)
}

fn default_node() -> String {
    ESGF_SEARCH_URL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
        }
    }
}

impl Default for EsgfConfig {
    fn default() -> Self {
        Self {
            node: default_node(),
            verify_ssl: true,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            criteria: SelectionCriterion::default_cascade(),
        }
    }
}

impl ClimlibConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load the configuration at `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_toml_str(&fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }

    /// Connection settings for the configured ESGF node
    #[must_use]
    pub fn esgf_settings(&self) -> EsgfSettings {
        EsgfSettings {
            node: self.esgf.node.clone(),
            verify_ssl: self.esgf.verify_ssl,
            timeout: Duration::from_secs(self.esgf.timeout_secs),
        }
    }
}
