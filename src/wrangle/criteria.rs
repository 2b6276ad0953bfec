//! Selection criteria used to choose between duplicate archive files

use crate::errors::{ClimlibError, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A criterion that ranks files competing for the same model and realization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SelectionCriterion {
    /// Prefer the most recently created file
    #[serde(rename = "cdate")]
    CreationDate,
    /// Prefer the highest version weight
    #[serde(rename = "ver")]
    Version,
    /// Prefer the file with the most time steps
    #[serde(rename = "tpoints")]
    TimePoints,
    /// Prefer files in locally republished directories
    #[serde(rename = "publish")]
    Publish,
}

/// Value of a criterion for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionValue {
    /// Integer criteria keep the maximum
    Rank(u64),
    /// Boolean criteria keep the `true` files
    Flag(bool),
}

impl SelectionCriterion {
    /// Cascade used when the caller does not choose one
    pub const DEFAULT_CASCADE: [SelectionCriterion; 3] = [
        SelectionCriterion::CreationDate,
        SelectionCriterion::Version,
        SelectionCriterion::TimePoints,
    ];

    /// Short name used on the command line and in configuration files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreationDate => "cdate",
            Self::Version => "ver",
            Self::TimePoints => "tpoints",
            Self::Publish => "publish",
        }
    }

    /// Default cascade as an owned list
    pub fn default_cascade() -> Vec<SelectionCriterion> {
        Self::DEFAULT_CASCADE.to_vec()
    }
}

impl fmt::Display for SelectionCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionCriterion {
    type Err = ClimlibError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "cdate" => Ok(Self::CreationDate),
            "ver" => Ok(Self::Version),
            "tpoints" => Ok(Self::TimePoints),
            "publish" => Ok(Self::Publish),
            other => Err(ClimlibError::UnknownCriterion {
                name: other.to_string(),
            }),
        }
    }
}

/// Parse a comma separated cascade such as `publish,tpoints,ver,cdate`
pub fn parse_cascade(s: &str) -> Result<Vec<SelectionCriterion>> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(SelectionCriterion::from_str)
        .collect()
}
