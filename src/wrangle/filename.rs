//! Parsing of dotted archive file names and version ranking

use crate::constant::{
    filename_field as field, LATEST_VERSION, VERSION_NUMBER_LIMIT, VERSION_NUMBER_WEIGHT,
};
use crate::errors::{ClimlibError, Result};
use std::path::Path;

/// Facets encoded in an archive xml file name.
///
/// Names look like
/// `CMIP5.CMIP.historical.NCAR.CCSM4.r1i1p1.mon.tas.atmos.glb-z1-gu.v20160829.0000000.0.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlFileName {
    pub mip_era: String,
    pub activity: String,
    pub experiment: String,
    pub institute: String,
    pub model: String,
    pub realization: String,
    pub frequency: String,
    pub variable: String,
    pub realm: String,
    pub grid_label: String,
    pub version: String,
}

impl XmlFileName {
    /// Parse the final path component of an archive file
    pub fn parse(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClimlibError::InvalidFileName {
                path: path.display().to_string(),
                reason: "path has no UTF-8 file name".to_string(),
            })?;

        let parts: Vec<&str> = name.split('.').collect();
        if parts.len() < field::MIN_FIELDS {
            return Err(ClimlibError::InvalidFileName {
                path: path.display().to_string(),
                reason: format!(
                    "expected at least {} dot-separated fields, found {}",
                    field::MIN_FIELDS,
                    parts.len()
                ),
            });
        }

        let at = |i: usize| parts[i].to_string();
        Ok(Self {
            mip_era: at(field::MIP_ERA),
            activity: at(field::ACTIVITY),
            experiment: at(field::EXPERIMENT),
            institute: at(field::INSTITUTE),
            model: at(field::MODEL),
            realization: at(field::REALIZATION),
            frequency: at(field::FREQUENCY),
            variable: at(field::VARIABLE),
            realm: at(field::REALM),
            grid_label: at(field::GRID_LABEL),
            version: at(field::VERSION),
        })
    }

    /// Numeric rank of this file's version
    pub fn version_weight(&self) -> Result<u64> {
        version_weight(&self.version)
    }
}

/// Rank a version label: the larger the number, the more recent the version.
///
/// Date-stamped versions (`v20190829`) rank by their date. Plain version
/// numbers (`v1`) are scaled by [`VERSION_NUMBER_WEIGHT`] so they take
/// precedence. `latest` ranks lowest.
pub fn version_weight(version: &str) -> Result<u64> {
    if version == LATEST_VERSION {
        return Ok(0);
    }

    let value = version
        .replace('v', "")
        .parse::<u64>()
        .map_err(|_| ClimlibError::InvalidVersion {
            version: version.to_string(),
        })?;

    if value < VERSION_NUMBER_LIMIT {
        Ok(value * VERSION_NUMBER_WEIGHT)
    } else {
        Ok(value)
    }
}
