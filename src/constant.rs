//! Constants and lookups shared across the crate
//!
//! Archive locations, the ESGF search endpoint, and the layout of the dotted
//! file names used in the local CMIP xml archive.

/// Root of the local CMIP xml archive.
pub const DEFAULT_XML_BASE: &str = "/p/user_pub/xclim/";

/// ESGF search endpoint (LLNL node).
pub const ESGF_SEARCH_URL: &str = "https://esgf-node.llnl.gov/esg-search/";

/// Creation date assumed for files that carry none: 9am Monday 6th March 1989.
pub const PCMDI_DAWN_OF_TIME: &str = "1989-03-06T17:00:00Z";

/// Multiplier applied to single-digit version numbers so that `v1` outranks
/// any date-stamped version.
pub const VERSION_NUMBER_WEIGHT: u64 = 100_000_000;

/// Versions below this value are treated as plain version numbers.
pub const VERSION_NUMBER_LIMIT: u64 = 10;

/// Version label that carries no ordering information.
pub const LATEST_VERSION: &str = "latest";

/// Substring of a dataset directory marking local republication.
pub const PUBLISH_MARKER: &str = "publish";

/// Name of the time axis in CDML and NetCDF files.
pub const TIME_AXIS: &str = "time";

/// Global attribute holding the creation timestamp.
pub const CREATION_DATE_ATTR: &str = "creation_date";

/// Wildcard used for unconstrained facets.
pub const WILDCARD: &str = "*";

/// Field positions in an archive file name such as
/// `CMIP5.CMIP.historical.NCAR.CCSM4.r1i1p1.mon.tas.atmos.glb-z1-gu.v20160829.0000000.0.xml`.
pub mod filename_field {
    pub const MIP_ERA: usize = 0;
    pub const ACTIVITY: usize = 1;
    pub const EXPERIMENT: usize = 2;
    pub const INSTITUTE: usize = 3;
    pub const MODEL: usize = 4;
    pub const REALIZATION: usize = 5;
    pub const FREQUENCY: usize = 6;
    pub const VARIABLE: usize = 7;
    pub const REALM: usize = 8;
    pub const GRID_LABEL: usize = 9;
    pub const VERSION: usize = 10;

    /// Minimum number of dot-separated fields in a valid name.
    pub const MIN_FIELDS: usize = VERSION + 1;
}

/// Facet names understood by the local archive search, in directory order.
pub const ARCHIVE_FACETS: [&str; 9] = [
    "mip_era",
    "activity",
    "experiment",
    "realm",
    "frequency",
    "variable",
    "model",
    "realization",
    "grid_label",
];
