//! Wrangling of the in-house CMIP xml archives
//!
//! Most local CMIP data is reachable through xml spanning files whose names
//! encode the dataset facets. This module uses those names, plus a little
//! metadata from each file, to find datasets and reduce duplicate holdings to
//! a single file per model run.
//!
//! # Organization
//!
//! - [`filename`]: parsing dotted archive file names and ranking versions
//! - [`criteria`]: the selection criteria used to rank duplicates
//! - [`trim`]: reducing a file list to one file per model and realization
//! - [`search`]: facet searches over the archive and list filtering

pub mod criteria;
pub mod filename;
pub mod search;
pub mod trim;

pub use criteria::{parse_cascade, CriterionValue, SelectionCriterion};
pub use filename::{version_weight, XmlFileName};
pub use search::{find_in_list, XmlSearch};
pub use trim::{
    filter_xmls, read_records, trim_model_list, trim_model_report, trim_records, TrimGroup,
    TrimReport, XmlRecord,
};
