//! climlib: convenience utilities for climate model data
//!
//! A Rust library for working with the in-house CMIP archives and the Earth
//! System Grid Federation. climlib finds xml spanning files by CMIP facets,
//! reduces duplicate holdings to one file per model run, reads the metadata
//! needed to rank files, and queries ESGF for model availability and dataset
//! citations.
//!
//! ## Key Features
//!
//! - **Archive Search**: Glob the local xml archive by mip era, experiment, variable, model, ...
//! - **Duplicate Trimming**: Keep one file per model and realization using a cascade of criteria
//! - **Metadata Inspection**: Creation date, republication and time steps from CDML or NetCDF
//! - **ESGF Search**: Available models, common model sets and dataset citations
//! - **Parallel Scanning**: Metadata for large file lists is read with Rayon
//!
//! ## Module Organization
//!
//! - [`wrangle`]: archive search, file name parsing and duplicate trimming
//! - [`io`]: CDML and NetCDF metadata readers
//! - [`esgf`]: ESGF search client and citations
//! - [`constant`]: archive locations, endpoints and file name layout
//! - [`config`]: TOML configuration
//! - [`parallel`]: thread pool configuration
//! - [`util`]: helpers shared by the command line front end
//! - [`errors`]: centralized error handling
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use climlib::prelude::*;
//!
//! // All CCSM4 historical tas files, one per realization
//! let files = XmlSearch::new()
//!     .mip_era("CMIP5")
//!     .experiment("historical")
//!     .variable("tas")
//!     .model("CCSM4")
//!     .find()
//!     .unwrap();
//!
//! // Re-trim with republished files first
//! let files = climlib::wrangle::trim_model_list(
//!     &files,
//!     &[SelectionCriterion::Publish, SelectionCriterion::TimePoints],
//!     true,
//! )
//! .unwrap();
//! ```

// Core modules
pub mod config;
pub mod constant;
pub mod errors;
pub mod esgf;
pub mod io;
pub mod logging;
pub mod parallel;
pub mod util;
pub mod wrangle;

// Direct re-exports for the public API
pub use errors::*;
pub use io::{get_file_meta, FileMeta};
pub use wrangle::{find_in_list, trim_model_list, version_weight, XmlSearch};

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::config::ClimlibConfig;
    pub use crate::errors::{ClimlibError, Result};
    pub use crate::esgf::{EsgfClient, EsgfQuery, EsgfSettings, SearchBackend};
    pub use crate::io::{get_file_meta, FileMeta};
    pub use crate::parallel::ParallelConfig;
    pub use crate::wrangle::{SelectionCriterion, XmlRecord, XmlSearch};
}
