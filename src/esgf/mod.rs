//! Searches against the Earth System Grid Federation (ESGF) index
//!
//! - [`query`]: dataset queries and per-era facet names
//! - [`client`]: the HTTP client, model availability and model-set searches
//! - [`citation`]: turning a file `tracking_id` into a text citation

pub mod citation;
pub mod client;
pub mod query;

pub use citation::{dataset_version, format_citation, CitationRecord, FileRecord};
pub use client::{
    available_models, facet_names, model_set, EsgfClient, EsgfSettings, SearchBackend,
};
pub use query::EsgfQuery;
