//! Dataset citations for CMIP6 files

use crate::errors::{ClimlibError, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fmt;

/// The parts of an ESGF file record needed to locate its citation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub dataset_id: String,
    pub citation_url: String,
}

impl FileRecord {
    /// Pull the first matching document out of a Solr JSON file search
    pub fn from_search_response(body: &JsonValue, tracking_id: &str) -> Result<Self> {
        let context = format!("ESGF file record for tracking id '{}'", tracking_id);
        let missing = |field: &str| ClimlibError::MissingField {
            context: context.clone(),
            field: field.to_string(),
        };

        let doc = body
            .get("response")
            .and_then(|r| r.get("docs"))
            .and_then(JsonValue::as_array)
            .and_then(|docs| docs.first())
            .ok_or_else(|| missing("response.docs"))?;

        let dataset_id = doc
            .get("dataset_id")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| missing("dataset_id"))?
            .to_string();

        // Solr returns multi-valued fields as arrays
        let citation_url = match doc.get("citation_url") {
            Some(JsonValue::Array(urls)) => urls.first().and_then(JsonValue::as_str),
            Some(JsonValue::String(url)) => Some(url.as_str()),
            _ => None,
        }
        .ok_or_else(|| missing("citation_url"))?
        .to_string();

        Ok(Self {
            dataset_id,
            citation_url,
        })
    }
}

/// Version of a dataset id such as
/// `CMIP6.CMIP.NCAR.CESM2.historical.r1i1p1f1.Amon.tas.gn.v20190308|esgf-data.ucar.edu`,
/// without the leading `v`
pub fn dataset_version(dataset_id: &str) -> Result<String> {
    let instance = dataset_id.split('|').next().unwrap_or(dataset_id);
    instance
        .rsplit('.')
        .next()
        .and_then(|last| last.strip_prefix('v'))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ClimlibError::InvalidVersion {
            version: dataset_id.to_string(),
        })
}

#[derive(Debug, Clone, Deserialize)]
pub struct CitationIdentifier {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CitationCreator {
    #[serde(rename = "creatorName")]
    pub creator_name: String,
}

/// `publicationYear` appears both as a string and as a number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PublicationYear {
    Text(String),
    Number(u32),
}

impl fmt::Display for PublicationYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicationYear::Text(s) => f.write_str(s),
            PublicationYear::Number(n) => write!(f, "{}", n),
        }
    }
}

/// DataCite-style citation document served by the citation service
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationRecord {
    pub identifier: CitationIdentifier,
    pub creators: Vec<CitationCreator>,
    pub titles: Vec<String>,
    pub publisher: String,
    pub publication_year: PublicationYear,
}

/// Render `record` as
/// `Authors (Year). Title. Version V. Publisher doi: DOI.`
pub fn format_citation(record: &CitationRecord, version: &str) -> String {
    let authors = record
        .creators
        .iter()
        .map(|c| c.creator_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let title = record.titles.first().map(String::as_str).unwrap_or_default();

    format!(
        "{} ({}). {}. Version {}. {} doi: {}.",
        authors, record.publication_year, title, version, record.publisher, record.identifier.id
    )
}
