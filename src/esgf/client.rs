//! HTTP access to an ESGF index node and model availability searches

use super::citation::{dataset_version, format_citation, CitationRecord, FileRecord};
use super::query::EsgfQuery;
use crate::constant::ESGF_SEARCH_URL;
use crate::errors::{ClimlibError, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info};

/// Source of facet values for a dataset query
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Names listed under the query's model facet
    async fn model_facet_values(&self, query: &EsgfQuery) -> Result<Vec<String>>;
}

/// Connection settings for an ESGF index node
#[derive(Debug, Clone)]
pub struct EsgfSettings {
    pub node: String,
    pub verify_ssl: bool,
    pub timeout: Duration,
}

impl Default for EsgfSettings {
    fn default() -> Self {
        Self {
            node: ESGF_SEARCH_URL.to_string(),
            verify_ssl: true,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Client for the ESGF search API
#[derive(Debug, Clone)]
pub struct EsgfClient {
    http: reqwest::Client,
    settings: EsgfSettings,
}

impl EsgfClient {
    /// Create a client for the node described by `settings`
    pub fn new(settings: EsgfSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(!settings.verify_ssl)
            .build()?;
        Ok(Self { http, settings })
    }

    /// Settings the client was built with
    #[must_use]
    pub fn settings(&self) -> &EsgfSettings {
        &self.settings
    }

    /// Full URL of the node's search endpoint
    #[must_use]
    pub fn search_url(&self) -> String {
        let node = self.settings.node.trim_end_matches('/');
        format!("{}/search", node)
    }

    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<JsonValue> {
        debug!(url, ?params, "ESGF request");
        let response = self
            .http
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<JsonValue>().await?)
    }

    /// Models with datasets matching the query, sorted
    pub async fn available_models(&self, query: &EsgfQuery) -> Result<Vec<String>> {
        available_models(self, query).await
    }

    /// Models with data for every experiment and variable, sorted
    pub async fn model_set(
        &self,
        mip_era: &str,
        experiments: &[String],
        variables: &[String],
        frequency: Option<&str>,
    ) -> Result<Vec<String>> {
        model_set(self, mip_era, experiments, variables, frequency).await
    }

    /// Build a text citation for a CMIP6 file from its `tracking_id`.
    ///
    /// Certificate checking follows [`EsgfSettings::verify_ssl`].
    pub async fn citation_from_tracking_id(&self, tracking_id: &str) -> Result<String> {
        let params = [
            ("type", "File".to_string()),
            ("distrib", "true".to_string()),
            ("format", "application/solr+json".to_string()),
            ("tracking_id", tracking_id.to_string()),
        ];
        let body = self.get_json(&self.search_url(), &params).await?;
        let record = FileRecord::from_search_response(&body, tracking_id)?;
        let version = dataset_version(&record.dataset_id)?;

        info!(dataset = %record.dataset_id, url = %record.citation_url, "fetching citation");
        let citation = self.get_json(&record.citation_url, &[]).await?;
        let citation: CitationRecord = serde_json::from_value(citation)?;

        Ok(format_citation(&citation, &version))
    }
}

#[async_trait]
impl SearchBackend for EsgfClient {
    async fn model_facet_values(&self, query: &EsgfQuery) -> Result<Vec<String>> {
        let body = self.get_json(&self.search_url(), &query.params()).await?;
        facet_names(&body, query.model_facet())
    }
}

/// Extract the names of a Solr facet field.
///
/// Solr lists facet counts as a flat array alternating name and count:
/// `["ACCESS-CM2", 12, "BCC-CSM2-MR", 3]`.
pub fn facet_names(body: &JsonValue, facet: &str) -> Result<Vec<String>> {
    let values = body
        .get("facet_counts")
        .and_then(|f| f.get("facet_fields"))
        .and_then(|f| f.get(facet))
        .and_then(JsonValue::as_array)
        .ok_or_else(|| ClimlibError::MissingField {
            context: "ESGF search response".to_string(),
            field: format!("facet_counts.facet_fields.{}", facet),
        })?;

    Ok(values
        .iter()
        .step_by(2)
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect())
}

/// Models with datasets matching `query`, sorted
pub async fn available_models<B>(backend: &B, query: &EsgfQuery) -> Result<Vec<String>>
where
    B: SearchBackend + ?Sized,
{
    let mut models = backend.model_facet_values(query).await?;
    models.sort();
    models.dedup();
    Ok(models)
}

/// Models that have data for every (experiment, variable) pair, sorted.
///
/// All queries are issued concurrently. An empty experiment or variable list
/// yields an empty set.
pub async fn model_set<B>(
    backend: &B,
    mip_era: &str,
    experiments: &[String],
    variables: &[String],
    frequency: Option<&str>,
) -> Result<Vec<String>>
where
    B: SearchBackend + ?Sized,
{
    let queries: Vec<EsgfQuery> = experiments
        .iter()
        .flat_map(|experiment| {
            variables.iter().map(move |variable| {
                EsgfQuery::new(mip_era, experiment.clone(), variable.clone())
                    .frequency(frequency.map(str::to_string))
            })
        })
        .collect();

    if queries.is_empty() {
        return Ok(Vec::new());
    }

    info!(queries = queries.len(), mip_era, "searching model availability");
    let results = try_join_all(queries.iter().map(|q| available_models(backend, q))).await?;

    let mut sets = results
        .into_iter()
        .map(|models| models.into_iter().collect::<BTreeSet<String>>());
    let first = sets.next().unwrap_or_default();
    let common = sets.fold(first, |acc, set| acc.intersection(&set).cloned().collect());

    Ok(common.into_iter().collect())
}
