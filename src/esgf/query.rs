//! ESGF dataset queries and the facet vocabulary of each MIP era

/// A dataset search against an ESGF index node.
///
/// CMIP6 uses its own controlled vocabulary (`source_id`, `experiment_id`, ...);
/// older eras use the CMIP5 facet names and need an explicit `project`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsgfQuery {
    pub mip_era: String,
    pub experiment: String,
    pub variable: String,
    pub frequency: Option<String>,
    pub table: Option<String>,
    pub model: Option<String>,
    pub member: Option<String>,
    pub latest: bool,
}

impl EsgfQuery {
    pub fn new(
        mip_era: impl Into<String>,
        experiment: impl Into<String>,
        variable: impl Into<String>,
    ) -> Self {
        Self {
            mip_era: mip_era.into(),
            experiment: experiment.into(),
            variable: variable.into(),
            frequency: None,
            table: None,
            model: None,
            member: None,
            latest: true,
        }
    }

    #[must_use]
    pub fn frequency(mut self, frequency: Option<String>) -> Self {
        self.frequency = frequency;
        self
    }

    #[must_use]
    pub fn table(mut self, table: Option<String>) -> Self {
        self.table = table;
        self
    }

    #[must_use]
    pub fn model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub fn member(mut self, member: Option<String>) -> Self {
        self.member = member;
        self
    }

    #[must_use]
    pub fn latest(mut self, latest: bool) -> Self {
        self.latest = latest;
        self
    }

    /// Whether the query uses the CMIP6 vocabulary
    #[must_use]
    pub fn is_cmip6(&self) -> bool {
        self.mip_era.eq_ignore_ascii_case("CMIP6")
    }

    /// Facet holding model names for this era
    #[must_use]
    pub fn model_facet(&self) -> &'static str {
        if self.is_cmip6() {
            "source_id"
        } else {
            "model"
        }
    }

    /// Query-string parameters for a facet-only dataset search
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let (frequency, experiment, table, model, member) = if self.is_cmip6() {
            ("frequency", "experiment_id", "table_id", "source_id", "variant_label")
        } else {
            ("time_frequency", "experiment", "cmor_table", "model", "ensemble")
        };

        let mut params = vec![
            ("type", "Dataset".to_string()),
            ("distrib", "true".to_string()),
            ("limit", "0".to_string()),
            ("format", "application/solr+json".to_string()),
            ("facets", self.model_facet().to_string()),
        ];
        if !self.is_cmip6() {
            params.push(("project", self.mip_era.to_uppercase()));
        }
        params.push(("variable", self.variable.clone()));
        params.push((experiment, self.experiment.clone()));

        let optional = [
            (frequency, &self.frequency),
            (table, &self.table),
            (model, &self.model),
            (member, &self.member),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                params.push((key, value.clone()));
            }
        }

        params.push(("latest", self.latest.to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn cmip6_uses_its_own_vocabulary() {
        let query = EsgfQuery::new("cmip6", "historical", "tas")
            .frequency(Some("mon".into()))
            .table(Some("Amon".into()))
            .member(Some("r1i1p1f1".into()));
        let params = query.params();

        assert_eq!(query.model_facet(), "source_id");
        assert_eq!(lookup(&params, "experiment_id"), Some("historical"));
        assert_eq!(lookup(&params, "frequency"), Some("mon"));
        assert_eq!(lookup(&params, "table_id"), Some("Amon"));
        assert_eq!(lookup(&params, "variant_label"), Some("r1i1p1f1"));
        assert_eq!(lookup(&params, "facets"), Some("source_id"));
        assert_eq!(lookup(&params, "project"), None);
        assert_eq!(lookup(&params, "source_id"), None);
    }

    #[test]
    fn older_eras_name_the_project() {
        let query = EsgfQuery::new("cmip5", "rcp85", "pr")
            .frequency(Some("day".into()))
            .model(Some("CCSM4".into()))
            .latest(false);
        let params = query.params();

        assert_eq!(query.model_facet(), "model");
        assert_eq!(lookup(&params, "project"), Some("CMIP5"));
        assert_eq!(lookup(&params, "experiment"), Some("rcp85"));
        assert_eq!(lookup(&params, "time_frequency"), Some("day"));
        assert_eq!(lookup(&params, "model"), Some("CCSM4"));
        assert_eq!(lookup(&params, "latest"), Some("false"));
        assert_eq!(lookup(&params, "cmor_table"), None);
    }
}
