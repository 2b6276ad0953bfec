//! Searching the local xml archive by CMIP facets

use super::criteria::SelectionCriterion;
use super::trim::trim_model_list;
use crate::constant::{ARCHIVE_FACETS, DEFAULT_XML_BASE, WILDCARD};
use crate::errors::{ClimlibError, Result};
use std::path::PathBuf;
use tracing::info;

/// A search over the local xml archive.
///
/// Every facet left unset matches anything. At least one facet must be set
/// before [`XmlSearch::find`] will run; `base`, `trim`, `verbose` and
/// `criteria` only tune how the search runs.
///
/// ```rust,no_run
/// use climlib::wrangle::XmlSearch;
///
/// let files = XmlSearch::new()
///     .mip_era("CMIP5")
///     .activity("CMIP")
///     .experiment("historical")
///     .realm("atmos")
///     .frequency("mon")
///     .variable("tas")
///     .model("CCSM4")
///     .realization("r1i1p1")
///     .find()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct XmlSearch {
    pub base: Option<String>,
    pub mip_era: Option<String>,
    pub activity: Option<String>,
    pub experiment: Option<String>,
    pub realm: Option<String>,
    pub frequency: Option<String>,
    pub variable: Option<String>,
    pub model: Option<String>,
    pub realization: Option<String>,
    pub grid_label: Option<String>,
    pub trim: Option<bool>,
    pub verbose: Option<bool>,
    pub criteria: Option<Vec<SelectionCriterion>>,
}

macro_rules! facet_setter {
    ($($name:ident),* $(,)?) => {
        $(
            #[must_use]
            pub fn $name(mut self, value: impl Into<String>) -> Self {
                self.$name = Some(value.into());
                self
            }
        )*
    };
}

impl XmlSearch {
    /// Create an empty search
    pub fn new() -> Self {
        Self::default()
    }

    facet_setter!(
        base,
        mip_era,
        activity,
        experiment,
        realm,
        frequency,
        variable,
        model,
        realization,
        grid_label,
    );

    /// Trim duplicates to one file per model and realization (default `true`)
    #[must_use]
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = Some(trim);
        self
    }

    /// Log the searched pattern when nothing matches (default `true`)
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Cascade used when trimming (default [`SelectionCriterion::DEFAULT_CASCADE`])
    #[must_use]
    pub fn criteria(mut self, criteria: Vec<SelectionCriterion>) -> Self {
        self.criteria = Some(criteria);
        self
    }

    /// Facet values keyed by facet name, in archive directory order
    #[must_use]
    pub fn facets(&self) -> [(&'static str, Option<&str>); 9] {
        let values = [
            &self.mip_era,
            &self.activity,
            &self.experiment,
            &self.realm,
            &self.frequency,
            &self.variable,
            &self.model,
            &self.realization,
            &self.grid_label,
        ];
        let mut facets = [("", None); 9];
        for (slot, (name, value)) in facets.iter_mut().zip(ARCHIVE_FACETS.iter().zip(values)) {
            *slot = (*name, value.as_deref());
        }
        facets
    }

    /// Whether any facet constrains the search
    #[must_use]
    pub fn has_constraints(&self) -> bool {
        self.facets().iter().any(|(_, value)| value.is_some())
    }

    /// Glob pattern this search expands to
    #[must_use]
    pub fn pattern(&self) -> String {
        let facet = |v: &Option<String>| v.clone().unwrap_or_else(|| WILDCARD.to_string());
        let base = self.base.clone().unwrap_or_else(|| DEFAULT_XML_BASE.to_string());

        let pattern = format!(
            "{}/{}/{}/{}/{}/{}/{}/*.{}.{}.*.{}.*.xml",
            base.trim_end_matches('/'),
            facet(&self.mip_era),
            facet(&self.activity),
            facet(&self.experiment),
            facet(&self.realm),
            facet(&self.frequency),
            facet(&self.variable),
            facet(&self.model),
            facet(&self.realization),
            facet(&self.grid_label),
        );
        pattern.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Run the search and return matching xml files, sorted
    pub fn find(&self) -> Result<Vec<PathBuf>> {
        if !self.has_constraints() {
            return Err(ClimlibError::MissingSearchCriteria);
        }

        let pattern = self.pattern();
        let constraints: Vec<String> = self
            .facets()
            .iter()
            .filter_map(|(name, value)| value.map(|v| format!("{}={}", name, v)))
            .collect();
        info!(%pattern, ?constraints, "searching xml archive");

        let mut files = glob::glob(&pattern)?.collect::<std::result::Result<Vec<_>, _>>()?;
        files.sort();

        if self.trim.unwrap_or(true) {
            let criteria = self
                .criteria
                .clone()
                .unwrap_or_else(SelectionCriterion::default_cascade);
            files = trim_model_list(&files, &criteria, false)?;
        }

        if files.is_empty() && self.verbose.unwrap_or(true) {
            println!("{}", pattern);
        }

        Ok(files)
    }
}

/// Subset `entries` to the strings containing every `*`-separated piece of `key`.
///
/// ```rust
/// use climlib::wrangle::find_in_list;
///
/// let names = ["tom", "bob", "tommy"];
/// assert_eq!(find_in_list("tom", &names), vec!["tom", "tommy"]);
/// assert_eq!(find_in_list("t*y", &names), vec!["tommy"]);
/// ```
pub fn find_in_list<S: AsRef<str>>(key: &str, entries: &[S]) -> Vec<String> {
    let pieces: Vec<&str> = key.split('*').collect();
    entries
        .iter()
        .filter_map(|entry| {
            let entry: &str = entry.as_ref();
            pieces
                .iter()
                .all(|piece| entry.contains(piece))
                .then(|| entry.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_facets_are_wildcards() {
        let search = XmlSearch::new().model("CCSM4");
        assert_eq!(
            search.pattern(),
            "/p/user_pub/xclim/*/*/*/*/*/*/*.CCSM4.*.*.*.*.xml"
        );
    }

    #[test]
    fn pattern_follows_facet_order() {
        let search = XmlSearch::new()
            .base("/data/xml/")
            .mip_era("CMIP5")
            .activity("CMIP")
            .experiment("historical")
            .realm("atmos")
            .frequency("mon")
            .variable("tas")
            .model("CCSM4")
            .realization("r1i1p1")
            .grid_label("glb-z1-gu");
        assert_eq!(
            search.pattern(),
            "/data/xml/CMIP5/CMIP/historical/atmos/mon/tas/*.CCSM4.r1i1p1.*.glb-z1-gu.*.xml"
        );
    }

    #[test]
    fn whitespace_is_stripped_from_the_pattern() {
        let search = XmlSearch::new().base("/data/my archive").model(" CCSM4 ");
        assert!(search.pattern().starts_with("/data/myarchive/"));
        assert!(search.pattern().contains("*.CCSM4.*"));
    }

    #[test]
    fn empty_search_is_refused() {
        assert!(!XmlSearch::new().has_constraints());
        assert!(matches!(
            XmlSearch::new().find(),
            Err(ClimlibError::MissingSearchCriteria)
        ));
        assert!(XmlSearch::new().grid_label("gn").has_constraints());
    }

    #[test]
    fn run_settings_are_not_constraints() {
        let search = XmlSearch::new()
            .base("/data/xml")
            .trim(false)
            .verbose(false)
            .criteria(vec![SelectionCriterion::Version]);
        assert!(!search.has_constraints());
        assert!(matches!(
            search.find(),
            Err(ClimlibError::MissingSearchCriteria)
        ));

        let ocean = search.realm("ocean");
        assert!(ocean.has_constraints());
        let facets = ocean.facets();
        assert_eq!(facets[3], ("realm", Some("ocean")));
        assert_eq!(facets[8], ("grid_label", None));
    }

    #[test]
    fn find_in_list_requires_every_piece() {
        let names = vec!["tas_Amon", "tas_day", "pr_Amon"];
        assert_eq!(find_in_list("Amon", &names), vec!["tas_Amon", "pr_Amon"]);
        assert_eq!(find_in_list("tas*Amon", &names), vec!["tas_Amon"]);
        assert_eq!(find_in_list("tas*", &names), vec!["tas_Amon", "tas_day"]);
        assert!(find_in_list("ts", &names).is_empty());
    }
}
