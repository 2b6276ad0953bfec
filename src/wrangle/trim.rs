//! Trimming an archive file list down to one file per model and realization
//!
//! Archive searches usually return several xml files for the same model run:
//! re-publications, newer versions, extended time series. [`trim_model_list`]
//! keeps one of them per (model, realization) pair by applying a cascade of
//! [`SelectionCriterion`]s, each narrowing the candidates to the best-ranked
//! files until the cascade is exhausted.

use super::criteria::{CriterionValue, SelectionCriterion};
use super::filename::XmlFileName;
use crate::errors::Result;
use crate::io::{get_file_meta, FileMeta};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An archive file with everything needed to rank it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlRecord {
    pub path: PathBuf,
    pub name: XmlFileName,
    pub version_weight: u64,
    pub meta: FileMeta,
}

impl XmlRecord {
    /// Build a record from a file on disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = XmlFileName::parse(path)?;
        let version_weight = name.version_weight()?;
        let meta = get_file_meta(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            name,
            version_weight,
            meta,
        })
    }

    /// Value of `criterion` for this file
    #[must_use]
    pub fn value(&self, criterion: SelectionCriterion) -> CriterionValue {
        match criterion {
            SelectionCriterion::CreationDate => {
                CriterionValue::Rank(u64::from(self.meta.creation_date))
            }
            SelectionCriterion::Version => CriterionValue::Rank(self.version_weight),
            SelectionCriterion::TimePoints => CriterionValue::Rank(self.meta.time_points as u64),
            SelectionCriterion::Publish => CriterionValue::Flag(self.meta.publish),
        }
    }
}

/// Outcome for one (model, realization) group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimGroup {
    pub model: String,
    pub realization: String,
    pub chosen: Option<PathBuf>,
    pub rejected: Vec<PathBuf>,
}

/// Outcome of a trimming pass, grouped in model then realization order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrimReport {
    pub groups: Vec<TrimGroup>,
}

impl TrimReport {
    /// Files kept, one per group
    #[must_use]
    pub fn selected(&self) -> Vec<PathBuf> {
        self.groups.iter().filter_map(|g| g.chosen.clone()).collect()
    }

    /// Print the chosen file of each group marked with `*`, followed by the
    /// files it displaced
    pub fn print(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for TrimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            if let Some(chosen) = &group.chosen {
                writeln!(f, "* {}", chosen.display())?;
            }
            for path in &group.rejected {
                writeln!(f, "{}", path.display())?;
            }
        }
        Ok(())
    }
}

/// Narrow `files` to the best-ranked entries for `criterion`.
///
/// Lists with fewer than two entries are returned as they are. Integer
/// criteria keep every file sharing the maximum value. Flag criteria keep the
/// flagged files, or all of them when none is flagged. Input order is kept.
pub fn filter_xmls<'a>(
    files: &[&'a XmlRecord],
    criterion: SelectionCriterion,
) -> Vec<&'a XmlRecord> {
    if files.len() < 2 {
        return files.to_vec();
    }

    let best = files
        .iter()
        .map(|r| r.value(criterion))
        .max_by_key(|v| match v {
            CriterionValue::Rank(n) => *n,
            CriterionValue::Flag(b) => u64::from(*b),
        });

    match best {
        Some(best) => files
            .iter()
            .copied()
            .filter(|r| r.value(criterion) == best)
            .collect(),
        None => Vec::new(),
    }
}

/// Apply `criteria` to already-read records and pick one file per group
pub fn trim_records(records: &[XmlRecord], criteria: &[SelectionCriterion]) -> TrimReport {
    let mut groups: BTreeMap<(&str, &str), Vec<&XmlRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.name.model.as_str(), record.name.realization.as_str()))
            .or_default()
            .push(record);
    }

    let groups = groups
        .into_iter()
        .map(|((model, realization), candidates)| {
            let mut survivors = candidates.clone();
            for &criterion in criteria {
                survivors = filter_xmls(&survivors, criterion);
            }

            let chosen = survivors.first().map(|r| r.path.clone());
            let rejected = candidates
                .iter()
                .filter(|r| Some(&r.path) != chosen.as_ref())
                .map(|r| r.path.clone())
                .collect::<Vec<_>>();

            debug!(
                model,
                realization,
                candidates = candidates.len(),
                "trimmed group"
            );

            TrimGroup {
                model: model.to_string(),
                realization: realization.to_string(),
                chosen,
                rejected,
            }
        })
        .collect();

    TrimReport { groups }
}

/// Read metadata for every file on the rayon pool
pub fn read_records(files: &[PathBuf]) -> Result<Vec<XmlRecord>> {
    let mut seen = HashSet::new();
    let unique: Vec<&PathBuf> = files.iter().filter(|p| seen.insert(*p)).collect();

    info!(
        files = unique.len(),
        threads = rayon::current_num_threads(),
        "reading archive metadata"
    );

    unique
        .par_iter()
        .map(|path| XmlRecord::from_path(path))
        .collect()
}

/// Trim `files` to one xml file per model and realization.
///
/// When `verbose` is set, each group is printed with its chosen file marked.
pub fn trim_model_list(
    files: &[PathBuf],
    criteria: &[SelectionCriterion],
    verbose: bool,
) -> Result<Vec<PathBuf>> {
    let report = trim_model_report(files, criteria)?;
    if verbose {
        report.print();
    }
    Ok(report.selected())
}

/// Same as [`trim_model_list`] but returns the full per-group report
pub fn trim_model_report(files: &[PathBuf], criteria: &[SelectionCriterion]) -> Result<TrimReport> {
    let records = read_records(files)?;
    Ok(trim_records(&records, criteria))
}
