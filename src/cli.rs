//! Defines command-line interface options using `clap` for the climlib application.

use clap::{Args, Parser, Subcommand};
use climlib::esgf::EsgfSettings;
use climlib::wrangle::{parse_cascade, SelectionCriterion, XmlSearch};
use std::path::PathBuf;

/// Utilities for wrangling CMIP climate model archives
#[derive(Parser, Debug)]
#[command(
    name = "climlib",
    version,
    about = "Find, de-duplicate and cite CMIP datasets"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads used to read archive metadata. Defaults to number of CPU cores.
    #[arg(short = 't', long, global = true)]
    pub threads: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the local xml archive by CMIP facets
    Find(FindArgs),
    /// Reduce a list of xml files to one per model and realization
    Trim(TrimArgs),
    /// Print creation date, republication flag and time steps of files
    Meta(MetaArgs),
    /// Keep the entries containing every '*'-separated piece of a key
    Match(MatchArgs),
    /// List models on ESGF with data for an experiment and variable
    Models(ModelsArgs),
    /// List models on ESGF with data for all given experiments and variables
    ModelSet(ModelSetArgs),
    /// Build a text citation from a CMIP6 tracking id
    Citation(CitationArgs),
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Archive root (overrides the configuration file)
    #[arg(long)]
    pub base: Option<String>,
    #[arg(long)]
    pub mip_era: Option<String>,
    #[arg(long)]
    pub activity: Option<String>,
    #[arg(long)]
    pub experiment: Option<String>,
    #[arg(long)]
    pub realm: Option<String>,
    #[arg(long)]
    pub frequency: Option<String>,
    #[arg(long)]
    pub variable: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub realization: Option<String>,
    #[arg(long)]
    pub grid_label: Option<String>,

    /// Keep duplicate files instead of trimming to one per model and realization
    #[arg(long, default_value_t = false)]
    pub no_trim: bool,

    /// Trimming cascade, formatted as <crit>,<crit>,... (cdate, ver, tpoints, publish)
    #[arg(long, value_parser = parse_cascade_arg)]
    pub criteria: Option<Cascade>,
}

impl FindArgs {
    /// Build the archive search, falling back to the configured base and cascade
    pub fn into_search(
        self,
        default_base: String,
        default_criteria: Vec<SelectionCriterion>,
    ) -> XmlSearch {
        let mut search = XmlSearch::new()
            .base(self.base.unwrap_or(default_base))
            .trim(!self.no_trim)
            .criteria(self.criteria.map(|c| c.0).unwrap_or(default_criteria));
        search.mip_era = self.mip_era;
        search.activity = self.activity;
        search.experiment = self.experiment;
        search.realm = self.realm;
        search.frequency = self.frequency;
        search.variable = self.variable;
        search.model = self.model;
        search.realization = self.realization;
        search.grid_label = self.grid_label;
        search
    }
}

#[derive(Args, Debug)]
pub struct TrimArgs {
    /// Xml files to trim
    pub files: Vec<PathBuf>,

    /// Read additional file paths from this list ('-' for stdin)
    #[arg(long)]
    pub from_list: Option<PathBuf>,

    /// Trimming cascade, formatted as <crit>,<crit>,... (cdate, ver, tpoints, publish)
    #[arg(long, value_parser = parse_cascade_arg)]
    pub criteria: Option<Cascade>,

    /// Show every group with its chosen file marked '*'
    #[arg(long, default_value_t = false)]
    pub report: bool,
}

#[derive(Args, Debug)]
pub struct MetaArgs {
    /// CDML (.xml) or NetCDF (.nc) files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Key such as 'tas*Amon'
    pub key: String,
    /// Entries to filter
    pub entries: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ModelsArgs {
    #[arg(long)]
    pub mip_era: String,
    #[arg(long)]
    pub experiment: String,
    #[arg(long)]
    pub variable: String,
    #[arg(long)]
    pub frequency: Option<String>,
    #[arg(long)]
    pub table: Option<String>,
}

#[derive(Args, Debug)]
pub struct ModelSetArgs {
    #[arg(long)]
    pub mip_era: String,
    /// Experiments, repeated or comma separated
    #[arg(long = "experiment", required = true)]
    pub experiments: Vec<String>,
    /// Variables, repeated or comma separated
    #[arg(long = "variable", required = true)]
    pub variables: Vec<String>,
    #[arg(long)]
    pub frequency: Option<String>,
}

#[derive(Args, Debug)]
pub struct CitationArgs {
    /// Tracking id from a CMIP6 file header, e.g. hdl:21.14100/a360be6a-...
    pub tracking_id: String,

    /// Verify TLS certificates (overrides the configuration file)
    #[arg(long)]
    pub verify: Option<bool>,
}

impl CitationArgs {
    /// Apply the `--verify` override to the configured connection settings
    pub fn settings(&self, mut configured: EsgfSettings) -> EsgfSettings {
        if let Some(verify) = self.verify {
            configured.verify_ssl = verify;
        }
        configured
    }
}

/// A parsed trimming cascade
#[derive(Debug, Clone)]
pub struct Cascade(pub Vec<SelectionCriterion>);

fn parse_cascade_arg(s: &str) -> Result<Cascade, String> {
    let criteria = parse_cascade(s).map_err(|e| e.to_string())?;
    if criteria.is_empty() {
        return Err("Invalid format: Expected '<crit>,<crit>,...'".to_string());
    }
    Ok(Cascade(criteria))
}
