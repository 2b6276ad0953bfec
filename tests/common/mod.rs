#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway xml archive laid out like the in-house one
pub struct Archive {
    _tmp: TempDir,
    pub base: PathBuf,
}

/// One CDML fixture file
pub struct Entry<'a> {
    pub mip_era: &'a str,
    pub experiment: &'a str,
    pub variable: &'a str,
    pub model: &'a str,
    pub realization: &'a str,
    pub version: &'a str,
    pub creation_date: Option<&'a str>,
    pub directory: &'a str,
    pub time_points: Option<usize>,
}

impl<'a> Entry<'a> {
    pub fn new(model: &'a str, realization: &'a str, version: &'a str) -> Self {
        Self {
            mip_era: "CMIP5",
            experiment: "historical",
            variable: "tas",
            model,
            realization,
            version,
            creation_date: Some("2012-02-13T00:40:33Z"),
            directory: "/p/css03/cmip5_css02/data",
            time_points: Some(1872),
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}.CMIP.{}.INST.{}.{}.mon.{}.atmos.glb-z1-gu.{}.0000000.0.xml",
            self.mip_era, self.experiment, self.model, self.realization, self.variable, self.version
        )
    }
}

impl Archive {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let base = tmp.path().join("xclim");
        fs::create_dir_all(&base).expect("create archive root");
        Self { _tmp: tmp, base }
    }

    pub fn add(&self, entry: &Entry<'_>) -> PathBuf {
        let dir = self
            .base
            .join(entry.mip_era)
            .join("CMIP")
            .join(entry.experiment)
            .join("atmos")
            .join("mon")
            .join(entry.variable);
        fs::create_dir_all(&dir).expect("create facet directories");
        let path = dir.join(entry.file_name());
        write_cdml(&path, entry.creation_date, entry.directory, entry.time_points);
        path
    }
}

pub fn write_cdml(
    path: &Path,
    creation_date: Option<&str>,
    directory: &str,
    time_points: Option<usize>,
) {
    let mut xml = String::from(
        "<?xml version=\"1.0\"?>\n\
         <!DOCTYPE dataset SYSTEM \"http://www-pcmdi.llnl.gov/software/cdms/cdml.dtd\">\n",
    );
    xml.push_str(&format!(
        "<dataset id=\"none\" directory=\"{}\" cdms_filemap=\"[[[tas],[[0,12,-,-,-,tas.nc]]]]\">\n",
        directory
    ));
    if let Some(date) = creation_date {
        xml.push_str(&format!(
            "  <attr datatype=\"String\" name=\"creation_date\">{}</attr>\n",
            date
        ));
    }
    xml.push_str("  <axis id=\"lat\" length=\"96\" datatype=\"Double\"/>\n");
    if let Some(n) = time_points {
        xml.push_str(&format!(
            "  <axis id=\"time\" length=\"{}\" datatype=\"Double\" units=\"days since 1850-01-01\">\n    <attr datatype=\"String\" name=\"axis\">T</attr>\n  </axis>\n",
            n
        ));
    }
    xml.push_str("</dataset>\n");
    fs::write(path, xml).expect("write cdml fixture");
}
