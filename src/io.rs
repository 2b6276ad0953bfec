//! Dataset metadata readers for CDML spanning files and NetCDF files
//!
//! The archive trimming logic only needs three facts about a dataset: when it
//! was created, whether it lives in a locally republished directory, and how
//! many time steps it holds. [`get_file_meta`] extracts them from either format.

use crate::constant::{CREATION_DATE_ATTR, PCMDI_DAWN_OF_TIME, PUBLISH_MARKER, TIME_AXIS};
use crate::errors::{ClimlibError, Result};
use chrono::{Datelike, NaiveDate};
use netcdf::AttributeValue;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// Metadata used to rank competing files for the same model and realization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// Creation date as `YYYYMMDD`
    pub creation_date: u32,
    /// Whether the underlying data sits in a locally republished directory
    pub publish: bool,
    /// Number of time steps (0 when the dataset has no time axis)
    pub time_points: usize,
    /// Directory holding the underlying data
    pub directory: String,
}

impl FileMeta {
    /// Short report for the file, one fact per line
    #[must_use]
    pub fn report(&self, path: &Path) -> String {
        format!(
            "\n===== {} =====\n   Creation date: {}\n   Republished: {}\n   Time points: {}\n   Directory: {}\n",
            path.display(),
            self.creation_date,
            if self.publish { "yes" } else { "no" },
            self.time_points,
            self.directory
        )
    }

    /// Print [`FileMeta::report`]
    pub fn print_report(&self, path: &Path) {
        print!("{}", self.report(path));
    }
}

/// Header information pulled from a CDML document
#[derive(Debug, Clone, Default)]
pub struct CdmlHeader {
    /// Global attributes, from both `<dataset>` xml attributes and `<attr>` children
    pub attributes: HashMap<String, String>,
    /// Axis lengths keyed by axis id
    pub axes: HashMap<String, usize>,
}

impl CdmlHeader {
    /// Parse the header of a CDML document held in memory
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut header = CdmlHeader::default();
        let mut depth = 0usize;
        // name of the global <attr> currently open, and its collected text
        let mut open_attr: Option<(String, String)> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    depth += 1;
                    header.visit_element(&e, depth, &mut open_attr)?;
                }
                Event::Empty(e) => {
                    header.visit_element(&e, depth + 1, &mut None)?;
                }
                Event::Text(t) => {
                    if let Some((_, value)) = open_attr.as_mut() {
                        value.push_str(&t.unescape()?);
                    }
                }
                Event::End(_) => {
                    if depth == 2 {
                        if let Some((name, value)) = open_attr.take() {
                            header.attributes.insert(name, value.trim().to_string());
                        }
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(header)
    }

    fn visit_element(
        &mut self,
        element: &BytesStart<'_>,
        depth: usize,
        open_attr: &mut Option<(String, String)>,
    ) -> Result<()> {
        match (element.name().as_ref(), depth) {
            (b"dataset", 1) => {
                for attr in element.attributes() {
                    let attr = attr?;
                    let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                    let value = attr.unescape_value()?.into_owned();
                    self.attributes.insert(key, value);
                }
            }
            (b"attr", 2) => {
                if let Some(name) = xml_attribute(element, b"name")? {
                    *open_attr = Some((name, String::new()));
                }
            }
            (b"axis", 2) => {
                let id = xml_attribute(element, b"id")?;
                let length = xml_attribute(element, b"length")?;
                if let (Some(id), Some(length)) = (id, length) {
                    let length = length.trim().parse::<usize>().map_err(|_| {
                        ClimlibError::Generic(format!(
                            "Axis '{}' has a non-numeric length '{}'",
                            id, length
                        ))
                    })?;
                    self.axes.insert(id, length);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

const MAX_YEAR: i64 = 9999;

fn xml_attribute(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Convert a `creation_date` attribute to a `YYYYMMDD` integer.
///
/// Most archive files use ISO timestamps, extended (`2012-02-13T00:40:33Z`)
/// or basic (`20120213T004033Z`). Some older ones carry
/// `Thu Aug 11 22:49:09 EST 2011`; only the year is kept for those and the
/// date becomes January 1st. Years outside `0..=9999` are rejected.
pub fn parse_creation_date(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let invalid = || ClimlibError::InvalidDate {
        value: raw.to_string(),
    };

    let (year, month, day) = match trimmed.chars().next() {
        Some(c) if c.is_alphabetic() => {
            let year = trimmed
                .split_whitespace()
                .last()
                .and_then(|y| y.parse::<i64>().ok())
                .ok_or_else(invalid)?;
            (year, 1, 1)
        }
        Some(_) => {
            let day = trimmed.split('T').next().unwrap_or(trimmed);
            let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(day, "%Y%m%d"))
                .map_err(|_| invalid())?;
            (i64::from(date.year()), date.month(), date.day())
        }
        None => return Err(invalid()),
    };

    if !(0..=MAX_YEAR).contains(&year) {
        return Err(invalid());
    }
    u32::try_from(year)
        .ok()
        .and_then(|y| y.checked_mul(10_000))
        .and_then(|y| y.checked_add(month * 100 + day))
        .ok_or_else(invalid)
}

fn is_republished(directory: &str) -> bool {
    directory.contains(PUBLISH_MARKER)
}

/// Read ranking metadata from a CDML (`.xml`) or NetCDF (`.nc`) file
pub fn get_file_meta(path: &Path) -> Result<FileMeta> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let meta = match extension.as_deref() {
        Some("xml") => cdml_file_meta(path)?,
        Some("nc") | Some("nc4") => netcdf_file_meta(path)?,
        _ => {
            return Err(ClimlibError::UnsupportedFormat {
                path: path.display().to_string(),
            })
        }
    };

    trace!(path = %path.display(), ?meta, "read file metadata");
    Ok(meta)
}

fn cdml_file_meta(path: &Path) -> Result<FileMeta> {
    let text = fs::read_to_string(path)?;
    let header = CdmlHeader::parse(&text)?;

    let creation_date = match header.attributes.get(CREATION_DATE_ATTR) {
        Some(raw) => parse_creation_date(raw)?,
        None => {
            debug!(path = %path.display(), "no creation_date, assuming PCMDI dawn of time");
            parse_creation_date(PCMDI_DAWN_OF_TIME)?
        }
    };

    let directory = header
        .attributes
        .get("directory")
        .cloned()
        .unwrap_or_default();

    Ok(FileMeta {
        creation_date,
        publish: is_republished(&directory),
        time_points: header.axes.get(TIME_AXIS).copied().unwrap_or(0),
        directory,
    })
}

fn netcdf_file_meta(path: &Path) -> Result<FileMeta> {
    if !path.exists() {
        return Err(ClimlibError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )));
    }

    let file = netcdf::open(path)?;

    let raw_date = match file.attribute(CREATION_DATE_ATTR) {
        Some(attr) => match attr.value()? {
            AttributeValue::Str(s) => Some(s),
            AttributeValue::Strs(ss) => ss.into_iter().next(),
            _ => None,
        },
        None => None,
    };
    let creation_date = parse_creation_date(raw_date.as_deref().unwrap_or(PCMDI_DAWN_OF_TIME))?;

    let directory = path
        .canonicalize()?
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    let time_points = file.dimension(TIME_AXIS).map(|d| d.len()).unwrap_or(0);

    Ok(FileMeta {
        creation_date,
        publish: is_republished(&directory),
        time_points,
        directory,
    })
}
