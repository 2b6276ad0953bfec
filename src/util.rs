//! Small helpers shared by the command line front end

use crate::errors::Result;
use std::io::BufRead;
use std::path::PathBuf;

pub use crate::wrangle::find_in_list;

/// Print one path per line followed by a count
pub fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
    println!("✅ {} file(s)", paths.len());
}

/// Read a list of paths, one per line. Blank lines and `#` comments are skipped.
pub fn read_path_list<R: BufRead>(reader: R) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        paths.push(PathBuf::from(line));
    }
    Ok(paths)
}

/// Split comma separated values and flatten them, dropping empty entries.
///
/// `["historical,ssp585", "piControl"]` becomes
/// `["historical", "ssp585", "piControl"]`.
pub fn split_csv(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
