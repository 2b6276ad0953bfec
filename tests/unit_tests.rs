//! Unit tests for the shared climlib plumbing: errors, configuration and
//! parallel settings.

use climlib::prelude::*;
use climlib::parallel::get_parallel_info;
use std::error::Error;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_error_types() {
    // Test NetCDF error conversion
    let netcdf_err = ClimlibError::from(netcdf::Error::NotFound("test".to_string()));
    assert!(format!("{}", netcdf_err).contains("NetCDF error"));
    assert!(netcdf_err.source().is_some());

    // Test generic error
    let generic_err = ClimlibError::Generic("Test error".to_string());
    assert_eq!(format!("{}", generic_err), "Test error");
    assert!(generic_err.source().is_none());

    let name_err = ClimlibError::InvalidFileName {
        path: "tas.xml".to_string(),
        reason: "too short".to_string(),
    };
    assert_eq!(
        format!("{}", name_err),
        "Invalid archive file name 'tas.xml': too short"
    );

    let crit_err = ClimlibError::UnknownCriterion {
        name: "age".to_string(),
    };
    assert!(format!("{}", crit_err).contains("'age'"));

    assert!(format!("{}", ClimlibError::MissingSearchCriteria).contains("mip_era"));

    let io_err: ClimlibError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(io_err, ClimlibError::IoError(_)));

    let str_err: ClimlibError = "plain message".into();
    assert_eq!(str_err.to_string(), "plain message");
}

#[test]
fn test_json_and_config_errors_convert() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: ClimlibError = json_err.into();
    assert!(err.to_string().starts_with("JSON error"));

    let err = ClimlibConfig::from_toml_str("threads = \"many\"").unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_config_file_loading() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("climlib.toml");
    fs::write(
        &path,
        "threads = 2\n[archive]\nbase = \"/scratch/xml\"\n[trim]\ncriteria = [\"ver\"]\n",
    )?;

    let config = ClimlibConfig::load(Some(path.as_path()))?;
    assert_eq!(config.threads, Some(2));
    assert_eq!(config.archive.base.to_str(), Some("/scratch/xml"));
    assert_eq!(config.trim.criteria, vec![SelectionCriterion::Version]);

    let defaults = ClimlibConfig::load(None)?;
    assert_eq!(defaults.trim.criteria, SelectionCriterion::default_cascade());

    let missing = ClimlibConfig::load(Some(temp_dir.path().join("nope.toml").as_path()));
    assert!(matches!(missing, Err(ClimlibError::IoError(_))));

    Ok(())
}

#[test]
fn test_parallel_config() {
    // Test default configuration
    let default_config = ParallelConfig::default();
    assert!(default_config.num_threads.is_none());

    // Test with specific threads
    let config_4 = ParallelConfig::with_threads(4);
    assert_eq!(config_4.num_threads, Some(4));

    // Test all cores configuration
    let all_cores_config = ParallelConfig::all_cores();
    assert!(all_cores_config.num_threads.unwrap() > 0);

    // Default pool setup never fails
    default_config.setup_global_pool().unwrap();
    assert!(default_config.current_threads() > 0);
}

#[test]
fn test_parallel_info() {
    let info = get_parallel_info();
    assert!(info.current_threads > 0);
    assert!(info.available_cores > 0);
}

#[test]
fn test_esgf_settings_from_config() {
    let config = ClimlibConfig::from_toml_str(
        "[esgf]\nnode = \"https://esgf-data.dkrz.de/esg-search\"\nverify_ssl = false\n",
    )
    .unwrap();
    let client = EsgfClient::new(config.esgf_settings()).unwrap();
    assert_eq!(
        client.search_url(),
        "https://esgf-data.dkrz.de/esg-search/search"
    );
    assert!(!client.settings().verify_ssl);

    let strict = EsgfClient::new(ClimlibConfig::default().esgf_settings()).unwrap();
    assert!(strict.settings().verify_ssl);
}
