//! End-to-end tests for archive search and duplicate trimming

mod common;

use climlib::errors::ClimlibError;
use climlib::wrangle::{
    read_records, trim_model_list, trim_model_report, SelectionCriterion, XmlSearch,
};
use common::{Archive, Entry};

#[test]
fn find_returns_sorted_matches_without_trimming() {
    let archive = Archive::new();
    let b = archive.add(&Entry::new("CCSM4", "r2i1p1", "v20160829"));
    let a = archive.add(&Entry::new("CCSM4", "r1i1p1", "v20160829"));
    archive.add(&Entry::new("CanESM2", "r1i1p1", "v20120410"));

    let files = XmlSearch::new()
        .base(archive.base.display().to_string())
        .model("CCSM4")
        .trim(false)
        .verbose(false)
        .find()
        .unwrap();

    assert_eq!(files, vec![a, b]);
}

#[test]
fn find_trims_duplicates_by_default() {
    let archive = Archive::new();

    let mut old = Entry::new("CCSM4", "r1i1p1", "v20120101");
    old.creation_date = Some("2012-01-01T00:00:00Z");
    archive.add(&old);

    let mut new = Entry::new("CCSM4", "r1i1p1", "v20160829");
    new.creation_date = Some("2016-08-29T00:00:00Z");
    let newest = archive.add(&new);

    let other = archive.add(&Entry::new("CCSM4", "r2i1p1", "v20120101"));

    let files = XmlSearch::new()
        .base(archive.base.display().to_string())
        .mip_era("CMIP5")
        .variable("tas")
        .model("CCSM4")
        .find()
        .unwrap();

    assert_eq!(files, vec![newest, other]);
}

#[test]
fn facets_narrow_the_search() {
    let archive = Archive::new();
    let mut pr = Entry::new("CCSM4", "r1i1p1", "v20160829");
    pr.variable = "pr";
    let pr_path = archive.add(&pr);
    archive.add(&Entry::new("CCSM4", "r1i1p1", "v20160829"));

    let files = XmlSearch::new()
        .base(archive.base.display().to_string())
        .variable("pr")
        .find()
        .unwrap();
    assert_eq!(files, vec![pr_path]);

    let none = XmlSearch::new()
        .base(archive.base.display().to_string())
        .experiment("piControl")
        .verbose(false)
        .find()
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn empty_verbose_search_returns_no_files() {
    let archive = Archive::new();
    archive.add(&Entry::new("CCSM4", "r1i1p1", "v20160829"));

    let search = XmlSearch::new()
        .base(archive.base.display().to_string())
        .model("NoSuchModel");
    assert!(search.pattern().contains("*.NoSuchModel.*"));
    assert!(search.find().unwrap().is_empty());
}

#[test]
fn custom_cascade_prefers_republished_files() {
    let archive = Archive::new();

    let mut republished = Entry::new("GFDL-CM3", "r1i1p1", "v1");
    republished.directory = "/p/css03/esgf_publish/cmip5/GFDL";
    republished.creation_date = Some("2011-01-01T00:00:00Z");
    let republished = archive.add(&republished);

    let mut newer = Entry::new("GFDL-CM3", "r1i1p1", "v20120101");
    newer.creation_date = Some("2012-05-01T00:00:00Z");
    let newer = archive.add(&newer);

    let files = vec![newer.clone(), republished.clone()];

    let by_default = trim_model_list(&files, &SelectionCriterion::default_cascade(), false).unwrap();
    assert_eq!(by_default, vec![newer]);

    let by_publish = trim_model_list(
        &files,
        &[SelectionCriterion::Publish, SelectionCriterion::CreationDate],
        false,
    )
    .unwrap();
    assert_eq!(by_publish, vec![republished]);
}

#[test]
fn version_breaks_creation_date_ties() {
    let archive = Archive::new();
    let numbered = archive.add(&Entry::new("MIROC5", "r1i1p1", "v1"));
    let dated = archive.add(&Entry::new("MIROC5", "r1i1p1", "v20120710"));
    let latest = archive.add(&Entry::new("MIROC5", "r1i1p1", "latest"));

    let report = trim_model_report(
        &[dated.clone(), latest.clone(), numbered.clone()],
        &SelectionCriterion::default_cascade(),
    )
    .unwrap();

    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].chosen.as_ref(), Some(&numbered));
    assert_eq!(report.groups[0].rejected, vec![dated, latest]);
}

#[test]
fn missing_metadata_uses_fallbacks() {
    let archive = Archive::new();
    let mut bare = Entry::new("NorESM1-M", "r1i1p1", "v20110901");
    bare.creation_date = None;
    bare.time_points = None;
    let bare = archive.add(&bare);

    let records = read_records(&[bare.clone(), bare]).unwrap();
    assert_eq!(records.len(), 1, "duplicate paths are read once");
    assert_eq!(records[0].meta.creation_date, 19890306);
    assert_eq!(records[0].meta.time_points, 0);
    assert!(!records[0].meta.publish);
}

#[test]
fn textual_creation_dates_rank_by_year() {
    let archive = Archive::new();

    let mut textual = Entry::new("HadGEM2-ES", "r1i1p1", "v20110101");
    textual.creation_date = Some("Thu Aug 11 22:49:09 EST 2011");
    let textual = archive.add(&textual);

    let mut iso = Entry::new("HadGEM2-ES", "r1i1p1", "v20100101");
    iso.creation_date = Some("2010-12-31T23:59:59Z");
    archive.add(&iso);

    let records = read_records(&[textual.clone()]).unwrap();
    assert_eq!(records[0].meta.creation_date, 20110101);
}

#[test]
fn malformed_names_abort_trimming() {
    let archive = Archive::new();
    let bad = archive.base.join("tas_Amon.xml");
    common::write_cdml(&bad, None, "/x", Some(12));

    let err = trim_model_list(&[bad], &SelectionCriterion::default_cascade(), false).unwrap_err();
    assert!(matches!(err, ClimlibError::InvalidFileName { .. }));
}

#[test]
fn unreadable_files_abort_trimming() {
    let archive = Archive::new();
    let missing = archive
        .base
        .join(Entry::new("CCSM4", "r1i1p1", "v20160829").file_name());

    let err = trim_model_list(&[missing], &SelectionCriterion::default_cascade(), false).unwrap_err();
    assert!(matches!(err, ClimlibError::IoError(_)));
}
