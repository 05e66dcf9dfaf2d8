//! Configuration and local file tests.
//!
//! Tests actual behavior against real files in a temp directory.

use std::io::Write;

use scholar_citations::config::Config;
use scholar_citations::formatters::CsvReport;
use scholar_citations::{CitationError, CitationSummary, ScholarClient, loader};

// =============================================================================
// API Key Loading
// =============================================================================

#[test]
fn test_key_file_first_line_is_trimmed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "  abc123  ").unwrap();
    writeln!(file, "second line is ignored").unwrap();

    let key = Config::load_api_key(None, file.path()).unwrap();
    assert_eq!(key, "abc123");
}

#[test]
fn test_key_file_without_trailing_newline() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "abc123").unwrap();

    assert_eq!(Config::load_api_key(None, file.path()).unwrap(), "abc123");
}

#[test]
fn test_empty_key_file_is_config_error() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let err = Config::load_api_key(None, file.path()).unwrap_err();
    assert!(matches!(err, CitationError::Config(_)));
}

#[test]
fn test_missing_key_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_api_key(None, dir.path().join("serpapi.key")).unwrap_err();
    assert!(matches!(err, CitationError::Io { .. }));
}

#[test]
fn test_client_from_loaded_key() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "abc123").unwrap();

    let config = Config::new(Config::load_api_key(None, file.path()).unwrap());
    assert!(ScholarClient::new(&config).is_ok());
}

// =============================================================================
// Paper List Loading
// =============================================================================

#[test]
fn test_read_titles_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "Attention is all you need\r\n\r\nDeep residual learning\n").unwrap();

    let titles = loader::read_titles(file.path()).unwrap();
    assert_eq!(titles, vec!["Attention is all you need", "Deep residual learning"]);
}

// =============================================================================
// CSV Export
// =============================================================================

#[test]
fn test_csv_report_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("citations.csv");

    let mut report = CsvReport::new();
    report.push(&CitationSummary {
        title: "Paper".to_string(),
        total: 10,
        average: Some(2.5),
        organic: 9,
    });
    report.write_to(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "Title,Total,Average,Organic\n\"Paper\",10,2.50,9\n");
}

#[test]
fn test_csv_report_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("citations.csv");

    let err = CsvReport::new().write_to(&path).unwrap_err();
    assert!(matches!(err, CitationError::Io { .. }));
}
