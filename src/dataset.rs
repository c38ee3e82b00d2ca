//! Record-table persistence.
//!
//! Scraped [`PageRecord`]s are written once per run as a flat table and
//! re-read independently by every analysis subcommand. The format is
//! dispatched on the file extension: `.json` gets a pretty-printed array,
//! anything else is CSV.
//!
//! CSV files are written as UTF-8 with a byte-order mark so spreadsheet
//! tools render Japanese content correctly; reading accepts files with or
//! without the mark. There is no schema versioning — a malformed or missing
//! file is reported as a plain error with its path.

use crate::models::PageRecord;
use itertools::Itertools;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Errors raised while reading or writing record tables.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("json error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Write records to `path`, as JSON when the extension is `.json` and as
/// BOM-prefixed CSV otherwise. Parent directories are created as needed.
pub fn write_records(records: &[PageRecord], path: &Path) -> Result<(), DatasetError> {
    let path_str = path.display().to_string();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| DatasetError::Write {
            path: path_str.clone(),
            source,
        })?;
    }

    if path.extension().is_some_and(|ext| ext == "json") {
        let json = serde_json::to_string_pretty(records).map_err(|source| DatasetError::Json {
            path: path_str.clone(),
            source,
        })?;
        fs::write(path, json).map_err(|source| DatasetError::Write {
            path: path_str.clone(),
            source,
        })?;
    } else {
        let mut file = fs::File::create(path).map_err(|source| DatasetError::Write {
            path: path_str.clone(),
            source,
        })?;
        file.write_all(UTF8_BOM).map_err(|source| DatasetError::Write {
            path: path_str.clone(),
            source,
        })?;
        let mut writer = csv::Writer::from_writer(file);
        for record in records {
            writer.serialize(record).map_err(|source| DatasetError::Csv {
                path: path_str.clone(),
                source,
            })?;
        }
        writer.flush().map_err(|source| DatasetError::Write {
            path: path_str.clone(),
            source,
        })?;
    }

    info!(path = %path_str, rows = records.len(), "Wrote record table");
    Ok(())
}

/// Read a record table previously written by [`write_records`].
///
/// # Errors
///
/// A missing file is an error naming the path, not a panic; so is a row
/// that does not fit the record schema.
pub fn read_records(path: &Path) -> Result<Vec<PageRecord>, DatasetError> {
    let path_str = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path_str.clone(),
        source,
    })?;
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    let records = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(raw).map_err(|source| DatasetError::Json {
            path: path_str.clone(),
            source,
        })?
    } else {
        let mut reader = csv::Reader::from_reader(raw.as_bytes());
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: PageRecord = row.map_err(|source| DatasetError::Csv {
                path: path_str.clone(),
                source,
            })?;
            records.push(record);
        }
        records
    };

    info!(path = %path_str, rows = records.len(), "Read record table");
    Ok(records)
}

/// De-duplicate URLs with set semantics, keeping first-occurrence order.
///
/// Idempotent: applying it twice yields the same list as applying it once.
pub fn dedup_urls(urls: Vec<String>) -> Vec<String> {
    urls.into_iter().unique().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<PageRecord> {
        vec![
            PageRecord {
                url: "https://a.example/one".to_string(),
                title: "Remote productivity".to_string(),
                meta_description: String::new(),
                content: "Teams adapt to remote work.".to_string(),
                language: "en".to_string(),
                extracted_at: "2025-03-29 16:52:10".to_string(),
            },
            PageRecord {
                url: "https://b.example/二".to_string(),
                title: "リモートワークの課題".to_string(),
                meta_description: "在宅勤務の生産性".to_string(),
                content: "コミュニケーションが課題です。\n改善のためのツールも多い。".to_string(),
                language: "ja".to_string(),
                extracted_at: "2025-03-29 16:53:01".to_string(),
            },
        ]
    }

    #[test]
    fn test_csv_roundtrip_preserves_rows_and_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let records = sample_records();
        write_records(&records, &path).unwrap();
        let back = read_records(&path).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_csv_is_bom_prefixed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        write_records(&sample_records(), &path).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);
    }

    #[test]
    fn test_reads_csv_without_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.csv");
        let csv = "url,title,meta_description,content,language,extracted_at\n\
                   https://a.example,,,text body,en,2025-03-29 16:52:10\n";
        fs::write(&path, csv).unwrap();
        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, "text body");
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let records = sample_records();
        write_records(&records, &path).unwrap();
        let back = read_records(&path).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_missing_file_error_names_path() {
        let err = read_records(Path::new("data/absent_table.csv")).unwrap_err();
        assert!(err.to_string().contains("absent_table.csv"));
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let urls = vec![
            "https://a.example".to_string(),
            "https://b.example".to_string(),
            "https://a.example".to_string(),
            "https://c.example".to_string(),
            "https://b.example".to_string(),
        ];
        let once = dedup_urls(urls);
        let twice = dedup_urls(once.clone());
        assert_eq!(once, twice);
        assert_eq!(
            once,
            vec![
                "https://a.example".to_string(),
                "https://b.example".to_string(),
                "https://c.example".to_string(),
            ]
        );
    }
}
