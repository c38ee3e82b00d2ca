//! CSV writers for analysis side-products.

use crate::dataset::DatasetError;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

fn ensure_parent(path: &Path, display: &str) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| DatasetError::Write {
            path: display.to_string(),
            source,
        })?;
    }
    Ok(())
}

/// Serialize rows to a CSV file, creating parent directories as needed.
pub fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), DatasetError> {
    let path_str = path.display().to_string();
    ensure_parent(path, &path_str)?;

    let mut writer = csv::Writer::from_path(path).map_err(|source| DatasetError::Csv {
        path: path_str.clone(),
        source,
    })?;
    for row in rows {
        writer.serialize(row).map_err(|source| DatasetError::Csv {
            path: path_str.clone(),
            source,
        })?;
    }
    writer.flush().map_err(|source| DatasetError::Write {
        path: path_str.clone(),
        source,
    })?;

    info!(path = %path_str, rows = rows.len(), "Wrote analysis table");
    Ok(())
}

/// Write a two-column `metric,value` summary table.
pub fn write_summary(path: &Path, pairs: &[(String, String)]) -> Result<(), DatasetError> {
    let path_str = path.display().to_string();
    ensure_parent(path, &path_str)?;

    let mut writer = csv::Writer::from_path(path).map_err(|source| DatasetError::Csv {
        path: path_str.clone(),
        source,
    })?;
    writer
        .write_record(["metric", "value"])
        .map_err(|source| DatasetError::Csv {
            path: path_str.clone(),
            source,
        })?;
    for (metric, value) in pairs {
        writer
            .write_record([metric.as_str(), value.as_str()])
            .map_err(|source| DatasetError::Csv {
                path: path_str.clone(),
                source,
            })?;
    }
    writer.flush().map_err(|source| DatasetError::Write {
        path: path_str.clone(),
        source,
    })?;

    info!(path = %path_str, rows = pairs.len(), "Wrote summary table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Row {
        name: String,
        value: usize,
    }

    #[test]
    fn test_write_rows_emits_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.csv");
        let rows = vec![
            Row {
                name: "alpha".to_string(),
                value: 1,
            },
            Row {
                name: "beta".to_string(),
                value: 2,
            },
        ];
        write_rows(&path, &rows).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("name,value"));
        assert!(raw.contains("alpha,1"));
        assert!(raw.contains("beta,2"));
    }

    #[test]
    fn test_write_summary_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary(&path, &[("rows".to_string(), "3".to_string())]).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("metric,value"));
        assert!(raw.contains("rows,3"));
    }
}
