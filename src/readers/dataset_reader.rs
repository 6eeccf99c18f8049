use crate::error::{CleaningError, Result};
use crate::models::{Dataset, DatasetSchema, Listing};
use crate::utils::constants::INPUT_EXTENSION;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locate the CSV file to clean inside a fetched artifact directory.
///
/// With `preferred` set, that file name is used. Otherwise the directory must
/// hold exactly one CSV file.
pub fn locate_input(dir: &Path, preferred: Option<&str>) -> Result<PathBuf> {
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| ext == INPUT_EXTENSION);
        if is_csv {
            candidates.push(path);
        }
    }
    candidates.sort();

    if let Some(name) = preferred {
        return candidates
            .into_iter()
            .find(|path| path.file_name().and_then(|f| f.to_str()) == Some(name))
            .ok_or_else(|| CleaningError::InputFileNotFound {
                file: name.to_string(),
                dir: dir.to_path_buf(),
            });
    }

    match candidates.len() {
        0 => Err(CleaningError::NoInputFound {
            dir: dir.to_path_buf(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(CleaningError::AmbiguousInput {
            dir: dir.to_path_buf(),
            candidates: candidates
                .iter()
                .filter_map(|path| path.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect(),
        }),
    }
}

pub struct DatasetReader {
    delimiter: u8,
}

impl DatasetReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Read a listings CSV, checking the required columns before any row.
    pub fn read_dataset(&self, path: &Path) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let schema = DatasetSchema::from_headers(reader.headers()?.clone(), path)?;

        let mut rows = Vec::new();
        for record_result in reader.records() {
            let record = record_result?;
            let line = record.position().map_or(0, |pos| pos.line());
            rows.push(Listing::from_record(record, &schema, line)?);
        }

        debug!(
            "Read {} rows with {} columns from {}",
            rows.len(),
            schema.column_count(),
            path.display()
        );

        Ok(Dataset::new(schema, rows))
    }
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "\
id,name,price,longitude,latitude,last_review
1,Cozy loft,50,-74.0,40.8,2019-05-01
2,\"Big, bright room\",5,-73.9,40.7,
3,Far away,120,-75.0,40.8,not-a-date
";

    #[test]
    fn test_read_dataset() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("sample.csv");
        fs::write(&path, SAMPLE)?;

        let dataset = DatasetReader::new().read_dataset(&path)?;

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.schema.price, 2);
        assert_eq!(dataset.rows[0].price, Some(50.0));
        assert_eq!(dataset.rows[1].fields.get(1), Some("Big, bright room"));
        assert_eq!(dataset.rows[2].longitude, Some(-75.0));
        assert_eq!(dataset.rows[0].line, 2);

        Ok(())
    }

    #[test]
    fn test_read_dataset_with_short_row() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("sample.csv");
        fs::write(
            &path,
            "id,price,longitude,latitude,last_review\n1,50,-74.0,40.8,2019-05-01\n2,60,-73.9\n",
        )?;

        let dataset = DatasetReader::new().read_dataset(&path)?;

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows[1].longitude, Some(-73.9));
        assert_eq!(dataset.rows[1].latitude, None);
        assert_eq!(dataset.rows[1].fields.len(), 5);
        assert_eq!(dataset.rows[1].fields.get(4), Some(""));

        Ok(())
    }

    #[test]
    fn test_read_dataset_missing_column() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("sample.csv");
        fs::write(&path, "id,longitude,latitude,last_review\n1,-74.0,40.8,\n")?;

        let err = DatasetReader::new().read_dataset(&path).unwrap_err();
        assert!(matches!(err, CleaningError::MissingColumn { ref column, .. } if column == "price"));

        Ok(())
    }

    #[test]
    fn test_read_dataset_with_semicolons() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("sample.csv");
        fs::write(&path, "price;longitude;latitude;last_review\n50;-74.0;40.8;2019-05-01\n")?;

        let dataset = DatasetReader::with_delimiter(b';').read_dataset(&path)?;
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.rows[0].latitude, Some(40.8));

        Ok(())
    }

    #[test]
    fn test_locate_single_csv() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("sample.csv"), SAMPLE)?;
        fs::write(dir.path().join("README.txt"), "not data")?;

        let path = locate_input(dir.path(), None)?;
        assert_eq!(path, dir.path().join("sample.csv"));

        Ok(())
    }

    #[test]
    fn test_locate_no_csv() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("README.txt"), "not data")?;

        let err = locate_input(dir.path(), None).unwrap_err();
        assert!(matches!(err, CleaningError::NoInputFound { .. }));

        Ok(())
    }

    #[test]
    fn test_locate_multiple_csv_is_ambiguous() -> Result<()> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("b.csv"), SAMPLE)?;
        fs::write(dir.path().join("a.csv"), SAMPLE)?;

        let err = locate_input(dir.path(), None).unwrap_err();
        match err {
            CleaningError::AmbiguousInput { candidates, .. } => {
                assert_eq!(candidates, vec!["a.csv".to_string(), "b.csv".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }

        let chosen = locate_input(dir.path(), Some("b.csv"))?;
        assert_eq!(chosen, dir.path().join("b.csv"));

        let missing = locate_input(dir.path(), Some("c.csv")).unwrap_err();
        assert!(matches!(missing, CleaningError::InputFileNotFound { .. }));

        Ok(())
    }
}
