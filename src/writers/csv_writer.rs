use crate::error::Result;
use crate::models::Dataset;
use std::path::Path;
use tracing::debug;

pub struct CsvWriter {
    delimiter: u8,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Write the header and every row; a dataset with no rows still gets its header.
    pub fn write_dataset(&self, dataset: &Dataset, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(path)?;

        writer.write_record(&dataset.schema.headers)?;
        for record in dataset.records() {
            writer.write_record(&record)?;
        }
        writer.flush()?;

        debug!("Wrote {} rows to {}", dataset.len(), path.display());
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
