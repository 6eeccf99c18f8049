use csv::StringRecord;
use std::path::Path;

use crate::error::{CleaningError, Result};
use crate::models::Listing;
use crate::utils::constants::{
    LAST_REVIEW_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN, PRICE_COLUMN,
};

/// Header of a dataset with the positions of the columns the cleaner reads.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSchema {
    pub headers: StringRecord,
    pub price: usize,
    pub longitude: usize,
    pub latitude: usize,
    pub last_review: usize,
}

impl DatasetSchema {
    /// Resolve required columns once; `path` is only used for the error message.
    pub fn from_headers(headers: StringRecord, path: &Path) -> Result<Self> {
        let locate = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| CleaningError::MissingColumn {
                    column: column.to_string(),
                    path: path.to_path_buf(),
                })
        };

        let price = locate(PRICE_COLUMN)?;
        let longitude = locate(LONGITUDE_COLUMN)?;
        let latitude = locate(LATITUDE_COLUMN)?;
        let last_review = locate(LAST_REVIEW_COLUMN)?;

        Ok(Self {
            headers,
            price,
            longitude,
            latitude,
            last_review,
        })
    }

    pub fn column_name(&self, idx: usize) -> &str {
        self.headers.get(idx).unwrap_or("")
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub schema: DatasetSchema,
    pub rows: Vec<Listing>,
}

impl Dataset {
    pub fn new(schema: DatasetSchema, rows: Vec<Listing>) -> Self {
        Self { schema, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as they would be written out.
    pub fn records(&self) -> impl Iterator<Item = StringRecord> + '_ {
        self.rows.iter().map(|row| row.to_record(&self.schema))
    }
}
