use csv::StringRecord;

use crate::error::{CleaningError, Result};
use crate::models::{DatasetSchema, ReviewDate};

/// One row of the listings dataset.
///
/// The raw cells are kept untouched so the row can be written back verbatim;
/// the typed fields are what the filters look at.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub line: u64,
    pub fields: StringRecord,
    pub price: Option<f64>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// `None` until the date normalization step has run.
    pub last_review: Option<ReviewDate>,
}

impl Listing {
    /// Short rows are padded with empty cells up to the header width; rows
    /// longer than the header are rejected.
    pub fn from_record(mut record: StringRecord, schema: &DatasetSchema, line: u64) -> Result<Self> {
        let expected = schema.column_count();
        if record.len() > expected {
            return Err(CleaningError::TooManyFields {
                line,
                expected,
                found: record.len(),
            });
        }
        while record.len() < expected {
            record.push_field("");
        }

        let price = parse_numeric(&record, schema, schema.price, line)?;
        let longitude = parse_numeric(&record, schema, schema.longitude, line)?;
        let latitude = parse_numeric(&record, schema, schema.latitude, line)?;

        Ok(Self {
            line,
            fields: record,
            price,
            longitude,
            latitude,
            last_review: None,
        })
    }

    pub fn raw_last_review<'a>(&'a self, schema: &DatasetSchema) -> &'a str {
        self.fields.get(schema.last_review).unwrap_or("")
    }

    pub fn normalize_last_review(&mut self, schema: &DatasetSchema) -> ReviewDate {
        let parsed = ReviewDate::parse(self.raw_last_review(schema));
        self.last_review = Some(parsed);
        parsed
    }

    /// Output cells: the raw record with `last_review` replaced by its canonical form.
    pub fn to_record(&self, schema: &DatasetSchema) -> StringRecord {
        match self.last_review {
            Some(review) => {
                let canonical = review.to_canonical_string();
                self.fields
                    .iter()
                    .enumerate()
                    .map(|(idx, cell)| {
                        if idx == schema.last_review {
                            canonical.as_str()
                        } else {
                            cell
                        }
                    })
                    .collect()
            }
            None => self.fields.clone(),
        }
    }
}

/// Empty and NaN cells are missing values; anything else must be a number.
fn parse_numeric(
    record: &StringRecord,
    schema: &DatasetSchema,
    idx: usize,
    line: u64,
) -> Result<Option<f64>> {
    let raw = record.get(idx).unwrap_or("").trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| CleaningError::InvalidValue {
            line,
            column: schema.column_name(idx).to_string(),
            value: raw.to_string(),
        })
}
