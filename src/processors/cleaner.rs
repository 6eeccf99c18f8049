use crate::error::{CleaningError, Result};
use crate::models::Dataset;
use crate::utils::constants::{NYC_MAX_LAT, NYC_MAX_LON, NYC_MIN_LAT, NYC_MIN_LON};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inclusive price bounds. `min > max` is accepted and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(CleaningError::InvalidParameter(format!(
                "price bounds must be finite, got [{}, {}]",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, price: f64) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_latitude: f64,
    pub max_latitude: f64,
}

impl GeoBounds {
    pub const NEW_YORK_CITY: GeoBounds = GeoBounds {
        min_longitude: NYC_MIN_LON,
        max_longitude: NYC_MAX_LON,
        min_latitude: NYC_MIN_LAT,
        max_latitude: NYC_MAX_LAT,
    };

    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        (self.min_longitude..=self.max_longitude).contains(&longitude)
            && (self.min_latitude..=self.max_latitude).contains(&latitude)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub input_rows: usize,
    pub dropped_by_price: usize,
    pub dropped_by_location: usize,
    pub invalid_dates: usize,
    pub output_rows: usize,
}

impl CleaningSummary {
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Cleaning Report ===\n");
        summary.push_str(&format!("Input Rows: {}\n", self.input_rows));
        summary.push_str(&format!(
            "Dropped (price): {}\n",
            self.dropped_by_price
        ));
        summary.push_str(&format!(
            "Dropped (location): {}\n",
            self.dropped_by_location
        ));
        summary.push_str(&format!(
            "Invalid Review Dates: {}\n",
            self.invalid_dates
        ));
        summary.push_str(&format!("Output Rows: {}\n", self.output_rows));

        summary
    }
}

pub struct Cleaner {
    price_range: PriceRange,
    geo_bounds: GeoBounds,
}

impl Cleaner {
    pub fn new(price_range: PriceRange) -> Self {
        Self {
            price_range,
            geo_bounds: GeoBounds::NEW_YORK_CITY,
        }
    }

    /// Apply the filters in order: price, review date normalization, location.
    ///
    /// Rows missing a price or a coordinate never pass the corresponding filter.
    /// Unparsable review dates are marked invalid and the row is kept.
    pub fn clean(&self, dataset: Dataset) -> (Dataset, CleaningSummary) {
        let Dataset { schema, rows } = dataset;
        let mut summary = CleaningSummary {
            input_rows: rows.len(),
            ..Default::default()
        };

        let mut rows: Vec<_> = rows
            .into_iter()
            .filter(|row| row.price.map_or(false, |p| self.price_range.contains(p)))
            .collect();
        summary.dropped_by_price = summary.input_rows - rows.len();
        debug!(
            "Price filter [{}, {}] kept {} of {} rows",
            self.price_range.min,
            self.price_range.max,
            rows.len(),
            summary.input_rows
        );

        for row in rows.iter_mut() {
            row.normalize_last_review(&schema);
        }

        let before_location = rows.len();
        rows.retain(|row| match (row.longitude, row.latitude) {
            (Some(lon), Some(lat)) => self.geo_bounds.contains(lon, lat),
            _ => false,
        });
        summary.dropped_by_location = before_location - rows.len();
        summary.output_rows = rows.len();
        debug!(
            "Location filter kept {} of {} rows",
            rows.len(),
            before_location
        );

        // Invalid dates are counted among the rows that are written out
        summary.invalid_dates = rows
            .iter()
            .filter(|row| matches!(row.last_review, Some(date) if !date.is_valid()))
            .count();

        (Dataset::new(schema, rows), summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DatasetSchema, Listing, ReviewDate};
    use csv::StringRecord;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn dataset(rows: &[[&str; 5]]) -> Dataset {
        let headers = StringRecord::from(vec!["id", "price", "longitude", "latitude", "last_review"]);
        let schema = DatasetSchema::from_headers(headers, Path::new("test.csv")).unwrap();
        let listings = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Listing::from_record(StringRecord::from(row.to_vec()), &schema, i as u64 + 2)
                    .unwrap()
            })
            .collect();
        Dataset::new(schema, listings)
    }

    fn cleaner(min: f64, max: f64) -> Cleaner {
        Cleaner::new(PriceRange::new(min, max).unwrap())
    }

    #[test]
    fn test_row_within_bounds_is_kept() {
        let input = dataset(&[["1", "50", "-74.0", "40.8", "2019-05-01"]]);
        let (output, summary) = cleaner(10.0, 200.0).clean(input);

        assert_eq!(output.len(), 1);
        let review = output.rows[0].last_review.unwrap();
        assert!(review.is_valid());
        assert_eq!(review.to_canonical_string(), "2019-05-01");
        assert_eq!(summary.output_rows, 1);
        assert_eq!(summary.invalid_dates, 0);
    }

    #[test]
    fn test_price_below_min_is_dropped() {
        let input = dataset(&[["1", "5", "-74.0", "40.8", "2019-05-01"]]);
        let (output, summary) = cleaner(10.0, 200.0).clean(input);

        assert!(output.is_empty());
        assert_eq!(summary.dropped_by_price, 1);
    }

    #[test]
    fn test_longitude_outside_box_is_dropped() {
        let input = dataset(&[["1", "50", "-75.0", "40.8", "2019-05-01"]]);
        let (output, summary) = cleaner(10.0, 200.0).clean(input);

        assert!(output.is_empty());
        assert_eq!(summary.dropped_by_location, 1);
    }

    #[test]
    fn test_unparsable_date_is_kept_as_invalid() {
        let input = dataset(&[["1", "50", "-74.0", "40.8", "not-a-date"]]);
        let (output, summary) = cleaner(10.0, 200.0).clean(input);

        assert_eq!(output.len(), 1);
        assert_eq!(output.rows[0].last_review, Some(ReviewDate::Invalid));
        assert_eq!(summary.invalid_dates, 1);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let input = dataset(&[
            ["1", "10", "-74.25", "40.5", ""],
            ["2", "200", "-73.50", "41.2", ""],
            ["3", "200.01", "-74.0", "40.8", ""],
            ["4", "50", "-73.49", "40.8", ""],
            ["5", "50", "-74.0", "41.21", ""],
        ]);
        let (output, _) = cleaner(10.0, 200.0).clean(input);

        let ids: Vec<_> = output.rows.iter().map(|r| r.fields.get(0).unwrap()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_inverted_price_range_yields_empty_dataset() {
        let input = dataset(&[["1", "50", "-74.0", "40.8", "2019-05-01"]]);
        let (output, summary) = cleaner(200.0, 10.0).clean(input);

        assert!(output.is_empty());
        assert_eq!(summary.input_rows, 1);
        assert_eq!(summary.output_rows, 0);
    }

    #[test]
    fn test_missing_values_are_dropped() {
        let input = dataset(&[
            ["1", "", "-74.0", "40.8", ""],
            ["2", "50", "", "40.8", ""],
            ["3", "50", "-74.0", "NaN", ""],
        ]);
        let (output, summary) = cleaner(10.0, 200.0).clean(input);

        assert!(output.is_empty());
        assert_eq!(summary.dropped_by_price, 1);
        assert_eq!(summary.dropped_by_location, 2);
    }

    #[test]
    fn test_row_order_is_preserved() {
        let input = dataset(&[
            ["a", "30", "-74.0", "40.8", ""],
            ["b", "5", "-74.0", "40.8", ""],
            ["c", "40", "-73.9", "40.7", ""],
            ["d", "60", "-73.8", "40.6", ""],
        ]);
        let (output, _) = cleaner(10.0, 200.0).clean(input);

        let ids: Vec<_> = output.rows.iter().map(|r| r.fields.get(0).unwrap()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let input = dataset(&[
            ["1", "50", "-74.0", "40.8", "2019/05/01"],
            ["2", "500", "-74.0", "40.8", "2019-05-02"],
            ["3", "75", "-73.9", "40.7", "garbage"],
        ]);
        let cleaner = cleaner(10.0, 200.0);
        let (first, _) = cleaner.clean(input);

        let rewritten: Vec<[String; 5]> = first
            .records()
            .map(|r| std::array::from_fn(|i| r.get(i).unwrap().to_string()))
            .collect();
        let rows: Vec<[&str; 5]> = rewritten
            .iter()
            .map(|r| std::array::from_fn(|i| r[i].as_str()))
            .collect();
        let (second, _) = cleaner.clean(dataset(&rows));

        let first_records: Vec<_> = first.records().collect();
        let second_records: Vec<_> = second.records().collect();
        assert_eq!(first_records, second_records);
    }

    #[test]
    fn test_non_finite_bounds_are_rejected() {
        assert!(PriceRange::new(f64::NAN, 10.0).is_err());
        assert!(PriceRange::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_summary_report() {
        let summary = CleaningSummary {
            input_rows: 10,
            dropped_by_price: 3,
            dropped_by_location: 2,
            invalid_dates: 1,
            output_rows: 5,
        };
        let report = summary.summary();

        assert!(report.contains("Input Rows: 10"));
        assert!(report.contains("Dropped (price): 3"));
        assert!(report.contains("Output Rows: 5"));
    }
}
