/// Columns every input dataset must carry
pub const PRICE_COLUMN: &str = "price";
pub const LONGITUDE_COLUMN: &str = "longitude";
pub const LATITUDE_COLUMN: &str = "latitude";
pub const LAST_REVIEW_COLUMN: &str = "last_review";

/// New York City geographic bounds
pub const NYC_MIN_LON: f64 = -74.25;
pub const NYC_MAX_LON: f64 = -73.50;
pub const NYC_MIN_LAT: f64 = 40.5;
pub const NYC_MAX_LAT: f64 = 41.2;

/// File names
pub const INPUT_EXTENSION: &str = "csv";
pub const CLEANED_FILENAME: &str = "clean_sample.csv";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const RUNS_DIR: &str = "runs";

/// Run tracking defaults
pub const DEFAULT_STORE_ROOT: &str = "artifacts";
pub const DEFAULT_PROJECT: &str = "nyc_airbnb";
pub const DEFAULT_JOB_TYPE: &str = "basic_cleaning";
pub const DEFAULT_GROUP: &str = "cleaning";

/// Environment variable prefix for settings overrides
pub const ENV_PREFIX: &str = "BASIC_CLEANING";

/// Artifact version aliases
pub const ALIAS_LATEST: &str = "latest";
