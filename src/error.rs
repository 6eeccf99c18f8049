use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CleaningError>;

#[derive(Error, Debug)]
pub enum CleaningError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("No CSV file found in {}", .dir.display())]
    NoInputFound { dir: PathBuf },

    #[error("Input file '{file}' not found in {}", .dir.display())]
    InputFileNotFound { file: String, dir: PathBuf },

    #[error(
        "Found {} CSV files in {} ({}); select one with --input_file",
        .candidates.len(),
        .dir.display(),
        .candidates.join(", ")
    )]
    AmbiguousInput {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    #[error("Required column '{column}' is missing from {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("Line {line}, column '{column}': invalid value '{value}'")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Line {line}: expected at most {expected} fields, found {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Artifact '{0}' not found")]
    ArtifactNotFound(String),

    #[error("Invalid artifact name: {0}")]
    InvalidArtifactName(String),
}
