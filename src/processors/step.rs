use crate::artifacts::{ArtifactSpec, ArtifactStore};
use crate::error::Result;
use crate::models::CleaningParameters;
use crate::processors::{Cleaner, CleaningSummary, PriceRange};
use crate::readers::{locate_input, DatasetReader};
use crate::tracking::RunTracker;
use crate::utils::constants::CLEANED_FILENAME;
use crate::writers::CsvWriter;
use tempfile::TempDir;
use tracing::info;
use validator::Validate;

#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub summary: CleaningSummary,
    /// `None` on a dry run.
    pub artifact_id: Option<String>,
}

/// The basic cleaning step: fetch, clean, publish.
pub struct CleaningStep {
    input_file: Option<String>,
    output_filename: String,
    dry_run: bool,
}

impl CleaningStep {
    pub fn new() -> Self {
        Self {
            input_file: None,
            output_filename: CLEANED_FILENAME.to_string(),
            dry_run: false,
        }
    }

    pub fn with_input_file(mut self, input_file: Option<String>) -> Self {
        self.input_file = input_file;
        self
    }

    pub fn with_output_filename(mut self, output_filename: &str) -> Self {
        self.output_filename = output_filename.to_string();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the step. Any error aborts before anything is published.
    pub fn run(
        &self,
        params: &CleaningParameters,
        store: &dyn ArtifactStore,
        tracker: &mut dyn RunTracker,
    ) -> Result<StepOutcome> {
        params.validate()?;
        let cleaner = Cleaner::new(PriceRange::new(params.min_price, params.max_price)?);

        let input = store.fetch(&params.input_artifact)?;
        tracker.use_artifact(&input.id)?;
        let input_path = locate_input(&input.dir, self.input_file.as_deref())?;
        info!("Reading {}", input_path.display());

        let dataset = DatasetReader::new().read_dataset(&input_path)?;
        let (cleaned, summary) = cleaner.clean(dataset);
        info!(
            "Kept {} of {} rows ({} outside price range, {} outside location bounds)",
            summary.output_rows,
            summary.input_rows,
            summary.dropped_by_price,
            summary.dropped_by_location
        );

        // Removed when it goes out of scope, on success and on error alike
        let staging = TempDir::new()?;
        let output_path = staging.path().join(&self.output_filename);
        CsvWriter::new().write_dataset(&cleaned, &output_path)?;

        if self.dry_run {
            info!("Dry run: {} not published", params.output_artifact);
            return Ok(StepOutcome {
                summary,
                artifact_id: None,
            });
        }

        let spec = ArtifactSpec::new(
            &params.output_artifact,
            &params.output_type,
            &params.output_description,
        );
        let artifact_id = store.publish(&spec, &output_path)?;
        tracker.log_artifact(&artifact_id)?;

        info!(
            "Cleaned data saved and logged as artifact: {}",
            params.output_artifact
        );

        Ok(StepOutcome {
            summary,
            artifact_id: Some(artifact_id),
        })
    }
}

impl Default for CleaningStep {
    fn default() -> Self {
        Self::new()
    }
}
