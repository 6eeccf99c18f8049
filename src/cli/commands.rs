use crate::artifacts::LocalArtifactStore;
use crate::cli::args::Cli;
use crate::error::Result;
use crate::processors::{CleaningStep, StepOutcome};
use crate::settings::Settings;
use crate::tracking::{LocalRunTracker, RunTracker};
use tracing::{debug, error, info};

/// Run the cleaning step against the local artifact store and record the run.
///
/// A failed step still closes its run record, as `failed`, before the error
/// is returned.
pub fn run(cli: Cli) -> Result<StepOutcome> {
    let settings = Settings::load(cli.config.as_deref(), cli.store_root.as_deref())?;
    debug!("Settings: {:?}", settings);

    let store = LocalArtifactStore::new(&settings.store_root);
    let mut tracker = LocalRunTracker::start(&settings.store_root, settings.run_info())?;
    info!(
        "Started run {} ({}/{})",
        tracker.run_id(),
        settings.project,
        settings.job_type
    );

    let params = cli.parameters();
    let step = CleaningStep::new()
        .with_input_file(cli.input_file.clone())
        .with_output_filename(&settings.output_filename)
        .with_dry_run(cli.dry_run);

    let outcome = params
        .to_config_map()
        .and_then(|config| tracker.record_config(config))
        .and_then(|_| step.run(&params, &store, &mut tracker));

    close_run(&mut tracker, outcome)
}

/// Finish the run record. A step error takes precedence over a failure to
/// close the record, which is only logged.
fn close_run(tracker: &mut dyn RunTracker, outcome: Result<StepOutcome>) -> Result<StepOutcome> {
    match outcome {
        Ok(result) => {
            tracker.finish(None)?;
            debug!("\n{}", result.summary.summary());
            Ok(result)
        }
        Err(e) => {
            error!("Cleaning failed: {}", e);
            if let Err(close_err) = tracker.finish(Some(e.to_string().as_str())) {
                error!("Could not close run {}: {}", tracker.run_id(), close_err);
            }
            Err(e)
        }
    }
}
