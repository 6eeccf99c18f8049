use crate::error::{CleaningError, Result};
use crate::tracking::RunInfo;
use crate::utils::constants::{
    CLEANED_FILENAME, DEFAULT_GROUP, DEFAULT_JOB_TYPE, DEFAULT_PROJECT, DEFAULT_STORE_ROOT,
    ENV_PREFIX,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Runtime settings that are not part of the run parameters.
///
/// Sources, lowest precedence first: built-in defaults, the optional TOML
/// file, `BASIC_CLEANING_*` environment variables, command-line overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    pub store_root: PathBuf,

    #[validate(length(min = 1))]
    pub project: String,

    #[validate(length(min = 1))]
    pub job_type: String,

    #[validate(length(min = 1))]
    pub group: String,

    #[validate(length(min = 1))]
    pub output_filename: String,
}

impl Settings {
    pub fn load(config_file: Option<&Path>, store_root: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("store_root", DEFAULT_STORE_ROOT)?
            .set_default("project", DEFAULT_PROJECT)?
            .set_default("job_type", DEFAULT_JOB_TYPE)?
            .set_default("group", DEFAULT_GROUP)?
            .set_default("output_filename", CLEANED_FILENAME)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option(
                "store_root",
                store_root.map(|p| p.to_string_lossy().into_owned()),
            )?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        settings.check_output_filename()?;

        Ok(settings)
    }

    pub fn run_info(&self) -> RunInfo {
        RunInfo {
            project: self.project.clone(),
            job_type: self.job_type.clone(),
            group: self.group.clone(),
        }
    }

    fn check_output_filename(&self) -> Result<()> {
        let is_plain_name = Path::new(&self.output_filename)
            .file_name()
            .map_or(false, |name| name == self.output_filename.as_str());
        if !is_plain_name {
            return Err(CleaningError::InvalidParameter(format!(
                "output_filename must be a bare file name, got '{}'",
                self.output_filename
            )));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_root: PathBuf::from(DEFAULT_STORE_ROOT),
            project: DEFAULT_PROJECT.to_string(),
            job_type: DEFAULT_JOB_TYPE.to_string(),
            group: DEFAULT_GROUP.to_string(),
            output_filename: CLEANED_FILENAME.to_string(),
        }
    }
}
