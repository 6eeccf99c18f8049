pub mod local;

pub use local::{LocalRunTracker, RunRecord};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provenance sink for one pipeline run.
pub trait RunTracker {
    fn run_id(&self) -> &str;

    /// Merge `config` into the recorded run configuration.
    fn record_config(&mut self, config: Map<String, Value>) -> Result<()>;

    /// Record an artifact the run consumed.
    fn use_artifact(&mut self, reference: &str) -> Result<()>;

    /// Record an artifact the run produced.
    fn log_artifact(&mut self, artifact_id: &str) -> Result<()>;

    /// Close the run; `error` is the failure message of an aborted run.
    fn finish(&mut self, error: Option<&str>) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Finished,
    Failed,
}

/// Identifies where a run belongs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInfo {
    pub project: String,
    pub job_type: String,
    pub group: String,
}
