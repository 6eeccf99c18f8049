use crate::error::Result;
use crate::tracking::{RunInfo, RunStatus, RunTracker};
use crate::utils::constants::RUNS_DIR;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::debug;

static RUN_SEQUENCE: AtomicU32 = AtomicU32::new(0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: String,
    #[serde(flatten)]
    pub info: RunInfo,
    pub config: Map<String, Value>,
    pub used_artifacts: Vec<String>,
    pub logged_artifacts: Vec<String>,
    pub status: RunStatus,
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunRecord {
    pub fn read_from(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Writes one JSON record per run to `<root>/runs/<run_id>.json`,
/// rewritten after every change so an aborted process leaves its last state.
pub struct LocalRunTracker {
    path: PathBuf,
    record: RunRecord,
}

impl LocalRunTracker {
    pub fn start(root: &Path, info: RunInfo) -> Result<Self> {
        let runs_dir = root.join(RUNS_DIR);
        fs::create_dir_all(&runs_dir)?;

        let started_at = Utc::now();
        let run_id = format!(
            "{}-{}-{}",
            started_at.format("%Y%m%dT%H%M%S%3f"),
            std::process::id(),
            RUN_SEQUENCE.fetch_add(1, Ordering::Relaxed)
        );
        let path = runs_dir.join(format!("{}.json", run_id));

        let tracker = Self {
            path,
            record: RunRecord {
                run_id,
                info,
                config: Map::new(),
                used_artifacts: Vec::new(),
                logged_artifacts: Vec::new(),
                status: RunStatus::Running,
                error: None,
                started_at,
                finished_at: None,
            },
        };
        tracker.save()?;
        debug!("Started run {} in {}", tracker.record.run_id, tracker.path.display());

        Ok(tracker)
    }

    pub fn record(&self) -> &RunRecord {
        &self.record
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl RunTracker for LocalRunTracker {
    fn run_id(&self) -> &str {
        &self.record.run_id
    }

    fn record_config(&mut self, config: Map<String, Value>) -> Result<()> {
        self.record.config.extend(config);
        self.save()
    }

    fn use_artifact(&mut self, reference: &str) -> Result<()> {
        self.record.used_artifacts.push(reference.to_string());
        self.save()
    }

    fn log_artifact(&mut self, artifact_id: &str) -> Result<()> {
        self.record.logged_artifacts.push(artifact_id.to_string());
        self.save()
    }

    fn finish(&mut self, error: Option<&str>) -> Result<()> {
        self.record.status = match error {
            Some(_) => RunStatus::Failed,
            None => RunStatus::Finished,
        };
        self.record.error = error.map(str::to_string);
        self.record.finished_at = Some(Utc::now());
        self.save()
    }
}
