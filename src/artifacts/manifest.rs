use crate::error::Result;
use crate::utils::constants::MANIFEST_FILE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Metadata stored next to the files of one artifact version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub name: String,
    pub version: u32,
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub description: String,
    pub files: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ArtifactManifest {
    pub fn id(&self) -> String {
        format!("{}:v{}", self.name, self.version)
    }

    pub fn read_from(version_dir: &Path) -> Result<Self> {
        let file = File::open(version_dir.join(MANIFEST_FILE))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn write_to(&self, version_dir: &Path) -> Result<()> {
        let file = File::create(version_dir.join(MANIFEST_FILE))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
