pub mod local;
pub mod manifest;

pub use local::LocalArtifactStore;
pub use manifest::ArtifactManifest;

use crate::error::{CleaningError, Result};
use crate::utils::constants::{ALIAS_LATEST, RUNS_DIR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Storage for named, versioned artifacts.
pub trait ArtifactStore {
    /// Resolve `reference` to a concrete version and the local directory holding its files.
    fn fetch(&self, reference: &str) -> Result<FetchedArtifact>;

    /// Store `file` as a new version of `spec.name` and return its id (`name:vN`).
    fn publish(&self, spec: &ArtifactSpec, file: &Path) -> Result<String>;
}

/// A resolved artifact version on local disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedArtifact {
    /// Pinned id, `name:vN`, whatever alias was asked for.
    pub id: String,
    pub dir: PathBuf,
}

/// Name and tags attached to a published artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub name: String,
    pub artifact_type: String,
    pub description: String,
}

impl ArtifactSpec {
    pub fn new(name: &str, artifact_type: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            artifact_type: artifact_type.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactVersion {
    Latest,
    Version(u32),
}

/// A parsed `name`, `name:latest` or `name:vN` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactRef {
    pub name: String,
    pub version: ArtifactVersion,
}

impl ArtifactRef {
    pub fn parse(reference: &str) -> Result<Self> {
        let (name, alias) = match reference.rsplit_once(':') {
            Some((name, alias)) => (name, Some(alias)),
            None => (reference, None),
        };

        validate_artifact_name(name)?;

        let version = match alias {
            None => ArtifactVersion::Latest,
            Some(ALIAS_LATEST) => ArtifactVersion::Latest,
            Some(alias) => alias
                .strip_prefix('v')
                .and_then(|n| n.parse::<u32>().ok())
                .map(ArtifactVersion::Version)
                .ok_or_else(|| {
                    CleaningError::InvalidArtifactName(format!(
                        "unknown version alias '{}' in '{}'",
                        alias, reference
                    ))
                })?,
        };

        Ok(Self {
            name: name.to_string(),
            version,
        })
    }
}

/// Artifact names become directory names, so path separators are rejected
/// and the run records directory is reserved.
pub fn validate_artifact_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CleaningError::InvalidArtifactName(
            "artifact name is empty".to_string(),
        ));
    }

    if name == "." || name == ".." || name == RUNS_DIR || name.contains(['/', '\\', ':']) {
        return Err(CleaningError::InvalidArtifactName(format!(
            "'{}' is not a valid artifact name",
            name
        )));
    }

    Ok(())
}
