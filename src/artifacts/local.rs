use crate::artifacts::{
    validate_artifact_name, ArtifactManifest, ArtifactRef, ArtifactSpec, ArtifactStore,
    ArtifactVersion, FetchedArtifact,
};
use crate::error::{CleaningError, Result};
use crate::utils::constants::MANIFEST_FILE;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Artifact store on the local filesystem.
///
/// Layout: `<root>/<name>/v<N>/` holds the files of version `N` and a
/// `manifest.json`. Versions start at 0 and are never rewritten.
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn artifact_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn version_dir(&self, name: &str, version: u32) -> PathBuf {
        self.artifact_dir(name).join(format!("v{}", version))
    }

    /// Published versions of `name`, ascending. Directories without a manifest are ignored.
    pub fn versions(&self, name: &str) -> Result<Vec<u32>> {
        validate_artifact_name(name)?;

        let dir = self.artifact_dir(name);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut versions = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.join(MANIFEST_FILE).is_file() {
                continue;
            }
            let version = path
                .file_name()
                .and_then(|f| f.to_str())
                .and_then(|f| f.strip_prefix('v'))
                .and_then(|n| n.parse::<u32>().ok());
            if let Some(version) = version {
                versions.push(version);
            }
        }
        versions.sort_unstable();

        Ok(versions)
    }

    pub fn manifest(&self, reference: &str) -> Result<ArtifactManifest> {
        let fetched = self.fetch(reference)?;
        ArtifactManifest::read_from(&fetched.dir)
    }
}

impl ArtifactStore for LocalArtifactStore {
    fn fetch(&self, reference: &str) -> Result<FetchedArtifact> {
        let parsed = ArtifactRef::parse(reference)?;
        let versions = self.versions(&parsed.name)?;

        let version = match parsed.version {
            ArtifactVersion::Latest => versions.last().copied(),
            ArtifactVersion::Version(v) => versions.contains(&v).then_some(v),
        }
        .ok_or_else(|| CleaningError::ArtifactNotFound(reference.to_string()))?;

        let dir = self.version_dir(&parsed.name, version);
        let id = format!("{}:v{}", parsed.name, version);
        debug!("Resolved artifact {} to {} ({})", reference, id, dir.display());
        Ok(FetchedArtifact { id, dir })
    }

    fn publish(&self, spec: &ArtifactSpec, file: &Path) -> Result<String> {
        validate_artifact_name(&spec.name)?;

        let file_name = file
            .file_name()
            .and_then(|f| f.to_str())
            .ok_or_else(|| {
                CleaningError::InvalidParameter(format!(
                    "cannot publish '{}': not a file path",
                    file.display()
                ))
            })?
            .to_string();

        let version = self
            .versions(&spec.name)?
            .last()
            .map_or(0, |latest| latest + 1);
        let dir = self.version_dir(&spec.name, version);
        fs::create_dir_all(&dir)?;
        fs::copy(file, dir.join(&file_name))?;

        // The manifest goes last; a version without one is not visible
        let manifest = ArtifactManifest {
            name: spec.name.clone(),
            version,
            artifact_type: spec.artifact_type.clone(),
            description: spec.description.clone(),
            files: vec![file_name],
            created_at: Utc::now(),
        };
        manifest.write_to(&dir)?;

        let id = manifest.id();
        info!("Published artifact {} ({})", id, spec.artifact_type);
        Ok(id)
    }
}
