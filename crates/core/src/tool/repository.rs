use super::{ToolCoordinate, unpack::io_error};
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A single file in a Maven-layout repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub classifier: Option<String>,
    pub extension: String,
}

impl Artifact {
    pub fn nar(coordinate: &ToolCoordinate, classifier: &str) -> Self {
        Self {
            group_id: coordinate.group_id.to_string(),
            artifact_id: coordinate.artifact_id.to_string(),
            version: coordinate.version.to_string(),
            classifier: Some(classifier.to_string()),
            extension: "nar".to_string(),
        }
    }

    pub fn file_name(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                self.artifact_id, self.version, classifier, self.extension
            ),
            None => format!("{}-{}.{}", self.artifact_id, self.version, self.extension),
        }
    }

    /// `group/as/dirs/artifact/version/file`
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.group_id.split('.').collect();
        path.push(&self.artifact_id);
        path.push(&self.version);
        path.push(self.file_name());
        path
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.extension)
    }
}

/// Makes an artifact available as a local file.
pub trait ArtifactResolver {
    fn resolve(&self, artifact: &Artifact) -> Result<PathBuf>;
}

/// A local repository backed by zero or more mirror directories.
///
/// Artifacts missing locally are copied from the first mirror that has them.
/// Each lookup is attempted once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    local: PathBuf,
    remotes: Vec<PathBuf>,
}

impl Repository {
    pub fn new(local: impl Into<PathBuf>) -> Self {
        Self {
            local: local.into(),
            remotes: Vec::new(),
        }
    }

    pub fn with_remote(mut self, remote: impl Into<PathBuf>) -> Self {
        self.remotes.push(remote.into());
        self
    }

    /// `~/.m2/repository`
    pub fn default_local() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".m2").join("repository"))
    }

    /// Accepts a directory path or a `file://` URL.
    pub fn parse_remote(url: &str, base: &Path) -> Result<PathBuf> {
        let url = url.trim();
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(PathBuf::from(path));
        }
        if url.contains("://") {
            return Err(Error::ConfigError(format!(
                "unsupported remote repository {url}: only directories and file:// URLs can be used"
            )));
        }
        let path = Path::new(url);
        Ok(if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        })
    }

    pub fn local(&self) -> &Path {
        &self.local
    }

    pub fn remotes(&self) -> &[PathBuf] {
        &self.remotes
    }

    pub fn path_of(&self, artifact: &Artifact) -> PathBuf {
        self.local.join(artifact.relative_path())
    }
}

impl ArtifactResolver for Repository {
    fn resolve(&self, artifact: &Artifact) -> Result<PathBuf> {
        let target = self.path_of(artifact);
        if target.is_file() {
            debug!("{} found in local repository", artifact);
            return Ok(target);
        }

        for remote in &self.remotes {
            let candidate = remote.join(artifact.relative_path());
            if !candidate.is_file() {
                debug!("{} not in {:?}", artifact, remote);
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(io_error(parent))?;
            }
            fs::copy(&candidate, &target).map_err(|e| {
                Error::ResolutionError(format!(
                    "failed to copy {} from {}: {e}",
                    artifact,
                    remote.display()
                ))
            })?;
            info!("Downloaded {} from {}", artifact, remote.display());
            return Ok(target);
        }

        Err(Error::ResolutionError(format!(
            "{} not found in {} or {} remote repositories",
            artifact,
            self.local.display(),
            self.remotes.len()
        )))
    }
}
