use crate::{
    config::Platform,
    error::{Error, Result},
    tool::Repository,
    utils::serde_helpers::string_or_list,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAMES: [&str; 2] = [".swig-runner.json", "swig-runner.json"];

pub const DEFAULT_SOURCE_DIRECTORY: &str = "src/main/swig";
pub const DEFAULT_INCLUDE_DIRECTORY: &str = "src/main/include";
pub const DEFAULT_TARGET_DIRECTORY: &str = "target/swig";
pub const DEFAULT_JAVA_TARGET_DIRECTORY: &str = "target/swig/java";

/// Raw configuration as read from `.swig-runner.json` or the command line.
///
/// Every field is optional so that layers can be merged; call
/// [`Config::resolve`] to obtain the settings used for a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// The interface file to process, relative to `source_directory`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_directory: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_paths: Option<Vec<PathBuf>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_directory: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_target_directory: Option<PathBuf>,
    /// Enable C++ processing, same as `-c++`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpp: Option<bool>,
    /// Warning numbers to suppress, same as `-w`
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_list"
    )]
    pub no_warn: Option<Vec<String>>,
    /// Package for the generated Java classes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_repository: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_repositories: Option<Vec<String>>,
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents).map_err(|e| {
            Error::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Load the nearest config file above `project_dir`, or an empty config.
    pub fn discover(project_dir: &Path) -> Result<Self> {
        match Self::find_config_file(project_dir) {
            Some(path) => {
                debug!("Loading config from {:?}", path);
                Self::load_from_file(&path)
            }
            None => {
                debug!("No config file found above {:?}", project_dir);
                Ok(Self::default())
            }
        }
    }

    /// Overlay `other` on top of `self`. Values set in `other` win, lists are replaced.
    pub fn merge(&mut self, other: Config) {
        overlay(&mut self.source, other.source);
        overlay(&mut self.source_directory, other.source_directory);
        overlay(&mut self.include_paths, other.include_paths);
        overlay(&mut self.target_directory, other.target_directory);
        overlay(&mut self.java_target_directory, other.java_target_directory);
        overlay(&mut self.cpp, other.cpp);
        overlay(&mut self.no_warn, other.no_warn);
        overlay(&mut self.package_name, other.package_name);
        overlay(&mut self.architecture, other.architecture);
        overlay(&mut self.os, other.os);
        overlay(&mut self.local_repository, other.local_repository);
        overlay(&mut self.remote_repositories, other.remote_repositories);
    }

    /// Apply defaults and make every path absolute against `project_dir`.
    pub fn resolve(&self, project_dir: &Path) -> Result<GenerateSettings> {
        let source = self
            .source
            .as_deref()
            .map(str::trim)
            .filter(|source| !source.is_empty())
            .ok_or_else(|| Error::ConfigError("no source file configured".to_string()))?;

        let absolute = |path: &Path| -> PathBuf {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                project_dir.join(path)
            }
        };

        let mut include_paths: Vec<PathBuf> = Vec::new();
        for path in self.include_paths.iter().flatten() {
            let path = absolute(path);
            if !include_paths.contains(&path) {
                include_paths.push(path);
            }
        }

        let host = Platform::host();
        let platform = Platform::new(
            self.architecture.as_deref().unwrap_or(&host.architecture),
            self.os.as_deref().unwrap_or(&host.os),
        );

        Ok(GenerateSettings {
            project_dir: project_dir.to_path_buf(),
            source: source.to_string(),
            source_directory: absolute(
                self.source_directory
                    .as_deref()
                    .unwrap_or(Path::new(DEFAULT_SOURCE_DIRECTORY)),
            ),
            include_paths,
            target_directory: absolute(
                self.target_directory
                    .as_deref()
                    .unwrap_or(Path::new(DEFAULT_TARGET_DIRECTORY)),
            ),
            java_target_directory: absolute(
                self.java_target_directory
                    .as_deref()
                    .unwrap_or(Path::new(DEFAULT_JAVA_TARGET_DIRECTORY)),
            ),
            cpp: self.cpp.unwrap_or(false),
            no_warn: self.no_warn.clone().unwrap_or_default(),
            package_name: self
                .package_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            platform,
        })
    }

    /// Repository used to look up the SWIG archive.
    pub fn repository(&self, project_dir: &Path) -> Result<Repository> {
        let local = match &self.local_repository {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => project_dir.join(path),
            None => Repository::default_local().ok_or_else(|| {
                Error::ConfigError(
                    "cannot locate a home directory; set local_repository".to_string(),
                )
            })?,
        };

        let mut repository = Repository::new(local);
        for remote in self.remote_repositories.iter().flatten() {
            repository = repository.with_remote(Repository::parse_remote(remote, project_dir)?);
        }
        Ok(repository)
    }
}

fn overlay<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

/// Fully resolved settings for a single generate run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSettings {
    pub project_dir: PathBuf,
    pub source: String,
    pub source_directory: PathBuf,
    pub include_paths: Vec<PathBuf>,
    pub target_directory: PathBuf,
    pub java_target_directory: PathBuf,
    pub cpp: bool,
    pub no_warn: Vec<String>,
    pub package_name: Option<String>,
    pub platform: Platform,
}

impl GenerateSettings {
    /// Settings with every default applied, rooted at `project_dir`.
    pub fn new(project_dir: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        let project_dir = project_dir.into();
        Self {
            source: source.into(),
            source_directory: project_dir.join(DEFAULT_SOURCE_DIRECTORY),
            include_paths: Vec::new(),
            target_directory: project_dir.join(DEFAULT_TARGET_DIRECTORY),
            java_target_directory: project_dir.join(DEFAULT_JAVA_TARGET_DIRECTORY),
            cpp: false,
            no_warn: Vec::new(),
            package_name: None,
            platform: Platform::host(),
            project_dir,
        }
    }

    pub fn source_path(&self) -> PathBuf {
        self.source_directory.join(&self.source)
    }

    /// Fail before anything is created or launched if the interface file is missing.
    pub fn validate(&self) -> Result<()> {
        if self.source.trim().is_empty() {
            return Err(Error::ConfigError("no source file configured".to_string()));
        }
        if !self.source_directory.is_dir() {
            return Err(Error::ConfigError(format!(
                "source directory {} does not exist",
                self.source_directory.display()
            )));
        }
        let source = self.source_path();
        if !source.is_file() {
            return Err(Error::SourceNotFound(source));
        }
        Ok(())
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout {
            native_dir: self
                .target_directory
                .join(if self.cpp { "c++" } else { "c" }),
            java_dir: self.java_target_directory.clone(),
        }
    }
}

/// Where SWIG writes its two kinds of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Receives the C or C++ wrapper
    pub native_dir: PathBuf,
    /// Receives the Java proxy classes; registered as a compile source root
    pub java_dir: PathBuf,
}

impl OutputLayout {
    pub fn create(&self) -> Result<()> {
        for dir in [&self.native_dir, &self.java_dir] {
            if !dir.exists() {
                debug!("Creating output directory {:?}", dir);
                std::fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }
}
