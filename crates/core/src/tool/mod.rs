//! Locating and unpacking the SWIG executable
//!
//! SWIG ships as two NAR attachments of a pinned Maven artifact: a
//! platform-specific `<aol>-executable` archive carrying `bin/<aol>/swig`,
//! and a `noarch` archive carrying the `include` tree. Both are unpacked next
//! to the artifact in the local repository under `nar/`.

pub mod repository;
pub mod unpack;

pub use repository::{Artifact, ArtifactResolver, Repository};
pub use unpack::unpack_nar;

use crate::{
    config::Platform,
    error::{Error, Result},
};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Maven coordinate of the tool archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolCoordinate {
    pub group_id: &'static str,
    pub artifact_id: &'static str,
    pub version: &'static str,
}

impl fmt::Display for ToolCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

pub const SWIG: ToolCoordinate = ToolCoordinate {
    group_id: "org.swig",
    artifact_id: "swig",
    version: "1.3.29-1-SNAPSHOT",
};

/// One supported platform build of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolEntry {
    pub architecture: &'static str,
    pub os: &'static str,
    pub linker: &'static str,
    pub executable: &'static str,
}

impl ToolEntry {
    pub const fn new(
        architecture: &'static str,
        os: &'static str,
        linker: &'static str,
        executable: &'static str,
    ) -> Self {
        Self {
            architecture,
            os,
            linker,
            executable,
        }
    }

    /// Architecture-OS-linker key used in NAR classifiers and `bin/` paths.
    pub fn aol(&self) -> String {
        format!("{}-{}-{}", self.architecture, self.os, self.linker)
    }

    pub fn matches(&self, platform: &Platform) -> bool {
        self.architecture == platform.architecture && self.os == platform.os
    }
}

pub const DEFAULT_ENTRIES: &[ToolEntry] = &[
    ToolEntry::new("amd64", "Linux", "g++", "swig"),
    ToolEntry::new("i386", "Linux", "g++", "swig"),
    ToolEntry::new("aarch64", "Linux", "g++", "swig"),
    ToolEntry::new("amd64", "MacOSX", "g++", "swig"),
    ToolEntry::new("aarch64", "MacOSX", "g++", "swig"),
    ToolEntry::new("i386", "MacOSX", "g++", "swig"),
    ToolEntry::new("ppc", "MacOSX", "g++", "swig"),
    ToolEntry::new("i386", "Windows", "msvc", "swig.exe"),
    ToolEntry::new("amd64", "Windows", "msvc", "swig.exe"),
    ToolEntry::new("sparc", "SunOS", "CC", "swig"),
];

/// Pinned tool version together with the platforms it is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolTable {
    pub coordinate: ToolCoordinate,
    pub entries: &'static [ToolEntry],
}

impl Default for ToolTable {
    fn default() -> Self {
        Self {
            coordinate: SWIG,
            entries: DEFAULT_ENTRIES,
        }
    }
}

impl ToolTable {
    pub fn new(coordinate: ToolCoordinate, entries: &'static [ToolEntry]) -> Self {
        Self {
            coordinate,
            entries,
        }
    }

    pub fn lookup(&self, platform: &Platform) -> Result<&ToolEntry> {
        self.entries
            .iter()
            .find(|entry| entry.matches(platform))
            .ok_or_else(|| {
                Error::ResolutionError(format!(
                    "no {} build is published for platform {platform}",
                    self.coordinate
                ))
            })
    }

    pub fn executable_artifact(&self, entry: &ToolEntry) -> Artifact {
        Artifact::nar(&self.coordinate, &format!("{}-executable", entry.aol()))
    }

    pub fn noarch_artifact(&self) -> Artifact {
        Artifact::nar(&self.coordinate, "noarch")
    }

    /// Where the executable archive for `entry` unpacks inside `repository`,
    /// without fetching anything.
    pub fn nar_dir(&self, repository: &Repository, entry: &ToolEntry) -> Result<PathBuf> {
        nar_dir_of(&repository.path_of(&self.executable_artifact(entry)))
    }

    /// Fetch both archives for `platform`, unpack them and locate the executable.
    pub fn resolve(
        &self,
        resolver: &dyn ArtifactResolver,
        platform: &Platform,
    ) -> Result<ResolvedTool> {
        let entry = self.lookup(platform)?;
        debug!("Resolving {} for {}", self.coordinate, entry.aol());

        let executable_nar = resolver.resolve(&self.executable_artifact(entry))?;
        let noarch_nar = resolver.resolve(&self.noarch_artifact())?;

        let nar_dir = nar_dir_of(&executable_nar)?;

        for archive in [&noarch_nar, &executable_nar] {
            let count = unpack_nar(archive, &nar_dir)?;
            debug!("Unpacked {} entries from {:?}", count, archive);
        }

        let tool = ResolvedTool::in_nar_dir(&nar_dir, entry);
        if !tool.executable.is_file() {
            return Err(Error::ResolutionError(format!(
                "{} does not contain {}",
                executable_nar.display(),
                tool.executable.display()
            )));
        }

        info!("Using SWIG at {}", tool.executable.display());
        Ok(tool)
    }
}

/// Archives unpack into `nar/` beside the archive file.
fn nar_dir_of(archive: &Path) -> Result<PathBuf> {
    archive
        .parent()
        .map(|dir| dir.join("nar"))
        .ok_or_else(|| {
            Error::ResolutionError(format!("{} has no parent directory", archive.display()))
        })
}

/// Locations inside an unpacked NAR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTool {
    pub executable: PathBuf,
    pub include_dir: PathBuf,
    pub java_include_dir: PathBuf,
}

impl ResolvedTool {
    pub fn in_nar_dir(nar_dir: &Path, entry: &ToolEntry) -> Self {
        let include_dir = nar_dir.join("include");
        Self {
            executable: nar_dir.join("bin").join(entry.aol()).join(entry.executable),
            java_include_dir: include_dir.join("java"),
            include_dir,
        }
    }
}
