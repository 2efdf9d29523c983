use std::path::{Path, PathBuf};

/// The downstream build that consumes generated sources.
pub trait BuildProject {
    /// Make `root` a source root of the downstream compiler.
    fn add_compile_source_root(&mut self, root: &Path);
}

/// Collects registered source roots in registration order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRoots {
    roots: Vec<PathBuf>,
}

impl SourceRoots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl BuildProject for SourceRoots {
    fn add_compile_source_root(&mut self, root: &Path) {
        if !self.roots.iter().any(|existing| existing == root) {
            self.roots.push(root.to_path_buf());
        }
    }
}
