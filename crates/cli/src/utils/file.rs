use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const INTERFACE_EXTENSIONS: [&str; 2] = ["swg", "i"];

/// Interface files below `dir`, relative to it, sorted.
pub fn find_interface_files(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| INTERFACE_EXTENSIONS.contains(&ext))
        })
        .filter_map(|e| e.path().strip_prefix(dir).ok().map(Path::to_path_buf))
        .collect();
    found.sort();
    found
}

/// Java sources SWIG wrote below `dir`, sorted.
pub fn list_generated_sources(dir: &Path) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "java"))
        .map(|e| e.into_path())
        .collect();
    sources.sort();
    sources
}
