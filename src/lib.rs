//! Fixtures for the end-to-end tests: a fake SWIG packaged the way the real
//! one is published, inside a throwaway Maven-layout repository.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use swig_runner_core::{
    GenerateSettings, Platform, Repository, ToolTable,
    tool::{SWIG, ToolEntry},
};
use zip::write::SimpleFileOptions;

pub const FAKE_ENTRIES: &[ToolEntry] = &[ToolEntry::new("amd64", "Linux", "g++", "swig")];

/// Stand-in for SWIG: echoes its arguments, writes the wrapper and one Java
/// class, prints a warning on stderr and exits with `exit_code`.
pub fn fake_swig_script(exit_code: i32) -> String {
    format!(
        r#"#!/bin/sh
echo "args: $*"
out=""
outdir=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift ;;
    -outdir) outdir="$2"; shift ;;
  esac
  shift
done
echo "/* generated wrapper */" > "$out"
echo "public class Example {{}}" > "$outdir/Example.java"
echo "Language subdirectory: java"
echo "fake swig warning" >&2
exit {exit_code}
"#
    )
}

pub fn fake_platform() -> Platform {
    Platform::new("amd64", "Linux")
}

pub fn fake_tools() -> ToolTable {
    ToolTable::new(SWIG, FAKE_ENTRIES)
}

/// Publish the fake tool's two NARs into the repository rooted at `root`.
pub fn publish_fake_swig(root: &Path, script: &str) -> io::Result<Repository> {
    let repository = Repository::new(root);
    let tools = fake_tools();

    write_nar(
        &repository.path_of(&tools.executable_artifact(&FAKE_ENTRIES[0])),
        &[("bin/amd64-Linux-g++/swig", script, 0o755)],
    )?;
    write_nar(
        &repository.path_of(&tools.noarch_artifact()),
        &[
            ("include/swig.swg", "/* swig */", 0o644),
            ("include/java/java.swg", "/* java */", 0o644),
        ],
    )?;
    Ok(repository)
}

pub fn write_nar(path: &Path, entries: &[(&str, &str, u32)]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = zip::ZipWriter::new(File::create(path)?);
    for (name, contents, mode) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default().unix_permissions(*mode))
            .map_err(io::Error::other)?;
        writer.write_all(contents.as_bytes())?;
    }
    writer.finish().map_err(io::Error::other)?;
    Ok(())
}

/// A project directory holding `src/main/swig/<source>`.
pub fn project_with_source(dir: &Path, source: &str) -> io::Result<GenerateSettings> {
    let mut settings = GenerateSettings::new(dir, source);
    settings.platform = fake_platform();
    fs::create_dir_all(&settings.source_directory)?;
    fs::write(
        settings.source_path(),
        "%module example\n%{\nextern double Foo;\nextern int gcd(int x, int y);\n%}\n",
    )?;
    Ok(settings)
}
