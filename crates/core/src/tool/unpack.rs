use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Extract a NAR into `dest`, replacing existing files.
///
/// `META-INF` is skipped. Unix permission bits stored in the archive are
/// restored so that `bin/<aol>/swig` stays executable. Each file is written
/// beside its target and renamed into place, so a binary that is currently
/// running is never truncated. A marker in `dest` records the unpack; while it
/// is at least as new as the archive nothing is extracted and 0 is returned.
/// Otherwise returns the number of files written.
pub fn unpack_nar(archive: &Path, dest: &Path) -> Result<usize> {
    let archive_error = |source| Error::ArchiveError {
        path: archive.to_path_buf(),
        source,
    };

    let marker = marker_path(archive, dest)?;
    if is_up_to_date(archive, &marker) {
        return Ok(0);
    }

    let file = File::open(archive).map_err(io_error(archive))?;
    let mut zip = zip::ZipArchive::new(file).map_err(archive_error)?;
    let mut written = 0;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(archive_error)?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(Error::ArchiveIoError {
                path: archive.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("entry {} escapes the archive root", entry.name()),
                ),
            });
        };
        if relative.starts_with("META-INF") {
            continue;
        }

        let out_path = dest.join(&relative);
        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(io_error(&out_path))?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }

        let staged = staging_path(&out_path);
        let mut out = File::create(&staged).map_err(io_error(&staged))?;
        io::copy(&mut entry, &mut out).map_err(io_error(&staged))?;
        drop(out);
        if let Some(mode) = entry.unix_mode() {
            restore_mode(&staged, mode).map_err(io_error(&staged))?;
        }
        fs::rename(&staged, &out_path).map_err(io_error(&out_path))?;
        written += 1;
    }

    fs::create_dir_all(dest).map_err(io_error(dest))?;
    File::create(&marker).map_err(io_error(&marker))?;
    Ok(written)
}

/// Attach the path being written to an I/O failure.
pub(crate) fn io_error(path: &Path) -> impl FnOnce(io::Error) -> Error + use<> {
    let path = path.to_path_buf();
    move |source| Error::ArchiveIoError { path, source }
}

fn marker_path(archive: &Path, dest: &Path) -> Result<PathBuf> {
    let name = archive.file_name().ok_or_else(|| {
        Error::ResolutionError(format!("{} is not a file name", archive.display()))
    })?;
    Ok(dest.join(format!(".{}.unpacked", name.to_string_lossy())))
}

fn is_up_to_date(archive: &Path, marker: &Path) -> bool {
    let modified = |path: &Path| fs::metadata(path).and_then(|meta| meta.modified());
    match (modified(archive), modified(marker)) {
        (Ok(archive), Ok(marker)) => marker >= archive,
        _ => false,
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

#[cfg(unix)]
fn restore_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))
}

#[cfg(not(unix))]
fn restore_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn build_archive(path: &Path, entries: &[(&str, &str, u32)]) {
        let entries: Vec<_> = entries
            .iter()
            .map(|(name, contents, mode)| (*name, contents.as_bytes(), *mode))
            .collect();
        build_binary_archive(path, &entries);
    }

    fn build_binary_archive(path: &Path, entries: &[(&str, &[u8], u32)]) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, contents, mode) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default().unix_permissions(*mode))
                .unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_unpack_writes_files_and_skips_meta_inf() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("swig-noarch.nar");
        build_archive(
            &archive,
            &[
                ("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n", 0o644),
                ("include/swig.swg", "/* swig */", 0o644),
                ("include/java/java.swg", "/* java */", 0o644),
            ],
        );

        let dest = temp_dir.path().join("nar");
        assert_eq!(unpack_nar(&archive, &dest).unwrap(), 2);
        assert_eq!(
            fs::read_to_string(dest.join("include/java/java.swg")).unwrap(),
            "/* java */"
        );
        assert!(!dest.join("META-INF").exists());
    }

    #[test]
    fn test_unpack_overwrites_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("a.nar");
        build_archive(&archive, &[("include/swig.swg", "new", 0o644)]);

        let dest = temp_dir.path().join("nar");
        fs::create_dir_all(dest.join("include")).unwrap();
        fs::write(dest.join("include/swig.swg"), "old contents").unwrap();

        unpack_nar(&archive, &dest).unwrap();
        assert_eq!(fs::read_to_string(dest.join("include/swig.swg")).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_unpack_restores_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("exe.nar");
        build_archive(&archive, &[("bin/amd64-Linux-g++/swig", "#!/bin/sh\n", 0o755)]);

        let dest = temp_dir.path().join("nar");
        unpack_nar(&archive, &dest).unwrap();
        let mode = fs::metadata(dest.join("bin/amd64-Linux-g++/swig"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[test]
    fn test_unpack_rejects_corrupt_archive() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("broken.nar");
        fs::write(&archive, "this is not a zip file").unwrap();

        let err = unpack_nar(&archive, &temp_dir.path().join("nar")).unwrap_err();
        assert!(matches!(err, Error::ArchiveError { .. }));
    }

    #[test]
    fn test_unpack_rejects_entry_escaping_destination() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("evil.nar");
        build_archive(&archive, &[("../evil", "payload", 0o644)]);

        let dest = temp_dir.path().join("repo/nar");
        fs::create_dir_all(&dest).unwrap();
        let err = unpack_nar(&archive, &dest).unwrap_err();

        assert!(matches!(err, Error::ArchiveIoError { .. }));
        assert!(err.to_string().contains("../evil"));
        assert_eq!(err.exit_code(), 3);
        assert!(!temp_dir.path().join("repo/evil").exists());
        assert!(!temp_dir.path().join("evil").exists());
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
    }

    #[test]
    fn test_unwritable_destination_is_resolution_failure() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("swig-noarch.nar");
        build_archive(&archive, &[("include/swig.swg", "/* swig */", 0o644)]);

        // a plain file where the nar directory should be
        let dest = temp_dir.path().join("nar");
        fs::write(&dest, "").unwrap();

        let err = unpack_nar(&archive, &dest).unwrap_err();
        assert!(matches!(err, Error::ArchiveIoError { .. }));
        assert!(err.to_string().contains("nar"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_unpack_skipped_while_marker_is_current() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("swig-noarch.nar");
        build_archive(&archive, &[("include/swig.swg", "/* swig */", 0o644)]);
        let dest = temp_dir.path().join("nar");

        assert_eq!(unpack_nar(&archive, &dest).unwrap(), 1);
        assert!(dest.join(".swig-noarch.nar.unpacked").is_file());

        fs::write(dest.join("include/swig.swg"), "edited").unwrap();
        assert_eq!(unpack_nar(&archive, &dest).unwrap(), 0);
        assert_eq!(fs::read_to_string(dest.join("include/swig.swg")).unwrap(), "edited");

        fs::remove_file(dest.join(".swig-noarch.nar.unpacked")).unwrap();
        assert_eq!(unpack_nar(&archive, &dest).unwrap(), 1);
        assert_eq!(fs::read_to_string(dest.join("include/swig.swg")).unwrap(), "/* swig */");
    }

    #[cfg(unix)]
    #[test]
    fn test_unpack_while_extracted_binary_is_running() {
        use std::process::Command;

        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("swig-amd64-Linux-g++-executable.nar");
        let sleep = fs::read("/bin/sleep").unwrap();
        build_binary_archive(&archive, &[("bin/amd64-Linux-g++/swig", &sleep, 0o755)]);

        let dest = temp_dir.path().join("nar");
        let executable = dest.join("bin/amd64-Linux-g++/swig");
        unpack_nar(&archive, &dest).unwrap();
        let mut running = Command::new(&executable).arg("30").spawn().unwrap();

        // up to date: nothing is touched
        let skipped = unpack_nar(&archive, &dest);
        // forced re-extraction replaces the file instead of truncating it
        fs::remove_file(dest.join(".swig-amd64-Linux-g++-executable.nar.unpacked")).unwrap();
        let replaced = unpack_nar(&archive, &dest);

        running.kill().unwrap();
        running.wait().unwrap();

        assert_eq!(skipped.unwrap(), 0);
        assert_eq!(replaced.unwrap(), 1);
        assert_eq!(fs::read(&executable).unwrap(), sleep);
        assert!(!dest.join("bin/amd64-Linux-g++/swig.part").exists());
    }
}
