use anyhow::{Context, Result, bail};
use std::{env, path::PathBuf};
use swig_runner_core::{
    Config,
    config::settings::{
        CONFIG_FILE_NAMES, DEFAULT_JAVA_TARGET_DIRECTORY, DEFAULT_SOURCE_DIRECTORY,
        DEFAULT_TARGET_DIRECTORY,
    },
};
use tracing::info;

use crate::utils::find_interface_files;

pub fn init_command(cwd: Option<&str>, force: bool, source: Option<&str>) -> Result<()> {
    // Determine the project root
    let project_root = if let Some(cwd) = cwd {
        PathBuf::from(cwd)
    } else {
        env::current_dir().context("Failed to get current directory")?
    };

    let project_root = project_root
        .canonicalize()
        .context("Failed to canonicalize project root")?;

    let config_path = project_root.join(CONFIG_FILE_NAMES[0]);
    if config_path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    let source = match source {
        Some(source) => source.to_string(),
        None => {
            let found = find_interface_files(&project_root.join(DEFAULT_SOURCE_DIRECTORY));
            info!("Found {} interface files", found.len());
            match found.first() {
                Some(first) => first.display().to_string(),
                None => bail!(
                    "No interface files found in {}; pass --source",
                    project_root.join(DEFAULT_SOURCE_DIRECTORY).display()
                ),
            }
        }
    };

    let config = Config {
        source: Some(source),
        source_directory: Some(PathBuf::from(DEFAULT_SOURCE_DIRECTORY)),
        target_directory: Some(PathBuf::from(DEFAULT_TARGET_DIRECTORY)),
        java_target_directory: Some(PathBuf::from(DEFAULT_JAVA_TARGET_DIRECTORY)),
        cpp: Some(false),
        ..Default::default()
    };
    config
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!("✅ Created config: {}", config_path.display());
    Ok(())
}
