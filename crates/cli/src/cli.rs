use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use swig_runner_core::{Config, utils::serde_helpers::split_list};

use crate::commands::{generate_command, init_command, platforms_command};

#[derive(Parser, Debug)]
#[command(name = "swig-runner")]
#[command(version, about, long_about = None, propagate_version = true)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging (also passes -v to SWIG)")]
pub struct Runner {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run SWIG on an interface file and register the generated Java sources
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),
    /// Initialize swig-runner configuration
    Init {
        /// Specify the current working directory
        #[arg(short, long)]
        cwd: Option<String>,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,

        /// Interface file to configure (defaults to the first one found in src/main/swig)
        #[arg(short, long)]
        source: Option<String>,
    },
    /// List the platforms SWIG archives are published for
    Platforms,
}

#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    /// Interface file to process, relative to the source directory
    pub source: Option<String>,

    /// Project directory; relative paths are resolved against it
    #[arg(short = 'C', long = "project-dir")]
    pub project_dir: Option<PathBuf>,

    /// Config file to use instead of searching for .swig-runner.json
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the interface files
    #[arg(long)]
    pub source_directory: Option<PathBuf>,

    /// Additional include path, may be repeated
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    pub include_paths: Vec<PathBuf>,

    /// Directory for the generated C/C++ wrapper
    #[arg(long)]
    pub target_directory: Option<PathBuf>,

    /// Directory for the generated Java classes
    #[arg(long)]
    pub java_target_directory: Option<PathBuf>,

    /// Enable C++ processing (-c++)
    #[arg(long)]
    pub cpp: bool,

    /// Warning numbers to suppress, comma or space separated
    #[arg(long = "no-warn", value_name = "IDS")]
    pub no_warn: Option<String>,

    /// Package for the generated Java classes
    #[arg(short, long = "package")]
    pub package_name: Option<String>,

    /// Architecture used to pick the SWIG build (defaults to the host)
    #[arg(long)]
    pub architecture: Option<String>,

    /// Operating system used to pick the SWIG build (defaults to the host)
    #[arg(long)]
    pub os: Option<String>,

    /// Local repository holding the SWIG archive (defaults to ~/.m2/repository)
    #[arg(long)]
    pub local_repository: Option<PathBuf>,

    /// Mirror directory or file:// URL to fetch missing archives from, may be repeated
    #[arg(long = "remote-repository", value_name = "URL")]
    pub remote_repositories: Vec<String>,

    /// Print the command without executing it
    #[arg(short, long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Command-line layer to merge over the config file.
    pub fn to_config(&self) -> Config {
        let non_empty = |items: &[PathBuf]| (!items.is_empty()).then(|| items.to_vec());

        Config {
            source: self.source.clone(),
            source_directory: self.source_directory.clone(),
            include_paths: non_empty(&self.include_paths),
            target_directory: self.target_directory.clone(),
            java_target_directory: self.java_target_directory.clone(),
            cpp: self.cpp.then_some(true),
            no_warn: self.no_warn.as_deref().map(split_list),
            package_name: self.package_name.clone(),
            architecture: self.architecture.clone(),
            os: self.os.clone(),
            local_repository: self.local_repository.clone(),
            remote_repositories: (!self.remote_repositories.is_empty())
                .then(|| self.remote_repositories.clone()),
        }
    }
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Generate(args) => generate_command(&args),
            Commands::Init { cwd, force, source } => {
                init_command(cwd.as_deref(), force, source.as_deref())
            }
            Commands::Platforms => platforms_command(),
        }
    }
}
