//! swig-runner - Run the SWIG interface generator as a build step
//!
//! This crate provides functionality to:
//! - Resolve and unpack the platform-specific SWIG archive from a Maven-layout repository
//! - Generate the SWIG command line from project configuration
//! - Run SWIG while streaming its output into the build log
pub mod command;
pub mod config;
pub mod error;
pub mod generator;
pub mod log;
pub mod project;
pub mod runner;
pub mod tool;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};

// Re-export main API components
pub use command::{CommandBuilder, SwigCommand};
pub use config::{Config, GenerateSettings, OutputLayout, Platform};
pub use generator::{Generated, SwigGenerator};
pub use log::{LogSink, MemorySink, TracingSink};
pub use project::{BuildProject, SourceRoots};
pub use runner::ProcessOutcome;
pub use tool::{ArtifactResolver, Repository, ResolvedTool, ToolTable};
