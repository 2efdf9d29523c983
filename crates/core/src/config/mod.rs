//! Configuration management for swig-runner

mod platform;
pub mod settings;

// Re-export main types
pub use platform::{normalize_arch, normalize_os, Platform};
pub use settings::{Config, GenerateSettings, OutputLayout};
