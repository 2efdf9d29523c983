//! SWIG command line generation and execution

pub mod builder;
pub mod swig_command;

// Re-export commonly used types
pub use builder::CommandBuilder;
pub use swig_command::SwigCommand;
