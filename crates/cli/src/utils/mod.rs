pub mod file;

pub use file::{find_interface_files, list_generated_sources};
