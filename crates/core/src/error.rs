use std::io;
use std::path::PathBuf;

/// Errors that can occur while generating sources with SWIG
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Resolution error: {0}")]
    ResolutionError(String),

    #[error("Could not unpack {}: {source}", path.display())]
    ArchiveError {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Could not install {}: {source}", path.display())]
    ArchiveIoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not launch {command}: {source}")]
    LaunchError {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("SWIG returned error code {0}")]
    ToolFailed(i32),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code reported by the CLI for this error.
    ///
    /// A failing SWIG run exits with 1; configuration, resolution and launch
    /// failures each get their own code so scripts can tell them apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ConfigError(_) | Error::SourceNotFound(_) | Error::SerializationError(_) => 2,
            Error::ResolutionError(_) | Error::ArchiveError { .. } | Error::ArchiveIoError { .. } => {
                3
            }
            Error::LaunchError { .. } => 4,
            Error::ToolFailed(_) | Error::IoError(_) => 1,
        }
    }
}

/// Result type alias for swig-runner operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failure_message_contains_code() {
        let err = Error::ToolFailed(2);
        assert_eq!(err.to_string(), "SWIG returned error code 2");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_launch_error_names_command() {
        let err = Error::LaunchError {
            command: "/opt/swig/bin/swig".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert!(err.to_string().contains("/opt/swig/bin/swig"));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_error_kinds_have_distinct_exit_codes() {
        let config = Error::SourceNotFound(PathBuf::from("src/main/swig/example.swg"));
        let resolution = Error::ResolutionError("missing".to_string());
        assert!(config.to_string().contains("example.swg"));
        assert_ne!(config.exit_code(), resolution.exit_code());
        assert_ne!(resolution.exit_code(), Error::ToolFailed(1).exit_code());
    }

    #[test]
    fn test_archive_io_error_is_a_resolution_failure() {
        let err = Error::ArchiveIoError {
            path: PathBuf::from("/repo/nar/bin/amd64-Linux-g++/swig"),
            source: io::Error::other("Text file busy"),
        };
        assert!(err.to_string().contains("/repo/nar/bin/amd64-Linux-g++/swig"));
        assert!(err.to_string().contains("Text file busy"));
        assert_eq!(err.exit_code(), 3);
        assert_ne!(err.exit_code(), Error::ToolFailed(1).exit_code());
    }
}
