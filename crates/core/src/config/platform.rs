use serde::{Deserialize, Serialize};
use std::fmt;

/// Architecture and operating system names as they appear in NAR classifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub architecture: String,
    pub os: String,
}

impl Platform {
    pub fn new(architecture: &str, os: &str) -> Self {
        Self {
            architecture: normalize_arch(architecture),
            os: normalize_os(os),
        }
    }

    /// The platform this binary was compiled for.
    pub fn host() -> Self {
        Self::new(std::env::consts::ARCH, std::env::consts::OS)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.architecture, self.os)
    }
}

pub fn normalize_arch(arch: &str) -> String {
    match arch.trim() {
        "x86_64" | "amd64" | "x64" => "amd64".to_string(),
        "x86" | "i386" | "i486" | "i586" | "i686" => "i386".to_string(),
        "aarch64" | "arm64" => "aarch64".to_string(),
        "powerpc" | "ppc" => "ppc".to_string(),
        "sparc" | "sparc64" | "sparcv9" => "sparc".to_string(),
        other => other.to_string(),
    }
}

pub fn normalize_os(os: &str) -> String {
    let os = os.trim();
    let lower = os.to_ascii_lowercase();
    if lower.starts_with("windows") {
        "Windows".to_string()
    } else if lower == "linux" {
        "Linux".to_string()
    } else if lower == "macos" || lower == "mac os x" || lower == "macosx" || lower == "darwin" {
        "MacOSX".to_string()
    } else if lower == "solaris" || lower == "sunos" {
        "SunOS".to_string()
    } else if lower == "freebsd" {
        "FreeBSD".to_string()
    } else {
        os.to_string()
    }
}
