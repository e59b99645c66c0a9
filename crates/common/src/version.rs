//! Build metadata reported by the CLI and the `/_status/version` endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Build information captured at compile time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildInfo {
    pub version: String,
    pub build_timestamp: String,
    pub build_profile: String,
}

impl BuildInfo {
    /// Build info for the crate compiling this call.
    ///
    /// BUILD_TIMESTAMP and BUILD_PROFILE come from the crate's build
    /// script, so downstream binaries should override the fields that
    /// belong to their own compile environment.
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            build_timestamp: option_env!("BUILD_TIMESTAMP").unwrap_or("unknown").to_string(),
            build_profile: option_env!("BUILD_PROFILE").unwrap_or("unknown").to_string(),
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fastdoc {} ({} build, {})",
            self.version, self.build_profile, self.build_timestamp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_populated() {
        let info = BuildInfo::new();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(!info.build_timestamp.is_empty());
    }

    #[test]
    fn test_display_contains_version() {
        let info = BuildInfo::new();
        assert!(info.to_string().contains(&info.version));
    }
}
