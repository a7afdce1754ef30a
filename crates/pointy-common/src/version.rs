//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Shared primitives and utilities for the presence runtime."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
use serde::Serialize;

/// Build metadata reported by `--version` flags.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VersionInfo {
    pub package: &'static str,
    pub semver: &'static str,
    pub profile: &'static str,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            package: env!("CARGO_PKG_NAME"),
            semver: env!("CARGO_PKG_VERSION"),
            profile: if cfg!(debug_assertions) {
                "debug"
            } else {
                "release"
            },
        }
    }

    pub fn cli_string(&self) -> String {
        format!("pointy {}", self.semver)
    }

    pub fn extended(&self) -> String {
        format!("pointy {} ({} build)", self.semver, self.profile)
    }
}
