//! ---
//! pointy_section: "01-core-functionality"
//! pointy_subsection: "module"
//! pointy_type: "source"
//! pointy_scope: "code"
//! pointy_description: "Shared primitives and utilities for the presence runtime."
//! pointy_version: "v0.1.0"
//! pointy_owner: "tbd"
//! ---
//! Core shared primitives for the pointy workspace.
//! This crate exposes configuration loading, logging, calendar helpers and
//! version metadata consumed across the workspace.

pub mod config;
pub mod logging;
pub mod time;
pub mod version;

pub use config::{
    AppConfig, LoadedAppConfig, LoggingConfig, PagesConfig, SimulationConfig, ViewsConfig,
};
pub use logging::{init_cli_tracing, init_tracing, LogFormat};
pub use version::VersionInfo;
