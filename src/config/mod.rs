//! Tunable assessment constants, loaded from an optional config file.

#[expect(clippy::module_inception, reason = "Matches the module layout used across the codebase")]
mod config;

pub use config::{Config, DEFAULT_CONFIG_YAML};
