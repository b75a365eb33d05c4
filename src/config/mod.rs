//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, ListenConfig, AuditConfig)
//! - [`limits`]: Per-connection limits (LimitsConfig)
//! - [`validation`]: Startup sanity checks

mod limits;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use types::{AuditConfig, Config};
pub use validation::validate;
