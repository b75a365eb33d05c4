//! Command-line arguments.

use crate::config::{AuditConfig, Config};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Multi-user TCP chat server", long_about = None)]
pub struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Address to listen on, overriding `listen.address`.
    #[arg(long)]
    pub listen: Option<SocketAddr>,

    /// Append a JSON Lines audit log to this file, overriding `audit.path`.
    #[arg(long)]
    pub save: Option<PathBuf>,
}

impl Cli {
    /// Load the configured file (or defaults) and apply overrides.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    /// Apply command-line overrides on top of a loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(addr) = self.listen {
            config.listen.address = addr;
        }
        if let Some(path) = &self.save {
            config.audit = Some(AuditConfig { path: path.clone() });
        }
    }
}
