//! Administrative command surface
//!
//! A single subcommand: `reload` re-reads the configuration file without
//! touching the periodic scans, the throttle table, or any creature tags.
//! Everything here reports through user-facing message strings; a failed
//! reload leaves the previous configuration active.

use std::path::Path;

use crate::simulation::Simulation;

/// Parsed administrative command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCommand {
    Reload,
}

impl AdminCommand {
    /// Parse a command line; unknown input yields the usage message
    pub fn parse(input: &str) -> Result<Self, String> {
        match input.trim() {
            "reload" => Ok(Self::Reload),
            _ => Err("Usage: reload".to_string()),
        }
    }

    /// Execute against the running simulation, returning the reply to show
    pub fn execute(&self, sim: &mut Simulation, config_path: &Path) -> String {
        match self {
            Self::Reload => match sim.reload_config(config_path) {
                Ok(()) => "Configuration reloaded.".to_string(),
                Err(err) => {
                    tracing::warn!("Config reload failed: {}", err);
                    format!("Reload failed: {} (previous config kept)", err)
                }
            },
        }
    }
}
