//! Configuration. Every struct is serde-defaulted so a partial TOML file
//! (or none at all) yields a working config.

pub mod defaults;

mod eligibility_config;
mod gate_config;
mod sync_config;

pub use eligibility_config::EligibilityConfig;
pub use gate_config::{BacktrackPolicy, GateConfig};
pub use sync_config::SyncConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{PassageError, PassageResult};

/// Top-level configuration for the progress engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PassageConfig {
    pub gate: GateConfig,
    pub sync: SyncConfig,
    pub eligibility: EligibilityConfig,
}

impl PassageConfig {
    /// Parse a TOML document. Missing sections and keys fall back to defaults.
    pub fn from_toml_str(s: &str) -> PassageResult<Self> {
        toml::from_str(s).map_err(|e| PassageError::Config {
            reason: e.to_string(),
        })
    }

    /// Load from a TOML file on disk.
    pub fn load(path: &std::path::Path) -> PassageResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| PassageError::Config {
            reason: format!("read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&raw)
    }
}
