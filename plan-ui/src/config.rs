//! TOML configuration for the `life-planner` binary.
//!
//! ```toml
//! [simulation]
//! backend = "local"
//! years = 50
//! include_analysis = true
//! # base_year = 2026
//!
//! [logging]
//! level = "info"
//! file = "life-planner.log"
//! stdout = true
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above
//! (no log file by default).

use std::path::{Path, PathBuf};

use plan_core::models::{DEFAULT_SIMULATION_YEARS, SimulationOptions};
use plan_core::simulator::SimulatorConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    pub backend: String,
    pub years: u32,
    pub include_analysis: bool,
    pub base_year: Option<i32>,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            backend: "local".to_string(),
            years: DEFAULT_SIMULATION_YEARS,
            include_analysis: true,
            base_year: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Bare level or full `EnvFilter` directive.
    pub level: String,
    pub file: Option<PathBuf>,
    pub stdout: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            stdout: true,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(
        contents: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    pub fn simulator_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            backend: self.simulation.backend.clone(),
            base_year: self.simulation.base_year,
        }
    }

    pub fn simulation_options(&self) -> SimulationOptions {
        SimulationOptions {
            simulation_years: self.simulation.years,
            include_analysis: self.simulation.include_analysis,
        }
    }
}
