//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{Assumptions, EngineConfig, EngineMetadata};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── engine.yaml       # Configuration metadata
/// └── assumptions.yaml  # Computation constants
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_kpi_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Working days: {}", loader.assumptions().working_days_per_month);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any constant is out of range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;
        let assumptions = Self::load_yaml::<Assumptions>(&path.join("assumptions.yaml"))?;
        Self::validate(&assumptions)?;

        Ok(Self {
            config: EngineConfig::new(metadata, assumptions),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        Self::validate(config.assumptions())?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(assumptions: &Assumptions) -> EngineResult<()> {
        if assumptions.working_days_per_month <= Decimal::ZERO {
            return Err(invalid("working_days_per_month", "must be positive"));
        }
        if assumptions.employer_charge_multiplier < Decimal::ONE {
            return Err(invalid(
                "employer_charge_multiplier",
                "must be at least 1 (employer cost includes gross pay)",
            ));
        }
        if assumptions.default_age < 0 {
            return Err(invalid("default_age", "cannot be negative"));
        }
        if assumptions.turnover_window_months == 0 {
            return Err(invalid("turnover_window_months", "must be at least 1"));
        }
        if assumptions.turnover_annualization_factor <= Decimal::ZERO {
            return Err(invalid("turnover_annualization_factor", "must be positive"));
        }
        if assumptions.undefined_label.trim().is_empty() {
            return Err(invalid("undefined_label", "cannot be blank"));
        }
        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the computation constants.
    pub fn assumptions(&self) -> &Assumptions {
        self.config.assumptions()
    }
}

fn invalid(key: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        key: key.to_string(),
        message: message.to_string(),
    }
}
